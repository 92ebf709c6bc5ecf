//! HTTP utilities for vehicle data REST API calls

use super::error::{Error, ErrorResponse, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT_VALUE: &str = concat!("merche/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let char_count = body.chars().count();
    let truncated = if char_count > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Metadata of the HTTP response a value was decoded from
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Final URL, after redirects
    pub url: Url,
}

/// HTTP client wrapper for vehicle data API calls
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Wrap an existing transport
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Make a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<(T, Response)> {
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let meta = Response {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        };
        let body = response.bytes().await?;

        if !meta.status.is_success() {
            let text = String::from_utf8_lossy(&body);
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", meta.status, sanitize_for_log(&text));
            return Err(Error::Status {
                status: meta.status,
                body: parse_error_body(&body),
            });
        }

        match serde_json::from_slice(&body) {
            Ok(value) => Ok((value, meta)),
            Err(err) => {
                tracing::error!(
                    "Failed to decode response from {}: {} - {}",
                    meta.url,
                    err,
                    sanitize_for_log(&String::from_utf8_lossy(&body))
                );
                Err(Error::Decode(err))
            }
        }
    }
}

fn parse_error_body(body: &[u8]) -> Option<ErrorResponse> {
    serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .filter(|parsed| !parsed.is_empty())
}

/// Format an API error for display
/// Security: Uses generic messages to avoid leaking API details
pub fn format_api_error(error: &Error) -> String {
    let message = match error {
        Error::MissingVehicleId => "No vehicle id. Pass --vehicle-id or set MERCHE_VEHICLE_ID.",
        Error::MissingResourceName => "Resource name must not be empty.",
        Error::InvalidPathSegment(_) => "Vehicle id and resource names cannot be '.' or '..'.",
        Error::InvalidBaseUrl(_) | Error::Url(_) => {
            "Invalid base URL. It must be absolute and end with '/'."
        }
        Error::Decode(_) => "Unexpected response from the vehicle data API.",
        Error::Transport(err) if err.status().is_none() => {
            "Request failed. Check your network connection and try again."
        }
        Error::Status { .. } | Error::Transport(_) => match error.status().map(|s| s.as_u16()) {
            Some(401) => "Authentication failed. Provide a valid access token in MERCHE_ACCESS_TOKEN.",
            Some(403) => "Permission denied. Check the scopes granted to your token.",
            Some(404) => "Resource not found.",
            Some(429) => "Rate limit exceeded. Please try again later.",
            Some(400) => "Invalid request. Check your parameters.",
            Some(500..=599) => "Vehicle data API temporarily unavailable. Please try again.",
            _ => "Request failed.",
        },
    };

    message.to_string()
}
