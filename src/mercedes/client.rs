//! Vehicle data API client
//!
//! Base client for the vehicle data API, combining the base URL, the HTTP
//! transport and the credentials. Services borrow it to issue requests.

use super::auth::Credentials;
use super::error::{Error, Result};
use super::http::{HttpClient, Response};
use super::vehicle_status::VehicleStatusService;
use serde::de::DeserializeOwned;
use url::Url;

/// Production base URL of the vehicle data API
pub const DEFAULT_BASE_URL: &str = "https://api.mercedes-benz.com/vehicledata/v2/";

/// Main vehicle data API client
#[derive(Clone, Debug)]
pub struct Client {
    http: HttpClient,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl Client {
    /// Create a client on top of an existing transport, pointed at the production API
    pub fn new(http: reqwest::Client) -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL");

        Self {
            http: HttpClient::from_client(http),
            base_url,
            credentials: None,
        }
    }

    /// Point the client at another API root, e.g. a sandbox or a mock server.
    /// The URL must end with a slash so relative paths resolve below it.
    pub fn with_base_url(mut self, base_url: Url) -> Result<Self> {
        if !base_url.path().ends_with('/') {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        self.base_url = base_url;
        Ok(self)
    }

    /// Attach bearer credentials to every request
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// API root that request paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Vehicle status resources
    pub fn vehicle_status(&self) -> VehicleStatusService<'_> {
        VehicleStatusService::new(self)
    }

    /// Resolve path segments against the base URL.
    /// Each segment is percent-encoded, so caller input cannot add path levels;
    /// dot segments are rejected, so it cannot remove any either.
    pub(crate) fn url_for(&self, segments: &[&str]) -> Result<Url> {
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(Error::InvalidPathSegment(dot.to_string()));
        }

        let path = segments
            .iter()
            .map(|segment| urlencoding::encode(segment))
            .collect::<Vec<_>>()
            .join("/");

        Ok(self.base_url.join(&path)?)
    }

    /// Make a GET request and decode the JSON body
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<(T, Response)> {
        let token = self.credentials.as_ref().map(Credentials::token);
        self.http.get(url, token).await
    }
}
