//! Vehicle data API interaction module
//!
//! This module provides the core functionality for talking to the
//! Mercedes-Benz vehicle data API: credentials, the HTTP layer, the base
//! client and the vehicle status service.
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer access token handling
//! - [`client`] - Base client holding base URL, transport and credentials
//! - [`error`] - Library error type
//! - [`http`] - HTTP utilities for REST API calls
//! - [`vehicle_status`] - Vehicle status resources and their service
//!
//! # Example
//!
//! ```ignore
//! use merche::mercedes::client::Client;
//!
//! async fn example() -> merche::Result<()> {
//!     let client = Client::new(reqwest::Client::new());
//!     let opts = GetVehicleStatusOptions::new("EXVETESTVIN000001");
//!     let (status, _) = client.vehicle_status().get_vehicle_status(&opts).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod vehicle_status;
