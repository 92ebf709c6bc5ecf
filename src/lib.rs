//! Client SDK for the Mercedes-Benz vehicle data API
//!
//! Issues authenticated requests against the vehicle data REST API and
//! decodes the JSON responses into typed values.
//!
//! # Example
//!
//! ```no_run
//! use merche::{Client, Credentials, GetVehicleStatusOptions};
//!
//! # async fn example() -> merche::Result<()> {
//! let client = Client::new(reqwest::Client::new())
//!     .with_credentials(Credentials::new("access-token"));
//!
//! let opts = GetVehicleStatusOptions::new("EXVETESTVIN000001");
//! let (resources, response) = client.vehicle_status().get_available_resources(&opts).await?;
//!
//! println!("{} resources ({})", resources.len(), response.status);
//! # Ok(())
//! # }
//! ```

pub mod mercedes;

pub use mercedes::auth::Credentials;
pub use mercedes::client::{Client, DEFAULT_BASE_URL};
pub use mercedes::error::{Error, ErrorResponse, Result};
pub use mercedes::http::{format_api_error, Response};
pub use mercedes::vehicle_status::{
    GetVehicleStatusOptions, Resource, ResourceMetaInfo, ResourceValue, VehicleStatusService,
};
