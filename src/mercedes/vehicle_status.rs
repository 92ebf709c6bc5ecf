//! Vehicle status resources
//!
//! Door locks, windows, lights, sunroof and the other readings a vehicle
//! exposes, plus the service that fetches them.

use super::client::Client;
use super::error::{Error, Result};
use super::http::Response;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One resource a vehicle exposes, as listed by the resources endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetaInfo {
    /// Resource identifier, e.g. `sunroofstatus`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Version of the resource schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Path of the resource relative to the API root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Parameters shared by the vehicle status requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetVehicleStatusOptions {
    pub vehicle_id: String,
}

impl GetVehicleStatusOptions {
    /// Options for the given vehicle identification number
    pub fn new(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
        }
    }

    fn vehicle_id(&self) -> Result<&str> {
        if self.vehicle_id.trim().is_empty() {
            return Err(Error::MissingVehicleId);
        }
        Ok(&self.vehicle_id)
    }
}

/// A single reading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceValue {
    #[serde(default)]
    pub value: Option<String>,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl ResourceValue {
    /// When the reading was taken
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// A named reading, e.g. `{"sunroofstatus": {"value": "0", "timestamp": 1565...}}`
///
/// On the wire a resource is an object with exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "BTreeMap<String, ResourceValue>")]
pub struct Resource {
    pub name: String,
    pub value: ResourceValue,
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ResourceVisitor)
    }
}

/// Counts raw entries, so a repeated key is not collapsed into one
struct ResourceVisitor;

impl<'de> Visitor<'de> for ResourceVisitor {
    type Value = Resource;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a resource object with exactly one entry")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Resource, A::Error>
    where
        A: MapAccess<'de>,
    {
        let Some((name, value)) = map.next_entry::<String, ResourceValue>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };

        let mut entries = 1;
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {
            entries += 1;
        }
        if entries != 1 {
            return Err(de::Error::invalid_length(entries, &self));
        }

        Ok(Resource { name, value })
    }
}

impl From<Resource> for BTreeMap<String, ResourceValue> {
    fn from(resource: Resource) -> Self {
        BTreeMap::from([(resource.name, resource.value)])
    }
}

/// Vehicle status endpoints
#[derive(Debug, Clone, Copy)]
pub struct VehicleStatusService<'a> {
    client: &'a Client,
}

impl<'a> VehicleStatusService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the resources the vehicle exposes, in response order
    pub async fn get_available_resources(
        &self,
        opts: &GetVehicleStatusOptions,
    ) -> Result<(Vec<ResourceMetaInfo>, Response)> {
        let url = self
            .client
            .url_for(&["vehicles", opts.vehicle_id()?, "resources"])?;
        self.client.get(url).await
    }

    /// Read a single resource by name
    pub async fn get_resource(
        &self,
        opts: &GetVehicleStatusOptions,
        name: &str,
    ) -> Result<(Resource, Response)> {
        if name.trim().is_empty() {
            return Err(Error::MissingResourceName);
        }
        let url = self
            .client
            .url_for(&["vehicles", opts.vehicle_id()?, "resources", name])?;
        self.client.get(url).await
    }

    /// Read the whole vehicle status container
    pub async fn get_vehicle_status(
        &self,
        opts: &GetVehicleStatusOptions,
    ) -> Result<(Vec<Resource>, Response)> {
        let url = self
            .client
            .url_for(&["vehicles", opts.vehicle_id()?, "containers", "vehiclestatus"])?;
        self.client.get(url).await
    }

    /// Read several resources concurrently.
    /// Results follow the order of `names`; the first failure fails the call.
    pub async fn get_resources<S: AsRef<str>>(
        &self,
        opts: &GetVehicleStatusOptions,
        names: &[S],
    ) -> Result<Vec<Resource>> {
        let requests = names
            .iter()
            .map(|name| self.get_resource(opts, name.as_ref()));

        let results = futures::future::try_join_all(requests).await?;
        tracing::debug!("Fetched {} resources for vehicle", results.len());

        Ok(results.into_iter().map(|(resource, _)| resource).collect())
    }
}
