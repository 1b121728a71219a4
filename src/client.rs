use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::{ClientConfig, load_config};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::params::{
    CitiesQuery, LatestQuery, LocationsQuery, MeasurementsQuery, ParametersQuery, SourcesQuery,
};
use crate::transport::{HttpTransport, Request, Transport};
use crate::util::QueryParams;

#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client using environment variables and/or `.openaqrc`.
    ///
    /// This is equivalent to `Client::new(None, None, None)`.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None, None)
    }

    /// Creates a client using (in order of precedence):
    /// - explicit arguments
    /// - environment variables `OPENAQ_API_URL` / `OPENAQ_TIMEOUT` / `OPENAQ_VERIFY`
    /// - config file from `OPENAQ_RC` or `.openaqrc`
    /// - the public API root with a 60 second timeout
    pub fn new(url: Option<String>, timeout: Option<Duration>, verify: Option<bool>) -> Result<Self> {
        Self::from_config(load_config(url, timeout, verify)?)
    }

    pub fn from_config(cfg: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(cfg.verify)?;
        Ok(Self {
            url: cfg.url,
            timeout: cfg.timeout,
            transport: Arc::new(transport),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Replaces the HTTP layer, e.g. with a canned transport in tests.
    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// API health, from the service root.
    pub fn status(&self) -> Result<Value> {
        self.get(Endpoint::Status, &QueryParams::new())
    }

    pub fn cities(&self, query: &CitiesQuery) -> Result<Value> {
        self.get(Endpoint::Cities, &query.to_params()?)
    }

    pub fn countries(&self) -> Result<Value> {
        self.get(Endpoint::Countries, &QueryParams::new())
    }

    /// Records of the API's data ingestion runs.
    pub fn fetches(&self) -> Result<Value> {
        self.get(Endpoint::Fetches, &QueryParams::new())
    }

    /// Latest value of each parameter per location.
    ///
    /// Fails with [`Error::Validation`] before sending anything if
    /// `parameter` is not a known pollutant code.
    pub fn latest(&self, query: &LatestQuery) -> Result<Value> {
        self.get(Endpoint::Latest, &query.to_params()?)
    }

    pub fn locations(&self, query: &LocationsQuery) -> Result<Value> {
        self.get(Endpoint::Locations, &query.to_params()?)
    }

    /// Individual measurements. See [`MeasurementsQuery`] for the checks
    /// applied to the query before the request is sent.
    pub fn measurements(&self, query: &MeasurementsQuery) -> Result<Value> {
        self.get(Endpoint::Measurements, &query.to_params()?)
    }

    pub fn parameters(&self, query: &ParametersQuery) -> Result<Value> {
        self.get(Endpoint::Parameters, &query.to_params()?)
    }

    pub fn sources(&self, query: &SourcesQuery) -> Result<Value> {
        self.get(Endpoint::Sources, &query.to_params()?)
    }

    /// Sends one GET and decodes the body into `T`.
    ///
    /// The HTTP status is not inspected: an error payload from the API
    /// decodes like any other body.
    pub fn get<T: DeserializeOwned>(&self, endpoint: Endpoint, query: &QueryParams) -> Result<T> {
        let url = endpoint.url(&self.url);
        debug!(%endpoint, url = %url, params = query.len(), "GET");

        let resp = self.transport.get(&Request {
            url: &url,
            query,
            timeout: self.timeout,
        })?;

        serde_json::from_str::<T>(&resp.body).map_err(|source| Error::Decode {
            url,
            status: resp.status,
            source,
        })
    }
}
