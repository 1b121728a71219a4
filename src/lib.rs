//! A small blocking Rust client for the OpenAQ v1 air-quality API.
//!
//! Each endpoint is one method on [`Client`]. Optional filters are given as a
//! typed query struct; they are checked and normalized locally before the
//! request goes out, and the JSON body comes back as a [`serde_json::Value`]
//! without any interpretation.
//!
//! ## Quick start
//! ```no_run
//! use openaq::{Client, LatestQuery, MeasurementsQuery};
//!
//! fn main() -> openaq::Result<()> {
//!     let client = Client::from_env()?;
//!
//!     let latest = client.latest(&LatestQuery::new().city("Delhi").parameter("PM25"))?;
//!     println!("{latest:#}");
//!
//!     let query = MeasurementsQuery::new()
//!         .country("NL")
//!         .parameter("no2")
//!         .date_from("2020-01-01")
//!         .sort("desc")
//!         .limit(10u32);
//!     let measurements = client.measurements(&query)?;
//!     println!("{measurements:#}");
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//! The API root, request timeout and TLS verification come from explicit
//! arguments to [`Client::new`], the `OPENAQ_API_URL`, `OPENAQ_TIMEOUT` and
//! `OPENAQ_VERIFY` environment variables, or a `.openaqrc` file (current
//! directory, then home directory, or the path in `OPENAQ_RC`):
//!
//! ```text
//! url: https://api.openaq.org
//! timeout: 30
//! ```
//!
//! ## Errors
//! [`Error::Validation`] means the request was never sent and the inputs need
//! fixing. [`Error::Transport`] and [`Error::Decode`] come from the round trip
//! itself. Nothing is retried.

#![forbid(unsafe_code)]

mod client;
mod config;
mod endpoint;
mod error;
mod params;
mod transport;
mod util;

pub use client::Client;
pub use config::ClientConfig;
pub use endpoint::{DEFAULT_API_URL, Endpoint};
pub use error::{Error, Result};
pub use params::{
    CitiesQuery, IncludeField, LatestQuery, LocationsQuery, MeasurementsQuery, ParametersQuery,
    Pollutant, SortOrder, SourcesQuery,
};
pub use transport::{HttpTransport, Request, Response, Transport};
pub use util::{QueryParams, QueryValue};
