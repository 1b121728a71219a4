use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::util::QueryParams;

/// One outgoing GET.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub url: &'a str,
    pub query: &'a QueryParams,
    pub timeout: Duration,
}

/// Raw reply: the status is reported but never acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Performs the HTTP round trip for [`Client`](crate::Client).
///
/// [`HttpTransport`] is the real implementation; tests and callers with
/// special needs can supply their own through
/// [`Client::with_transport`](crate::Client::with_transport).
pub trait Transport: fmt::Debug + Send + Sync {
    fn get(&self, request: &Request<'_>) -> Result<Response>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(verify: bool) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("openaq-rs/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("openaq-rs")),
        );

        let mut builder = HttpClient::builder().default_headers(default_headers);
        if !verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &Request<'_>) -> Result<Response> {
        let pairs = request.query.to_pairs();
        trace!(url = request.url, query = ?pairs, "sending request");

        let transport_err = |source: reqwest::Error| Error::Transport {
            url: request.url.to_string(),
            source,
        };

        let resp = self
            .http
            .get(request.url)
            .query(&pairs)
            .timeout(request.timeout)
            .send()
            .map_err(transport_err)?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(transport_err)?;
        debug!(url = request.url, status, bytes = body.len(), "response received");

        Ok(Response { status, body })
    }
}
