use std::fmt;

use crate::util::urljoin;

/// Root of the public API.
pub const DEFAULT_API_URL: &str = "https://api.openaq.org";

/// The REST resources the client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The service root, used as a health check.
    Status,
    Cities,
    Countries,
    Fetches,
    Latest,
    Locations,
    Measurements,
    Parameters,
    Sources,
}

impl Endpoint {
    pub const ALL: [Endpoint; 9] = [
        Endpoint::Status,
        Endpoint::Cities,
        Endpoint::Countries,
        Endpoint::Fetches,
        Endpoint::Latest,
        Endpoint::Locations,
        Endpoint::Measurements,
        Endpoint::Parameters,
        Endpoint::Sources,
    ];

    /// Path relative to the API root. Empty for [`Endpoint::Status`].
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Status => "",
            Endpoint::Cities => "v1/cities",
            Endpoint::Countries => "v1/countries",
            Endpoint::Fetches => "v1/fetches",
            Endpoint::Latest => "v1/latest",
            Endpoint::Locations => "v1/locations",
            Endpoint::Measurements => "v1/measurements",
            Endpoint::Parameters => "v1/parameters",
            Endpoint::Sources => "v1/sources",
        }
    }

    pub fn url(self, root: &str) -> String {
        urljoin(root, self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Status => f.write_str("status"),
            other => f.write_str(other.path().trim_start_matches("v1/")),
        }
    }
}
