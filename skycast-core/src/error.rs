use reqwest::StatusCode;

/// Failure taxonomy for a single weather lookup.
///
/// A lookup has exactly three user-visible outcomes besides success:
/// the query was empty (rejected before any request), the city is
/// unknown to the geocoder, or something went wrong on the wire. The
/// last category is split into transport / status / parse variants so
/// error messages can say which endpoint misbehaved, but the CLI
/// presents them all as one failure line.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Failed to reach the {endpoint} service: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} response: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// True for any failure at the network boundary, regardless of
    /// whether the transport, the status code, or the payload was at
    /// fault.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::Network { .. } | Error::Status { .. } | Error::Parse { .. }
        )
    }
}
