use thiserror::Error;

use crate::transport::TransportFailure;

/// Faults and transport failures raised by carrier drivers.
///
/// `AuthenticationFailed` and `RateLimitReached` mean the request itself
/// could not be serviced. Negative business outcomes (`NotFound`,
/// `Failure`, `Unknown`) are not errors: they travel inside a successful
/// [`crate::TrackingDetails`].
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("the API authentication failed for the {driver} driver")]
    AuthenticationFailed { driver: &'static str },

    /// The caller should back off and retry after `period`; drivers never
    /// retry on their own.
    #[error(
        "the API limit of {limit} requests per {period} has been reached for the {driver} driver"
    )]
    RateLimitReached {
        driver: &'static str,
        limit: u32,
        period: &'static str,
    },

    /// Any other non-success HTTP status, surfaced unmodified.
    #[error("the {driver} driver received an unexpected HTTP {status} response: {body}")]
    Transport {
        driver: &'static str,
        status: u16,
        body: String,
    },

    #[error("the {driver} driver could not reach the carrier API")]
    Network {
        driver: &'static str,
        #[source]
        source: TransportFailure,
    },

    /// The body was not JSON at all. Unexpected *shapes* of valid JSON never
    /// error; they degrade to `Status::Unknown` instead.
    #[error("the {driver} driver received a non-JSON response body")]
    InvalidBody {
        driver: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no driver registered under `{name}`")]
    UnknownDriver { name: String },
}
