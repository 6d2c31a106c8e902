use tracking_core::TrackingError;

use crate::{IDENTIFIER, RATE_LIMIT_PERIOD, RATE_LIMIT_REQUESTS};

/// Error token the carrier embeds in a 200 body when throttling, instead of
/// answering with HTTP 429.
pub(crate) const RATE_LIMIT_TOKEN: &str = "api_002";

/// Classify transport-level faults from the HTTP status code, before the
/// body is interpreted. Returns `None` for success statuses.
pub(crate) fn classify_status(status: u16, body: &[u8]) -> Option<TrackingError> {
    match status {
        401 | 403 => Some(TrackingError::AuthenticationFailed { driver: IDENTIFIER }),
        429 => Some(rate_limit_reached()),
        status if !(200..300).contains(&status) => Some(TrackingError::Transport {
            driver: IDENTIFIER,
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }),
        _ => None,
    }
}

/// Re-check for the embedded rate-limit sentinel after token extraction.
pub(crate) fn classify_error_token(token: &str) -> Option<TrackingError> {
    (token == RATE_LIMIT_TOKEN).then(rate_limit_reached)
}

fn rate_limit_reached() -> TrackingError {
    TrackingError::RateLimitReached {
        driver: IDENTIFIER,
        limit: RATE_LIMIT_REQUESTS,
        period: RATE_LIMIT_PERIOD,
    }
}
