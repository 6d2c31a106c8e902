use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Status;

/// One scan/event line from a carrier, in the order the carrier returned it.
///
/// Newest-first ordering is carrier convention, not something this crate
/// enforces or re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub location: Option<String>,
    pub description: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

/// The normalized result of one tracking lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingDetails {
    /// The carrier's canonical identifier when it reports one, otherwise the
    /// identifier the caller asked for.
    pub identifier: String,
    pub status: Status,
    pub summary: String,
    pub estimated_delivery: Option<DateTime<FixedOffset>>,
    pub events: Vec<TrackingEvent>,
    /// The untouched parsed payload, kept verbatim for audit and debugging
    /// no matter how normalization degraded.
    pub raw: Value,
}
