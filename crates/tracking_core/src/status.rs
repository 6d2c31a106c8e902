use std::fmt;

use serde::{Deserialize, Serialize};

/// Carrier-agnostic delivery classification.
///
/// This is a classification, not a progression: there is no meaningful
/// ordering between variants, and a shipment can move from `Pending`
/// straight to `Cancelled`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    PreTransit,
    InTransit,
    Delivered,
    Failure,
    Cancelled,
    NotFound,
    Unknown,
}

impl Status {
    /// Human-readable label for the classification.
    pub fn description(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::PreTransit => "Pre Transit",
            Status::InTransit => "In Transit",
            Status::Delivered => "Delivered",
            Status::Failure => "Failure",
            Status::Cancelled => "Cancelled",
            Status::NotFound => "Not Found",
            Status::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
