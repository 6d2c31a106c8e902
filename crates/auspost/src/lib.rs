#![forbid(unsafe_code)]
//! Australia Post tracking adapter for the `tracking_core` driver contract.
//!
//! Calls the AusPost shipping track API and normalizes whichever of the
//! carrier's payload shapes comes back (flat shipment status, consignment
//! status, nested per-item status) into a [`tracking_core::TrackingDetails`].
//! Rate-limit and authentication faults are classified before ordinary
//! status mapping runs, including the carrier's habit of reporting a rate
//! limit inside a 200 response body.
//!
//! ```rust,no_run
//! use auspost::AusPostClient;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AusPostClient::builder("api-key", "password", "account-number").build();
//! let details = client.find("7XX1000634011427", &Default::default()).await?;
//! println!("{}: {}", details.identifier, details.status);
//! # Ok(()) }
//! ```

mod client;
mod extract;
mod fault;
mod tables;

pub use client::{AusPostClient, AusPostClientBuilder};

/// Registry key for this carrier.
pub const IDENTIFIER: &str = "auspost";

/// Production API origin.
pub const BASE_URI: &str = "https://digitalapi.auspost.com.au";

pub(crate) const TRACK_PATH: &str = "/shipping/v1/track";

/// Documented request ceiling reported in rate-limit faults.
pub(crate) const RATE_LIMIT_REQUESTS: u32 = 10;
pub(crate) const RATE_LIMIT_PERIOD: &str = "minute";
