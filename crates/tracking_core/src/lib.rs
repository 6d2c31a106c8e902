#![forbid(unsafe_code)]
//! Carrier-agnostic parcel tracking contracts.
//!
//! This crate is the shared surface between a host application and its
//! carrier adapters. It owns:
//! - The canonical [`Status`] vocabulary and the [`TrackingDetails`] /
//!   [`TrackingEvent`] record types every adapter produces.
//! - The [`TrackingError`] fault taxonomy (authentication failures, rate
//!   limiting, transport errors) shared by all adapters.
//! - The [`Driver`] trait adapters implement and the explicit-registration
//!   [`Registry`] hosts wire drivers into at startup.
//! - The [`HttpTransport`] seam adapters talk to carriers through, with a
//!   `reqwest`-backed default and room for canned test transports.
//! - TOML credential loading via [`TrackingConfig`].
//!
//! Carrier-specific decision logic (payload shapes, status tables, fault
//! sentinels) lives in the adapter crates, e.g. `auspost`.

mod config;
mod details;
mod driver;
mod error;
mod registry;
mod status;
mod transport;

pub use config::{CarrierCredentials, ConfigError, TrackingConfig};
pub use details::{TrackingDetails, TrackingEvent};
pub use driver::Driver;
pub use error::TrackingError;
pub use registry::Registry;
pub use status::Status;
pub use transport::{HttpTransport, RawResponse, ReqwestTransport, TransportFailure};
