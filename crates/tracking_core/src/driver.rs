use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{TrackingDetails, TrackingError};

/// A carrier adapter: one outbound API call per `find` invocation.
///
/// Implementations are stateless apart from held credentials; calls are
/// independent and may run concurrently without coordination.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Stable registry key for this carrier, e.g. `"auspost"`.
    fn name(&self) -> &'static str;

    /// Fetch and normalize the carrier's view of `identifier`.
    ///
    /// `parameters` are extra query parameters merged into the request.
    /// Degraded or negative carrier answers come back as a successful
    /// [`TrackingDetails`]; only transport and authorization faults error.
    async fn find(
        &self,
        identifier: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<TrackingDetails, TrackingError>;
}
