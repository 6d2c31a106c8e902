use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use tracking_core::{
    CarrierCredentials, Driver, HttpTransport, RawResponse, ReqwestTransport, TrackingDetails,
    TrackingError,
};

use crate::extract::{self, Extraction};
use crate::{fault, tables, BASE_URI, IDENTIFIER, TRACK_PATH};

/// Builder for [`AusPostClient`]. Credentials are required; the base URL and
/// transport have production defaults.
#[derive(Clone)]
pub struct AusPostClientBuilder {
    api_key: String,
    password: String,
    account_number: String,
    base_url: String,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl AusPostClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Substitute the HTTP collaborator, e.g. a canned transport in tests.
    /// When set, `base_url` is owned by the transport and ignored here.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> AusPostClient {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new(self.base_url)));
        AusPostClient {
            api_key: self.api_key,
            password: self.password,
            account_number: self.account_number,
            transport,
        }
    }
}

/// Australia Post tracking client.
#[derive(Clone)]
pub struct AusPostClient {
    api_key: String,
    password: String,
    account_number: String,
    transport: Arc<dyn HttpTransport>,
}

impl AusPostClient {
    pub fn builder(
        api_key: impl Into<String>,
        password: impl Into<String>,
        account_number: impl Into<String>,
    ) -> AusPostClientBuilder {
        AusPostClientBuilder {
            api_key: api_key.into(),
            password: password.into(),
            account_number: account_number.into(),
            base_url: BASE_URI.to_string(),
            transport: None,
        }
    }

    /// Build a client from a `[carriers.auspost]` config section.
    pub fn from_credentials(credentials: &CarrierCredentials) -> Self {
        let mut builder = Self::builder(
            credentials.api_key.clone(),
            credentials.password.clone(),
            credentials.account_number.clone(),
        );
        if let Some(base_url) = credentials.base_url.as_deref() {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Fetch and normalize the carrier's view of `identifier`.
    ///
    /// Issues exactly one GET to the track endpoint, classifies transport
    /// faults, then degrades gracefully over whichever payload shape came
    /// back. The untouched parsed payload is kept in the result's `raw`.
    pub async fn find(
        &self,
        identifier: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<TrackingDetails, TrackingError> {
        // Caller-supplied parameters may override the identifier key, but the
        // request carries each key once.
        let mut query = Vec::with_capacity(parameters.len() + 1);
        if !parameters.contains_key("tracking_ids") {
            query.push(("tracking_ids".to_string(), identifier.to_string()));
        }
        query.extend(parameters.iter().map(|(k, v)| (k.clone(), v.clone())));

        let RawResponse { status, body } = self
            .transport
            .get(TRACK_PATH, &query, &self.headers())
            .await
            .map_err(|source| TrackingError::Network {
                driver: IDENTIFIER,
                source,
            })?;

        if let Some(fault) = fault::classify_status(status, &body) {
            return Err(fault);
        }

        let json: Value =
            serde_json::from_slice(&body).map_err(|source| TrackingError::InvalidBody {
                driver: IDENTIFIER,
                source,
            })?;

        let extraction = extract::extract(&json);
        debug!(
            identifier,
            status_token = %extraction.status_token,
            shape = ?extraction.shape,
            error_token = %extraction.error_token,
            events = extraction.events.len(),
            "extracted tracking tokens"
        );

        // Rate limiting can arrive inside a 200 body; re-check before the
        // ordinary error-token override runs.
        if let Some(fault) = fault::classify_error_token(&extraction.error_token) {
            warn!(identifier, "carrier reported a rate limit inside a 200 response");
            return Err(fault);
        }

        Ok(assemble(identifier, json, extraction))
    }

    fn headers(&self) -> Vec<(String, String)> {
        let credentials = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", self.api_key, self.password),
        );
        vec![
            ("Authorization".to_string(), format!("Basic {credentials}")),
            ("Account-Number".to_string(), self.account_number.clone()),
            ("Accept".to_string(), "application/json".to_string()),
        ]
    }
}

/// Deterministic join point: given resolved tokens and events, the record is
/// fully determined. A resolvable error token overrides both the status and
/// the summary derived from the status token.
fn assemble(requested: &str, raw: Value, extraction: Extraction) -> TrackingDetails {
    let (mut status, mut summary) = tables::map_status(&extraction.status_token, extraction.shape);
    if let Some((error_status, error_summary)) = tables::map_error(&extraction.error_token) {
        status = error_status;
        summary = error_summary;
    }

    TrackingDetails {
        identifier: extraction
            .identifier
            .unwrap_or_else(|| requested.to_string()),
        status,
        summary: summary.to_string(),
        // The track endpoint reports no delivery estimate.
        estimated_delivery: None,
        events: extraction.events,
        raw,
    }
}

#[async_trait]
impl Driver for AusPostClient {
    fn name(&self) -> &'static str {
        IDENTIFIER
    }

    async fn find(
        &self,
        identifier: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<TrackingDetails, TrackingError> {
        AusPostClient::find(self, identifier, parameters).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracking_core::Status;

    use super::*;
    use crate::extract::extract;

    #[test]
    fn resolvable_error_token_overrides_status_and_summary() {
        let raw = json!({
            "tracking_results": [{
                "tracking_id": "7XX1000",
                "status": "In Transit",
                "errors": [{ "code": "ESB-20010" }],
            }]
        });

        let details = assemble("7XX1000", raw.clone(), extract(&raw));
        assert_eq!(details.status, Status::Failure);
        assert_eq!(
            details.summary,
            "System Error: An internal technical error occurred."
        );
    }

    #[test]
    fn unrecognized_error_token_leaves_the_status_mapping() {
        let raw = json!({
            "tracking_results": [{
                "status": "In Transit",
                "errors": [{ "code": "ESB-99999" }],
            }]
        });

        let details = assemble("X", raw.clone(), extract(&raw));
        assert_eq!(details.status, Status::InTransit);
        assert_eq!(
            details.summary,
            "The item or items in the shipment are being delivered."
        );
    }

    #[test]
    fn requested_identifier_is_the_fallback() {
        let raw = json!({ "tracking_results": [{ "status": "Delivered" }] });
        let details = assemble("ABC123", raw.clone(), extract(&raw));
        assert_eq!(details.identifier, "ABC123");
    }

    #[test]
    fn basic_auth_and_account_headers_are_built() {
        let client = AusPostClient::builder("abcdefg", "test", "abc123").build();
        let headers = client.headers();
        assert!(headers.contains(&(
            "Authorization".to_string(),
            "Basic YWJjZGVmZzp0ZXN0".to_string()
        )));
        assert!(headers.contains(&("Account-Number".to_string(), "abc123".to_string())));
        assert!(headers.contains(&("Accept".to_string(), "application/json".to_string())));
    }
}
