use chrono::DateTime;
use serde_json::Value;
use tracking_core::TrackingEvent;

use crate::tables::PayloadShape;

pub(crate) const UNKNOWN_TOKEN: &str = "unknown";

/// Everything pulled out of one carrier payload before mapping runs.
///
/// Extraction never fails: a missing or empty `tracking_results` collection
/// yields the `"unknown"` tokens, no events, and no carrier identifier.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Extraction {
    /// Lower-cased status token, `"unknown"` when no shape resolved.
    pub status_token: String,
    /// Which payload shape produced the status token.
    pub shape: Option<PayloadShape>,
    /// Lower-cased error token, `"unknown"` when absent.
    pub error_token: String,
    pub events: Vec<TrackingEvent>,
    /// `tracking_results[0].tracking_id`, when the carrier reports one.
    pub identifier: Option<String>,
}

type StatusProbe = fn(&Value) -> Option<&str>;

/// Shape matchers in carrier-format precedence order; the first probe that
/// yields a non-empty value wins.
const STATUS_PROBES: &[(PayloadShape, StatusProbe)] = &[
    (PayloadShape::FlatShipment, probe_flat),
    (PayloadShape::Consignment, probe_consignment),
    (PayloadShape::NestedItem, probe_nested_item),
];

fn probe_flat(result: &Value) -> Option<&str> {
    result.get("status").and_then(Value::as_str)
}

fn probe_consignment(result: &Value) -> Option<&str> {
    result
        .get("consignment")
        .and_then(|consignment| consignment.get("status"))
        .and_then(Value::as_str)
}

fn probe_nested_item(result: &Value) -> Option<&str> {
    result
        .get("trackable_items")
        .and_then(|items| items.get(0))
        .and_then(|item| item.get("items"))
        .and_then(|nested| nested.get(0))
        .and_then(|nested| nested.get("status"))
        .and_then(Value::as_str)
}

pub(crate) fn extract(body: &Value) -> Extraction {
    let result = body.get("tracking_results").and_then(|results| results.get(0));

    let (status_token, shape) = match result {
        Some(result) => status_token(result),
        None => (UNKNOWN_TOKEN.to_string(), None),
    };

    // Some fault payloads carry `errors` at the top level with no
    // `tracking_results` at all; fall back to the body root in that case.
    let error_token = error_token(result.unwrap_or(body));

    Extraction {
        status_token,
        shape,
        error_token,
        events: events(result),
        identifier: result
            .and_then(|result| result.get("tracking_id"))
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn status_token(result: &Value) -> (String, Option<PayloadShape>) {
    for (shape, probe) in STATUS_PROBES {
        if let Some(token) = probe(result).filter(|token| !token.trim().is_empty()) {
            return (token.to_lowercase(), Some(*shape));
        }
    }
    (UNKNOWN_TOKEN.to_string(), None)
}

fn error_token(container: &Value) -> String {
    let code = container
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|first| {
            first
                .get("code")
                .and_then(Value::as_str)
                .or_else(|| first.get("error_code").and_then(Value::as_str))
        })
        .filter(|code| !code.trim().is_empty());

    match code {
        Some(code) => code.to_lowercase(),
        None => UNKNOWN_TOKEN.to_string(),
    }
}

fn events(result: Option<&Value>) -> Vec<TrackingEvent> {
    let Some(events) = result
        .and_then(|result| result.get("trackable_items"))
        .and_then(|items| items.get(0))
        .and_then(|item| item.get("events"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    events.iter().map(event_from_value).collect()
}

/// Missing fields degrade rather than fail; an unparseable date becomes a
/// `None` timestamp.
fn event_from_value(raw: &Value) -> TrackingEvent {
    TrackingEvent {
        location: raw
            .get("location")
            .and_then(Value::as_str)
            .map(str::to_string),
        description: raw
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        timestamp: raw
            .get("date")
            .and_then(Value::as_str)
            .and_then(|date| DateTime::parse_from_rfc3339(date).ok()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flat_status_takes_precedence() {
        let body = json!({
            "tracking_results": [{
                "tracking_id": "7XX1000634011427",
                "status": "Delivered",
                "consignment": { "status": "Delivered in Full" },
            }]
        });

        let extraction = extract(&body);
        assert_eq!(extraction.status_token, "delivered");
        assert_eq!(extraction.shape, Some(PayloadShape::FlatShipment));
        assert_eq!(extraction.identifier.as_deref(), Some("7XX1000634011427"));
    }

    #[test]
    fn consignment_status_is_the_first_fallback() {
        let body = json!({
            "tracking_results": [{
                "consignment": { "status": "Delivered in Full" },
                "trackable_items": [{ "items": [{ "status": "Delivered" }] }],
            }]
        });

        let extraction = extract(&body);
        assert_eq!(extraction.status_token, "delivered in full");
        assert_eq!(extraction.shape, Some(PayloadShape::Consignment));
    }

    #[test]
    fn nested_item_status_is_the_last_fallback() {
        let body = json!({
            "tracking_results": [{
                "trackable_items": [{
                    "consignment_id": "33XXX0123456",
                    "items": [{ "status": "Delivered" }],
                }]
            }]
        });

        let extraction = extract(&body);
        assert_eq!(extraction.status_token, "delivered");
        assert_eq!(extraction.shape, Some(PayloadShape::NestedItem));
    }

    #[test]
    fn empty_status_fields_are_skipped() {
        let body = json!({
            "tracking_results": [{
                "status": "  ",
                "consignment": { "status": "Delivered in Full" },
            }]
        });

        let extraction = extract(&body);
        assert_eq!(extraction.status_token, "delivered in full");
    }

    #[test]
    fn missing_result_collection_degrades_to_defaults() {
        for body in [json!({}), json!({ "tracking_results": [] })] {
            let extraction = extract(&body);
            assert_eq!(extraction.status_token, UNKNOWN_TOKEN);
            assert_eq!(extraction.shape, None);
            assert_eq!(extraction.error_token, UNKNOWN_TOKEN);
            assert!(extraction.events.is_empty());
            assert_eq!(extraction.identifier, None);
        }
    }

    #[test]
    fn error_code_prefers_code_over_error_code() {
        let body = json!({
            "tracking_results": [{
                "errors": [{ "code": "ESB-10001", "error_code": "API_002" }]
            }]
        });
        assert_eq!(extract(&body).error_token, "esb-10001");

        let body = json!({
            "tracking_results": [{
                "errors": [{ "error_code": "API_002" }]
            }]
        });
        assert_eq!(extract(&body).error_token, "api_002");
    }

    #[test]
    fn top_level_errors_are_read_when_results_are_absent() {
        let body = json!({
            "errors": [{ "message": "Too many requests", "error_code": "API_002" }]
        });
        assert_eq!(extract(&body).error_token, "api_002");
    }

    #[test]
    fn events_preserve_carrier_order_and_parse_dates() {
        let body = json!({
            "tracking_results": [{
                "status": "Delivered",
                "trackable_items": [{
                    "events": [
                        {
                            "location": "ALEXANDRIA NSW",
                            "description": "Delivered",
                            "date": "2014-05-30T14:43:09+10:00"
                        },
                        {
                            "description": "Shipping information approved by Australia Post",
                            "date": "2014-05-23T14:27:15+10:00"
                        },
                        { "description": "No date on this one", "date": "not a date" }
                    ]
                }]
            }]
        });

        let events = extract(&body).events;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].location.as_deref(), Some("ALEXANDRIA NSW"));
        assert_eq!(events[0].description, "Delivered");
        assert!(events[0].timestamp.is_some());
        assert_eq!(events[1].location, None);
        assert!(events[1].timestamp.is_some());
        assert_eq!(events[2].timestamp, None);
    }
}
