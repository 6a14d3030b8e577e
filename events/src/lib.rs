//! Wire-payload model for the dashboard's event stream.
//!
//! Each stream message body is expected to be a JSON object carrying a
//! `type` discriminator. Decoding is deliberately tolerant: bodies that do
//! not decode into a known shape are a no-op for the consumer, never an
//! error. This crate has no dependencies on the other workspace crates.

use serde::Deserialize;

/// A single decoded message from the dashboard event stream.
///
/// Only the `type` discriminator drives behavior. `stock` and `price`
/// events also carry the affected material's id, which is decoded for
/// logging but not consulted when deciding whether to reload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Stock {
        #[serde(default)]
        material_id: Option<i64>,
    },
    Price {
        #[serde(default)]
        material_id: Option<i64>,
    },
    MaterialCreated,
    MaterialDeleted,
    Alert,
    /// Any `type` value the consumer does not recognize.
    #[serde(other)]
    Unknown,
}

impl StreamEvent {
    /// Decode a raw message body.
    ///
    /// Returns `None` for anything that is not a JSON object with a
    /// string `type` field. An empty body decodes like an empty object.
    pub fn decode(body: &str) -> Option<Self> {
        let body = if body.trim().is_empty() { "{}" } else { body };
        serde_json::from_str(body).ok()
    }

    /// Whether this event warrants a full reload of the watched page.
    ///
    /// All recognized kinds share the single reload action; there is no
    /// per-kind behavior.
    pub fn triggers_reload(&self) -> bool {
        !matches!(self, StreamEvent::Unknown)
    }

    /// Wire name of the event's `type` discriminator, for logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            StreamEvent::Stock { .. } => "stock",
            StreamEvent::Price { .. } => "price",
            StreamEvent::MaterialCreated => "material_created",
            StreamEvent::MaterialDeleted => "material_deleted",
            StreamEvent::Alert => "alert",
            StreamEvent::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_stock_with_material_id() {
        let event = StreamEvent::decode(r#"{"type":"stock","material_id":7}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Stock {
                material_id: Some(7)
            }
        );
        assert!(event.triggers_reload());
    }

    #[test]
    fn decodes_price_without_material_id() {
        let event = StreamEvent::decode(r#"{"type":"price"}"#).unwrap();
        assert_eq!(event, StreamEvent::Price { material_id: None });
    }

    #[test]
    fn decodes_unit_events() {
        for (body, expected) in [
            (r#"{"type":"material_created"}"#, StreamEvent::MaterialCreated),
            (r#"{"type":"material_deleted"}"#, StreamEvent::MaterialDeleted),
            (r#"{"type":"alert"}"#, StreamEvent::Alert),
        ] {
            let event = StreamEvent::decode(body).unwrap();
            assert_eq!(event, expected);
            assert!(event.triggers_reload());
        }
    }

    #[test]
    fn extra_fields_are_ignored() {
        let event = StreamEvent::decode(r#"{"type":"alert","level":"warning","ts":123}"#).unwrap();
        assert_eq!(event, StreamEvent::Alert);
    }

    #[test]
    fn unrecognized_type_decodes_as_unknown() {
        let event = StreamEvent::decode(r#"{"type":"heartbeat"}"#).unwrap();
        assert_eq!(event, StreamEvent::Unknown);
        assert!(!event.triggers_reload());
    }

    #[test]
    fn empty_body_carries_no_event() {
        assert_eq!(StreamEvent::decode(""), None);
        assert_eq!(StreamEvent::decode("   "), None);
    }

    #[test]
    fn malformed_bodies_decode_to_none() {
        assert_eq!(StreamEvent::decode("not json"), None);
        assert_eq!(StreamEvent::decode(r#"{"type":"stock""#), None);
        assert_eq!(StreamEvent::decode("[1,2,3]"), None);
        assert_eq!(StreamEvent::decode(r#""stock""#), None);
    }

    #[test]
    fn non_string_type_decodes_to_none() {
        assert_eq!(StreamEvent::decode(r#"{"type":123}"#), None);
        assert_eq!(StreamEvent::decode(r#"{"material_id":7}"#), None);
    }

    #[test]
    fn event_type_names_match_the_wire() {
        assert_eq!(
            StreamEvent::Stock { material_id: None }.event_type(),
            "stock"
        );
        assert_eq!(StreamEvent::MaterialCreated.event_type(), "material_created");
        assert_eq!(StreamEvent::Unknown.event_type(), "unknown");
    }
}
