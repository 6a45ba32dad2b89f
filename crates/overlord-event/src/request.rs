//! The request value itself.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EventError;

/// A named, immutable description of something that happened or is being
/// asked for.
///
/// Requests are the only way shared state changes and the only thing a
/// process can wait on. The kind is an UPPER_SNAKE_CASE string from
/// [`kinds`](crate::kinds) (or a scenario-local constant); the payload is
/// arbitrary JSON that typed consumers [`parse`](Self::parse) into a
/// payload struct.
///
/// # Example
///
/// ```
/// use overlord_event::{kinds, payload::ThreatDelta, Request};
/// use serde_json::json;
///
/// let req = Request::with_payload(kinds::INCREASE_THREAT, json!({ "amount": 2 }));
/// assert_eq!(req.kind, kinds::INCREASE_THREAT);
///
/// let delta: ThreatDelta = req.parse().unwrap();
/// assert_eq!(delta.amount, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Request kind, the routing key for reducers and wait predicates.
    pub kind: String,
    /// Structured payload; `Value::Null` for payload-less kinds.
    pub payload: Value,
}

impl Request {
    /// Creates a request with no payload.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
        }
    }

    /// Creates a request with a JSON payload.
    #[must_use]
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Returns `true` if this request has the given kind.
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Returns one payload field by name, if the payload is an object
    /// containing it.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Deserializes the payload into a typed payload struct.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidPayload`] when the payload does not
    /// have the expected shape. Scenario listeners normally treat that as
    /// "not the request I care about" and keep waiting rather than fail.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, EventError> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| EventError::InvalidPayload(format!("{}: {e}", self.kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        id: u32,
        value: bool,
    }

    #[test]
    fn identity_is_structural() {
        let a = Request::with_payload("X", json!({ "id": 1 }));
        let b = Request::with_payload("X", json!({ "id": 1 }));
        let c = Request::with_payload("X", json!({ "id": 2 }));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn field_reads_object_payloads() {
        let req = Request::with_payload("X", json!({ "id": 1, "value": true }));
        assert_eq!(req.field("id"), Some(&json!(1)));
        assert_eq!(req.field("missing"), None);
        assert_eq!(Request::new("Y").field("id"), None);
    }

    #[test]
    fn parse_into_typed_payload() {
        let req = Request::with_payload("X", json!({ "id": 4, "value": false }));
        let probe: Probe = req.parse().unwrap();
        assert_eq!(
            probe,
            Probe {
                id: 4,
                value: false
            }
        );
    }

    #[test]
    fn parse_failure_names_the_kind() {
        let req = Request::with_payload("BROKEN", json!({ "id": "not a number" }));
        let err = req.parse::<Probe>().unwrap_err();
        assert!(err.to_string().contains("BROKEN"));
    }
}
