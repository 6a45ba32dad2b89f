//! Wait predicates.

use serde_json::Value;

use crate::Request;

/// A predicate over incoming requests.
///
/// A matcher tests the request kind exactly, plus any number of
/// payload-field equality constraints. This is deliberately the whole
/// vocabulary: richer guards (range checks, cross-field conditions) belong
/// in the listener body, where they can `continue` the wait loop instead.
///
/// # Example
///
/// ```
/// use overlord_event::{kinds, requests, Matcher};
/// use overlord_types::CellId;
///
/// let terminal_hit = Matcher::kind(kinds::SET_MAP_STATE_ACTIVATED)
///     .field("kind", "terminal")
///     .field("value", true);
///
/// assert!(terminal_hit.matches(&requests::set_map_state_activated(
///     CellId::new(2),
///     "terminal",
///     true,
/// )));
/// assert!(!terminal_hit.matches(&requests::set_map_state_activated(
///     CellId::new(1),
///     "door",
///     true,
/// )));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matcher {
    kind: String,
    fields: Vec<(String, Value)>,
}

impl Matcher {
    /// Creates a matcher for one request kind.
    #[must_use]
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a payload-field equality constraint.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Returns the kind this matcher waits for.
    #[must_use]
    pub fn kind_str(&self) -> &str {
        &self.kind
    }

    /// Tests a request against the predicate.
    #[must_use]
    pub fn matches(&self, req: &Request) -> bool {
        req.kind == self.kind
            && self
                .fields
                .iter()
                .all(|(key, value)| req.field(key) == Some(value))
    }
}
