//! Identifier types for the overlord runtime.
//!
//! All identifiers are authored by the scenario: group ids are the names on
//! deployment cards, cell ids are the numbers printed on map tiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a deployment group (one card's worth of figures).
///
/// A group id names the *card*, not an instance: the same card can be
/// deployed several times over a mission, so store records pair a
/// `GroupId` with an instance counter. Scenario scripts compare ids
/// against string literals, which [`matches_str`](Self::matches_str)
/// makes cheap.
///
/// # Example
///
/// ```
/// use overlord_types::GroupId;
///
/// let id = GroupId::new("legionnaire");
/// assert!(id.matches_str("legionnaire"));
/// assert!(!id.matches_str("legionnaireElite"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a group id from a card name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the card name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this id names the given card.
    #[must_use]
    pub fn matches_str(&self, name: &str) -> bool {
        self.0 == name
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Identifier for an interactive map cell (door, terminal, crate, ...).
///
/// Cell ids are the small integers printed next to the object tokens on
/// the printed map, so they are unique per mission only in combination
/// with the cell kind — the map can have door 1 and terminal 1.
///
/// # Example
///
/// ```
/// use overlord_types::CellId;
///
/// let door = CellId::new(1);
/// assert_eq!(door.get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(u32);

impl CellId {
    /// Creates a cell id from its printed number.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the printed number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_id_display_is_bare_name() {
        assert_eq!(GroupId::new("kreel").to_string(), "kreel");
    }

    #[test]
    fn group_id_from_str() {
        let id: GroupId = "houseGuard".into();
        assert_eq!(id.as_str(), "houseGuard");
    }

    #[test]
    fn cell_id_ordering_follows_printed_number() {
        assert!(CellId::new(1) < CellId::new(2));
    }
}
