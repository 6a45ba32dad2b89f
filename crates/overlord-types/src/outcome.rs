//! Terminal mission outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a mission ended.
///
/// A mission records at most one outcome; once set it never changes.
/// The store keeps the first terminal request it sees and ignores any
/// later, contradictory one.
///
/// # Example
///
/// ```
/// use overlord_types::MissionOutcome;
///
/// let outcome = MissionOutcome::HeroVictory;
/// assert!(outcome.heroes_won());
/// assert_eq!(outcome.to_string(), "hero victory");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissionOutcome {
    /// The strike team completed its objective.
    HeroVictory,
    /// The overlord stopped them.
    OverlordVictory,
}

impl MissionOutcome {
    /// Returns `true` for [`HeroVictory`](Self::HeroVictory).
    #[must_use]
    pub fn heroes_won(self) -> bool {
        matches!(self, Self::HeroVictory)
    }
}

impl fmt::Display for MissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeroVictory => f.write_str("hero victory"),
            Self::OverlordVictory => f.write_str("overlord victory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&MissionOutcome::OverlordVictory).unwrap();
        assert_eq!(json, "\"overlordVictory\"");
    }

    #[test]
    fn display_names() {
        assert_eq!(MissionOutcome::HeroVictory.to_string(), "hero victory");
        assert_eq!(MissionOutcome::OverlordVictory.to_string(), "overlord victory");
    }
}
