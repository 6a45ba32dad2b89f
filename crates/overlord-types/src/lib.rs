//! Core types for the overlord scenario runtime.
//!
//! This crate provides the foundational identifier types shared by every
//! layer of the overlord architecture.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Scenario SDK Layer                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  overlord-types   : GroupId, CellId, MissionOutcome  ◄── HERE│
//! │  overlord-event   : Request, Matcher, request kinds          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Runtime Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  overlord-runtime : store, scheduler, process context        │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Game Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  overlord-game    : state slices, scenario scripts           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! Identifiers here are *authored*, not generated: a scenario script names
//! its deployment groups (`"kreel"`, `"legionnaire"`) and its map cells
//! (small integers printed on the map tiles). Newtypes keep the two
//! namespaces from mixing and give request payloads a stable serialized
//! form.
//!
//! # Example
//!
//! ```
//! use overlord_types::{CellId, GroupId};
//!
//! let kreel = GroupId::new("kreel");
//! assert_eq!(kreel.as_str(), "kreel");
//! assert_eq!(kreel.to_string(), "kreel");
//!
//! let door = CellId::new(1);
//! assert_eq!(door.get(), 1);
//! ```

mod error;
mod id;
mod outcome;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{CellId, GroupId};
pub use outcome::MissionOutcome;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_id_round_trips_through_json() {
        let id = GroupId::new("juggernaut");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"juggernaut\"");
        let back: GroupId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn cell_id_round_trips_through_json() {
        let id = CellId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: CellId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
