//! Request types for the overlord scenario runtime.
//!
//! Everything that happens in a mission — a hero opening a door, the status
//! phase ending, the script granting threat — is described by a [`Request`]:
//! a named, immutable value that both mutates the shared store and wakes the
//! scenario processes waiting on it.
//!
//! # Crate Architecture
//!
//! This crate is part of the **Scenario SDK** layer:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Scenario SDK Layer                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  overlord-types   : GroupId, CellId, MissionOutcome          │
//! │  overlord-event   : Request, Matcher, kinds  ◄── HERE        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! ```text
//! Host (UI / game engine)          Scenario processes
//!         │ emit                           │ emit
//!         ▼                                ▼
//! ┌──────────────────────────────────────────────────┐
//! │                 pending queue (FIFO)             │
//! └──────────────────────────────────────────────────┘
//!         │ one request per dispatch round
//!         ▼
//!   reducer applies mutation
//!         │
//!         ▼
//!   every waiting process whose Matcher matches resumes
//! ```
//!
//! # Identity
//!
//! Request identity is structural: two requests with the same kind and the
//! same payload are the same request. There is no id, timestamp or source
//! attached.
//!
//! ```
//! use overlord_event::requests;
//!
//! assert_eq!(requests::increase_threat(2), requests::increase_threat(2));
//! assert_ne!(requests::increase_threat(2), requests::increase_threat(3));
//! ```
//!
//! # Unknown Kinds
//!
//! A request whose kind no reducer arm and no waiting predicate recognizes
//! is inert: state is unchanged and nothing wakes. This is by contract, not
//! an error — hosts may emit kinds a given scenario never looks at.
//!
//! # Crate Structure
//!
//! - [`Request`] — kind + JSON payload
//! - [`kinds`] — core request-kind constants
//! - [`payload`] — typed payload structs the reducer and scripts parse into
//! - [`requests`] — constructor functions for every core request
//! - [`Matcher`] — wait predicates (kind match + payload-field equality)
//! - [`EventError`] — payload parsing errors

mod error;
pub mod kinds;
mod matcher;
pub mod payload;
mod request;
pub mod requests;

pub use error::EventError;
pub use matcher::Matcher;
pub use request::Request;
