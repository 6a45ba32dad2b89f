//! Cooperative scenario runtime for the overlord architecture.
//!
//! A mission script is a set of concurrently running listener processes
//! watching a shared game-state store. This crate is the machinery they
//! run on:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Host process                          │
//! │   UI events, game triggers          collaborator answers     │
//! └───────────┬──────────────────────────────▲──────────────────┘
//!             │ emit(Request)                │ DecisionCollector /
//!             ▼                              │ NarrativeDisplay
//! ┌─────────────────────────────────────────┴───────────────────┐
//! │                        Scheduler                             │
//! │  ┌───────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │ pending queue │─▶│ reducer      │─▶│ waiting processes │  │
//! │  │ (FIFO)        │  │ (Reduce)     │  │ (Matcher → wake)  │  │
//! │  └───────────────┘  └──────────────┘  └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Process Vocabulary
//!
//! A process is an `async` future built over a [`Ctx`]:
//!
//! | Step | Call | Suspends |
//! |------|------|----------|
//! | wait for a matching request | [`Ctx::wait_for`] | yes |
//! | submit a request | [`Ctx::emit`] | no |
//! | read current state | [`Ctx::read`] | no |
//! | call a sub-procedure | ordinary `.await` | while it runs |
//! | start an independent process | [`Ctx::spawn`] / [`Ctx::spawn_all`] | no |
//! | ask the user | [`Ctx::ask_choice`] / [`Ctx::show_event`] | until answered |
//!
//! # Scheduling Model
//!
//! Single-threaded, run-to-quiescence, breadth-first — see the
//! [`Scheduler`] documentation for the dispatch-round contract that
//! scenario correctness rests on.
//!
//! # Crate Structure
//!
//! - [`Scheduler`], [`Ctx`], [`ProcessId`] — the process model
//! - [`Reduce`] — the store mutation contract
//! - [`DecisionCollector`], [`NarrativeDisplay`], [`Telemetry`],
//!   [`DiceRoller`], [`HostServices`] — host collaborator seams
//! - [`HostError`], [`ProcessError`] — failure taxonomy
//! - [`testing`] — scripted doubles for scenario tests

mod error;
mod host;
mod scheduler;
mod store;
pub mod testing;

pub use error::{HostError, ProcessError};
pub use host::{
    Choice, DecisionCollector, DiceRoller, EventCard, HostServices, NarrativeDisplay, StdDice,
    Telemetry,
};
pub use scheduler::{Ctx, ProcessId, Scheduler, WaitFor};
pub use store::Reduce;

// Re-exported for convenience: scripts name these in every listener.
pub use overlord_event::{Matcher, Request};
