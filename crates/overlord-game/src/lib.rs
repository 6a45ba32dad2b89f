//! Game-state model and scenario scripts for the overlord runtime.
//!
//! This crate is the app layer on top of `overlord-runtime`:
//!
//! - [`state`] — the shared store ([`state::GameState`]) with its
//!   mission/forces/heroes slices and the core reducer, plus the
//!   [`state::ScenarioState`] seam a mission plugs its local slice into.
//! - [`missions`] — the scenario scripts. One mission is included:
//!   [`missions::seat_of_power`], the reference scenario exercising every
//!   pattern the runtime supports (one-shot and repeating listeners,
//!   inline sub-events, cross-process coordination through store flags,
//!   round-boundary resets, terminal signals).
//!
//! # Running a Mission
//!
//! ```no_run
//! use overlord_game::missions::seat_of_power::{self, SeatOfPowerGame};
//! use overlord_game::state::GameState;
//! use overlord_runtime::testing::TestHost;
//! use overlord_runtime::Scheduler;
//!
//! let host = TestHost::new(); // a real host supplies its own services
//! let setup = seat_of_power::setup(vec!["ashen".into(), "korin".into()], 6);
//! let state: SeatOfPowerGame = GameState::new(setup);
//! let mut scheduler = Scheduler::new(state, host.services());
//!
//! let ctx = scheduler.ctx();
//! scheduler.spawn("seat-of-power", seat_of_power::mission(ctx));
//! scheduler.run_until_idle();
//!
//! // The host then forwards game events as they happen:
//! scheduler.dispatch(overlord_event::requests::mission_special_setup());
//! ```

pub mod missions;
pub mod state;
