//! Scenario scripts.
//!
//! Each mission is one module exposing an entry process plus a
//! scenario-local state slice; [`helpers`] and [`shared`] carry the
//! sub-procedures and listener loops every mission uses.

pub mod constants;
pub mod helpers;
pub mod seat_of_power;
pub mod shared;
