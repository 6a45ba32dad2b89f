//! Core request-kind constants.
//!
//! These are the kinds every mission shares: phase bookkeeping, map and
//! roster mutations, targeting, threat, and the two terminal signals.
//! Scenario-local kinds (a mission's own flags and custom triggers) are
//! declared next to the scenario script, prefixed with the mission name.
//!
//! # Categories
//!
//! | Group | Kinds |
//! |-------|-------|
//! | Lifecycle | [`MISSION_SPECIAL_SETUP`], [`MISSION_SPECIAL_SETUP_DONE`], [`MISSION_SCRIPT_READY`] |
//! | Status phase | [`STATUS_PHASE_BEGIN`], [`STATUS_PHASE_BEGIN_DONE`], [`STATUS_PHASE_ADVANCE_ROUND`], [`STATUS_PHASE_END_ROUND_EFFECTS`], [`STATUS_PHASE_END_ROUND_EFFECTS_DONE`] |
//! | Map | [`SET_MAP_STATE_ACTIVATED`], [`SET_MAP_STATE_VISIBLE`] |
//! | Targeting | [`SET_ATTACK_TARGET`], [`SET_MOVE_TARGET`], [`SET_DEPLOYMENT_POINT`] |
//! | Roster | [`DEPLOY_GROUP`], [`DEFEAT_GROUP`], [`ACTIVATE_GROUP`], [`SET_GROUP_ACTIVATED_SILENT`], [`SET_GROUP_UNACTIVATED`], [`SET_UNIT_HP_BUFF`] |
//! | Custom AI | [`SET_CUSTOM_AI`], [`SET_CUSTOM_UNIT_AI`], [`CLEAR_CUSTOM_AI`] |
//! | Heroes | [`WOUND_HERO`] |
//! | Threat | [`INCREASE_THREAT`] |
//! | Terminal | [`HERO_VICTORY`], [`OVERLORD_VICTORY`], [`UPDATE_HERO_VICTORY`] |

/// Host asks the mission script to run its special setup.
pub const MISSION_SPECIAL_SETUP: &str = "MISSION_SPECIAL_SETUP";
/// Script finished special setup; the host may start round 1.
pub const MISSION_SPECIAL_SETUP_DONE: &str = "MISSION_SPECIAL_SETUP_DONE";
/// Script entry process has spawned all listeners.
pub const MISSION_SCRIPT_READY: &str = "MISSION_SCRIPT_READY";

/// Status phase opened; scripts run begin-of-round effects.
pub const STATUS_PHASE_BEGIN: &str = "STATUS_PHASE_BEGIN";
/// Begin-of-round effects finished.
pub const STATUS_PHASE_BEGIN_DONE: &str = "STATUS_PHASE_BEGIN_DONE";
/// Advance the round counter by one.
pub const STATUS_PHASE_ADVANCE_ROUND: &str = "STATUS_PHASE_ADVANCE_ROUND";
/// Status phase is applying end-of-round effects; scripts react.
pub const STATUS_PHASE_END_ROUND_EFFECTS: &str = "STATUS_PHASE_END_ROUND_EFFECTS";
/// End-of-round effects finished; the host may close the round.
pub const STATUS_PHASE_END_ROUND_EFFECTS_DONE: &str = "STATUS_PHASE_END_ROUND_EFFECTS_DONE";

/// A map cell's activated flag changed (door opened, terminal attacked...).
/// Payload: [`payload::MapStateChange`](crate::payload::MapStateChange).
pub const SET_MAP_STATE_ACTIVATED: &str = "SET_MAP_STATE_ACTIVATED";
/// A map cell's visible flag changed. Payload:
/// [`payload::MapStateChange`](crate::payload::MapStateChange).
pub const SET_MAP_STATE_VISIBLE: &str = "SET_MAP_STATE_VISIBLE";

/// Replace the overlord's attack-target description.
pub const SET_ATTACK_TARGET: &str = "SET_ATTACK_TARGET";
/// Replace the overlord's move-target description.
pub const SET_MOVE_TARGET: &str = "SET_MOVE_TARGET";
/// Replace the active deployment point.
pub const SET_DEPLOYMENT_POINT: &str = "SET_DEPLOYMENT_POINT";

/// Add a new instance of a deployment group to the board.
pub const DEPLOY_GROUP: &str = "DEPLOY_GROUP";
/// Remove a group instance from the board. Payload:
/// [`payload::GroupTarget`](crate::payload::GroupTarget); an omitted
/// instance means the most recently deployed one.
pub const DEFEAT_GROUP: &str = "DEFEAT_GROUP";
/// A group starts its activation (and becomes exhausted).
pub const ACTIVATE_GROUP: &str = "ACTIVATE_GROUP";
/// Exhaust a group without an activation (skips its turn). Reduces like
/// [`ACTIVATE_GROUP`] but scripts listening for activations do not wake.
pub const SET_GROUP_ACTIVATED_SILENT: &str = "SET_GROUP_ACTIVATED_SILENT";
/// Ready (un-exhaust) a group.
pub const SET_GROUP_UNACTIVATED: &str = "SET_GROUP_UNACTIVATED";
/// Grant a flat HP buff to every figure of a unit.
pub const SET_UNIT_HP_BUFF: &str = "SET_UNIT_HP_BUFF";

/// Install the mission-wide custom-AI program and its exclusion list.
pub const SET_CUSTOM_AI: &str = "SET_CUSTOM_AI";
/// Install a custom-AI program for one unit.
pub const SET_CUSTOM_UNIT_AI: &str = "SET_CUSTOM_UNIT_AI";
/// Remove every custom-AI program, mission-wide and per-unit.
pub const CLEAR_CUSTOM_AI: &str = "CLEAR_CUSTOM_AI";

/// A hero was wounded.
pub const WOUND_HERO: &str = "WOUND_HERO";

/// Adjust the threat pool by a signed amount (floored at zero).
pub const INCREASE_THREAT: &str = "INCREASE_THREAT";

/// Terminal signal: the strike team wins the mission.
pub const HERO_VICTORY: &str = "HERO_VICTORY";
/// Terminal signal: the overlord wins the mission.
pub const OVERLORD_VICTORY: &str = "OVERLORD_VICTORY";
/// Replace the displayed hero-victory condition text.
pub const UPDATE_HERO_VICTORY: &str = "UPDATE_HERO_VICTORY";
