//! Constructor functions for the core request kinds.
//!
//! One function per kind keeps payload shapes in a single place; scripts
//! and hosts never build payload JSON by hand.
//!
//! ```
//! use overlord_event::{kinds, requests};
//! use overlord_types::CellId;
//!
//! let req = requests::set_map_state_visible(CellId::new(2), "terminal", false);
//! assert_eq!(req.kind, kinds::SET_MAP_STATE_VISIBLE);
//! ```

use overlord_types::{CellId, GroupId};

use crate::payload::{
    AiCommand, DeployGroup, DeploymentPoint, GroupTarget, HpBuff, MapStateChange, SetCustomAi,
    SetCustomUnitAi, TargetChange, ThreatDelta, VictoryText, WoundHero,
};
use crate::{kinds, Request};

fn with<T: serde::Serialize>(kind: &str, payload: &T) -> Request {
    // Serializing our own payload structs cannot fail.
    let value = serde_json::to_value(payload).expect("payload struct serializes");
    Request::with_payload(kind, value)
}

/// Host request: run mission special setup.
#[must_use]
pub fn mission_special_setup() -> Request {
    Request::new(kinds::MISSION_SPECIAL_SETUP)
}

/// Script acknowledgement: special setup finished.
#[must_use]
pub fn mission_special_setup_done() -> Request {
    Request::new(kinds::MISSION_SPECIAL_SETUP_DONE)
}

/// Script acknowledgement: all listeners spawned.
#[must_use]
pub fn mission_script_ready() -> Request {
    Request::new(kinds::MISSION_SCRIPT_READY)
}

/// Host request: status phase opened.
#[must_use]
pub fn status_phase_begin() -> Request {
    Request::new(kinds::STATUS_PHASE_BEGIN)
}

/// Script acknowledgement: begin-of-round effects finished.
#[must_use]
pub fn status_phase_begin_done() -> Request {
    Request::new(kinds::STATUS_PHASE_BEGIN_DONE)
}

/// Host request: advance the round counter.
#[must_use]
pub fn status_phase_advance_round() -> Request {
    Request::new(kinds::STATUS_PHASE_ADVANCE_ROUND)
}

/// Host request: apply end-of-round effects.
#[must_use]
pub fn status_phase_end_round_effects() -> Request {
    Request::new(kinds::STATUS_PHASE_END_ROUND_EFFECTS)
}

/// Script acknowledgement: end-of-round effects finished.
#[must_use]
pub fn status_phase_end_round_effects_done() -> Request {
    Request::new(kinds::STATUS_PHASE_END_ROUND_EFFECTS_DONE)
}

/// A map cell's activated flag changed.
#[must_use]
pub fn set_map_state_activated(id: CellId, kind: impl Into<String>, value: bool) -> Request {
    with(
        kinds::SET_MAP_STATE_ACTIVATED,
        &MapStateChange {
            id,
            kind: kind.into(),
            value,
        },
    )
}

/// A map cell's visible flag changed.
#[must_use]
pub fn set_map_state_visible(id: CellId, kind: impl Into<String>, value: bool) -> Request {
    with(
        kinds::SET_MAP_STATE_VISIBLE,
        &MapStateChange {
            id,
            kind: kind.into(),
            value,
        },
    )
}

/// Replace the attack-target description.
#[must_use]
pub fn set_attack_target(target: impl Into<String>) -> Request {
    with(
        kinds::SET_ATTACK_TARGET,
        &TargetChange {
            target: target.into(),
        },
    )
}

/// Replace the move-target description.
#[must_use]
pub fn set_move_target(target: impl Into<String>) -> Request {
    with(
        kinds::SET_MOVE_TARGET,
        &TargetChange {
            target: target.into(),
        },
    )
}

/// Replace the active deployment point.
#[must_use]
pub fn set_deployment_point(point: impl Into<String>) -> Request {
    with(
        kinds::SET_DEPLOYMENT_POINT,
        &DeploymentPoint {
            point: point.into(),
        },
    )
}

/// Add a new instance of a deployment group.
#[must_use]
pub fn deploy_group(id: impl Into<GroupId>) -> Request {
    with(kinds::DEPLOY_GROUP, &DeployGroup { id: id.into() })
}

/// Remove the most recently deployed instance of a group.
#[must_use]
pub fn defeat_group(id: impl Into<GroupId>) -> Request {
    with(
        kinds::DEFEAT_GROUP,
        &GroupTarget {
            id: id.into(),
            instance: None,
        },
    )
}

/// Remove one specific instance of a group.
#[must_use]
pub fn defeat_group_instance(id: impl Into<GroupId>, instance: u32) -> Request {
    with(
        kinds::DEFEAT_GROUP,
        &GroupTarget {
            id: id.into(),
            instance: Some(instance),
        },
    )
}

/// A group starts its activation.
#[must_use]
pub fn activate_group(id: impl Into<GroupId>) -> Request {
    with(
        kinds::ACTIVATE_GROUP,
        &GroupTarget {
            id: id.into(),
            instance: None,
        },
    )
}

/// Exhaust the most recently deployed instance without an activation.
#[must_use]
pub fn set_group_activated_silent(id: impl Into<GroupId>) -> Request {
    with(
        kinds::SET_GROUP_ACTIVATED_SILENT,
        &GroupTarget {
            id: id.into(),
            instance: None,
        },
    )
}

/// Ready (un-exhaust) the most recently deployed instance of a group.
#[must_use]
pub fn set_group_unactivated(id: impl Into<GroupId>) -> Request {
    with(
        kinds::SET_GROUP_UNACTIVATED,
        &GroupTarget {
            id: id.into(),
            instance: None,
        },
    )
}

/// Grant a flat HP buff to a unit.
#[must_use]
pub fn set_unit_hp_buff(unit: impl Into<GroupId>, amount: i32) -> Request {
    with(
        kinds::SET_UNIT_HP_BUFF,
        &HpBuff {
            unit: unit.into(),
            amount,
        },
    )
}

/// Install the mission-wide custom-AI program.
#[must_use]
pub fn set_custom_ai(instructions: Vec<AiCommand>, exclusion: Vec<GroupId>) -> Request {
    with(
        kinds::SET_CUSTOM_AI,
        &SetCustomAi {
            instructions,
            exclusion,
        },
    )
}

/// Install a custom-AI override for one unit.
#[must_use]
pub fn set_custom_unit_ai(unit: impl Into<GroupId>, instructions: Vec<AiCommand>) -> Request {
    with(
        kinds::SET_CUSTOM_UNIT_AI,
        &SetCustomUnitAi {
            unit: unit.into(),
            instructions,
        },
    )
}

/// Remove every custom-AI program.
#[must_use]
pub fn clear_custom_ai() -> Request {
    Request::new(kinds::CLEAR_CUSTOM_AI)
}

/// A hero was wounded.
#[must_use]
pub fn wound_hero(id: impl Into<String>) -> Request {
    with(kinds::WOUND_HERO, &WoundHero { id: id.into() })
}

/// Adjust the threat pool.
#[must_use]
pub fn increase_threat(amount: i32) -> Request {
    with(kinds::INCREASE_THREAT, &ThreatDelta { amount })
}

/// Terminal signal: strike team wins.
#[must_use]
pub fn hero_victory() -> Request {
    Request::new(kinds::HERO_VICTORY)
}

/// Terminal signal: overlord wins.
#[must_use]
pub fn overlord_victory() -> Request {
    Request::new(kinds::OVERLORD_VICTORY)
}

/// Replace the hero-victory condition text.
#[must_use]
pub fn update_hero_victory(text: impl Into<String>) -> Request {
    with(kinds::UPDATE_HERO_VICTORY, &VictoryText { text: text.into() })
}
