//! Typed payload structs.
//!
//! Reducers and scenario guards parse [`Request::parse`] into these rather
//! than walking raw JSON. Field names are the wire contract — payloads are
//! part of request identity, so renaming a field is a breaking change.
//!
//! [`Request::parse`]: crate::Request::parse

use overlord_types::{CellId, GroupId};
use serde::{Deserialize, Serialize};

/// Payload of [`SET_MAP_STATE_ACTIVATED`](crate::kinds::SET_MAP_STATE_ACTIVATED)
/// and [`SET_MAP_STATE_VISIBLE`](crate::kinds::SET_MAP_STATE_VISIBLE).
///
/// Cell ids repeat across kinds (door 1 and terminal 1 can coexist), so
/// the kind string travels with the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStateChange {
    /// Printed cell number.
    pub id: CellId,
    /// Cell kind: `"door"`, `"terminal"`, `"neutral"`, ...
    pub kind: String,
    /// New value of the changed flag.
    pub value: bool,
}

/// Payload of [`DEPLOY_GROUP`](crate::kinds::DEPLOY_GROUP).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployGroup {
    /// Deployment card to add an instance of.
    pub id: GroupId,
}

/// Payload of the group mutation kinds
/// ([`DEFEAT_GROUP`](crate::kinds::DEFEAT_GROUP),
/// [`ACTIVATE_GROUP`](crate::kinds::ACTIVATE_GROUP),
/// [`SET_GROUP_ACTIVATED_SILENT`](crate::kinds::SET_GROUP_ACTIVATED_SILENT),
/// [`SET_GROUP_UNACTIVATED`](crate::kinds::SET_GROUP_UNACTIVATED)).
///
/// With `instance` omitted the reducer resolves the most recently deployed
/// instance of the card *at apply time*. Scripts rely on that when they
/// target a group they deployed earlier in the same wake round, where the
/// deployment request is still queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTarget {
    /// Deployment card.
    pub id: GroupId,
    /// Specific instance, or `None` for the most recently deployed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<u32>,
}

/// Payload of [`SET_ATTACK_TARGET`](crate::kinds::SET_ATTACK_TARGET) and
/// [`SET_MOVE_TARGET`](crate::kinds::SET_MOVE_TARGET).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetChange {
    /// Human-readable target description shown on the overlord panel.
    pub target: String,
}

/// Payload of [`SET_DEPLOYMENT_POINT`](crate::kinds::SET_DEPLOYMENT_POINT).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPoint {
    /// Human-readable deployment point description.
    pub point: String,
}

/// Payload of [`INCREASE_THREAT`](crate::kinds::INCREASE_THREAT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatDelta {
    /// Signed change; the pool never drops below zero.
    pub amount: i32,
}

/// Payload of [`SET_UNIT_HP_BUFF`](crate::kinds::SET_UNIT_HP_BUFF).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpBuff {
    /// Unit the buff applies to.
    pub unit: GroupId,
    /// Extra health per figure.
    pub amount: i32,
}

/// Payload of [`WOUND_HERO`](crate::kinds::WOUND_HERO).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoundHero {
    /// Hero identifier from the host's roster.
    pub id: String,
}

/// Payload of [`UPDATE_HERO_VICTORY`](crate::kinds::UPDATE_HERO_VICTORY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryText {
    /// New hero-victory condition text.
    pub text: String,
}

/// One condition/command pair on a custom-AI card.
///
/// Strings carry display markup (`{ACTION}`, `{ELITE}`...) verbatim;
/// substitution belongs to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiCommand {
    /// When the command applies.
    pub condition: String,
    /// What the overlord figure does.
    pub command: String,
}

/// Payload of [`SET_CUSTOM_AI`](crate::kinds::SET_CUSTOM_AI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCustomAi {
    /// The program installed for every non-excluded group.
    pub instructions: Vec<AiCommand>,
    /// Groups that keep their printed AI (or their unit override).
    pub exclusion: Vec<GroupId>,
}

/// Payload of [`SET_CUSTOM_UNIT_AI`](crate::kinds::SET_CUSTOM_UNIT_AI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCustomUnitAi {
    /// Unit the override applies to.
    pub unit: GroupId,
    /// The override program.
    pub instructions: Vec<AiCommand>,
}
