//! Overlord force state: deployed groups, buffs, custom AI.

use std::collections::HashMap;

use overlord_event::payload::{
    AiCommand, DeployGroup, GroupTarget, HpBuff, SetCustomAi, SetCustomUnitAi,
};
use overlord_event::{kinds, Request};
use overlord_types::GroupId;

/// One deployed instance of a deployment card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    /// Card this instance was deployed from.
    pub id: GroupId,
    /// 1-based deployment counter per card; never reused within a
    /// mission, so "last deployed" is the record with the highest one.
    pub instance: u32,
    /// Exhausted (already activated this round).
    pub exhausted: bool,
}

/// The mission-wide custom-AI program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAiProgram {
    /// Condition/command pairs prepended to every group's printed AI.
    pub instructions: Vec<AiCommand>,
    /// Groups the program does not apply to.
    pub exclusion: Vec<GroupId>,
}

/// Overlord-side slice of the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForcesState {
    /// Deployed group instances, in deployment order.
    pub deployed: Vec<GroupRecord>,
    /// Per-unit flat HP buffs.
    pub hp_buffs: HashMap<GroupId, i32>,
    /// Mission-wide custom-AI program, if any.
    pub custom_ai: Option<CustomAiProgram>,
    /// Per-unit custom-AI overrides.
    pub unit_ai: HashMap<GroupId, Vec<AiCommand>>,
    next_instance: HashMap<GroupId, u32>,
}

impl ForcesState {
    /// Returns the most recently deployed instance of a card.
    #[must_use]
    pub fn last_deployed(&self, id: &str) -> Option<&GroupRecord> {
        self.deployed.iter().rev().find(|g| g.id.matches_str(id))
    }

    /// Returns `true` if any instance of the card is on the board.
    #[must_use]
    pub fn is_deployed(&self, id: &str) -> bool {
        self.last_deployed(id).is_some()
    }

    /// Resolves a payload group target to an index into `deployed`.
    ///
    /// An omitted instance addresses the most recently deployed one —
    /// resolution happens here, at apply time, so scripts can target a
    /// group whose deployment request is still queued ahead of this one.
    fn resolve(&self, target: &GroupTarget) -> Option<usize> {
        match target.instance {
            Some(instance) => self
                .deployed
                .iter()
                .position(|g| g.id == target.id && g.instance == instance),
            None => self.deployed.iter().rposition(|g| g.id == target.id),
        }
    }

    pub(crate) fn apply(&mut self, req: &Request) {
        match req.kind.as_str() {
            kinds::DEPLOY_GROUP => {
                if let Ok(DeployGroup { id }) = req.parse() {
                    let counter = self.next_instance.entry(id.clone()).or_insert(0);
                    *counter += 1;
                    self.deployed.push(GroupRecord {
                        id,
                        instance: *counter,
                        exhausted: false,
                    });
                }
            }
            kinds::DEFEAT_GROUP => {
                if let Ok(target) = req.parse::<GroupTarget>() {
                    if let Some(index) = self.resolve(&target) {
                        let _ = self.deployed.remove(index);
                    }
                }
            }
            kinds::ACTIVATE_GROUP | kinds::SET_GROUP_ACTIVATED_SILENT => {
                if let Ok(target) = req.parse::<GroupTarget>() {
                    if let Some(index) = self.resolve(&target) {
                        self.deployed[index].exhausted = true;
                    }
                }
            }
            kinds::SET_GROUP_UNACTIVATED => {
                if let Ok(target) = req.parse::<GroupTarget>() {
                    if let Some(index) = self.resolve(&target) {
                        self.deployed[index].exhausted = false;
                    }
                }
            }
            kinds::SET_UNIT_HP_BUFF => {
                if let Ok(HpBuff { unit, amount }) = req.parse() {
                    let _ = self.hp_buffs.insert(unit, amount);
                }
            }
            kinds::SET_CUSTOM_AI => {
                if let Ok(SetCustomAi {
                    instructions,
                    exclusion,
                }) = req.parse()
                {
                    self.custom_ai = Some(CustomAiProgram {
                        instructions,
                        exclusion,
                    });
                }
            }
            kinds::SET_CUSTOM_UNIT_AI => {
                if let Ok(SetCustomUnitAi { unit, instructions }) = req.parse() {
                    let _ = self.unit_ai.insert(unit, instructions);
                }
            }
            kinds::CLEAR_CUSTOM_AI => {
                self.custom_ai = None;
                self.unit_ai.clear();
            }
            _ => {}
        }
    }
}
