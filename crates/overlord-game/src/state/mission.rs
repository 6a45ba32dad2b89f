//! Mission-wide state: round, threat, targets, map, outcome.

use overlord_event::payload::{DeploymentPoint, MapStateChange, TargetChange, ThreatDelta, VictoryText};
use overlord_event::{kinds, Request};
use overlord_types::{CellId, MissionOutcome};
use serde::{Deserialize, Serialize};

/// One interactive object on the printed map.
///
/// `activated` means the object's once-per-mission interaction happened
/// (a door opened, a terminal destroyed); `visible` controls whether the
/// host still renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCell {
    /// Printed cell number (unique per kind, not globally).
    pub id: CellId,
    /// Cell kind: `"door"`, `"terminal"`, ...
    pub kind: String,
    /// Interaction flag.
    pub activated: bool,
    /// Render flag.
    pub visible: bool,
}

/// Seed for one map cell, as listed in a mission's setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCellSeed {
    /// Printed cell number.
    pub id: CellId,
    /// Cell kind.
    pub kind: String,
}

/// Mission-wide slice of the shared store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionState {
    /// Current round, starting at 1.
    pub round: u32,
    /// Threat pool; never negative.
    pub threat: i32,
    /// Overlord attack-target description.
    pub attack_target: String,
    /// Overlord move-target description.
    pub move_target: String,
    /// Active deployment point description.
    pub deployment_point: String,
    /// Hero-victory condition text shown on the goal panel.
    pub hero_victory: String,
    /// Interactive map objects.
    pub map: Vec<MapCell>,
    /// Terminal outcome; the first terminal request wins.
    pub outcome: Option<MissionOutcome>,
    /// Set once the scenario script has spawned its listeners.
    pub script_ready: bool,
    /// Set once special setup finished.
    pub setup_complete: bool,
    /// Number of completed end-of-round effect phases.
    pub rounds_completed: u32,
}

impl MissionState {
    pub(crate) fn new(map: Vec<MapCellSeed>, threat: i32) -> Self {
        Self {
            round: 1,
            threat: threat.max(0),
            attack_target: String::new(),
            move_target: String::new(),
            deployment_point: String::new(),
            hero_victory: String::new(),
            map: map
                .into_iter()
                .map(|seed| MapCell {
                    id: seed.id,
                    kind: seed.kind,
                    activated: false,
                    visible: true,
                })
                .collect(),
            outcome: None,
            script_ready: false,
            setup_complete: false,
            rounds_completed: 0,
        }
    }

    /// Looks up a cell by kind and printed number.
    #[must_use]
    pub fn cell(&self, kind: &str, id: CellId) -> Option<&MapCell> {
        self.map.iter().find(|c| c.kind == kind && c.id == id)
    }

    fn cell_mut(&mut self, kind: &str, id: CellId) -> Option<&mut MapCell> {
        self.map.iter_mut().find(|c| c.kind == kind && c.id == id)
    }

    pub(crate) fn apply(&mut self, req: &Request) {
        match req.kind.as_str() {
            kinds::STATUS_PHASE_ADVANCE_ROUND => self.round += 1,
            kinds::STATUS_PHASE_END_ROUND_EFFECTS_DONE => self.rounds_completed += 1,
            kinds::MISSION_SPECIAL_SETUP_DONE => self.setup_complete = true,
            kinds::MISSION_SCRIPT_READY => self.script_ready = true,
            kinds::INCREASE_THREAT => {
                if let Ok(ThreatDelta { amount }) = req.parse() {
                    self.threat = (self.threat + amount).max(0);
                }
            }
            kinds::SET_ATTACK_TARGET => {
                if let Ok(TargetChange { target }) = req.parse() {
                    self.attack_target = target;
                }
            }
            kinds::SET_MOVE_TARGET => {
                if let Ok(TargetChange { target }) = req.parse() {
                    self.move_target = target;
                }
            }
            kinds::SET_DEPLOYMENT_POINT => {
                if let Ok(DeploymentPoint { point }) = req.parse() {
                    self.deployment_point = point;
                }
            }
            kinds::UPDATE_HERO_VICTORY => {
                if let Ok(VictoryText { text }) = req.parse() {
                    self.hero_victory = text;
                }
            }
            kinds::SET_MAP_STATE_ACTIVATED => {
                if let Ok(MapStateChange { id, kind, value }) = req.parse() {
                    if let Some(cell) = self.cell_mut(&kind, id) {
                        cell.activated = value;
                    }
                }
            }
            kinds::SET_MAP_STATE_VISIBLE => {
                if let Ok(MapStateChange { id, kind, value }) = req.parse() {
                    if let Some(cell) = self.cell_mut(&kind, id) {
                        cell.visible = value;
                    }
                }
            }
            kinds::HERO_VICTORY => {
                let _ = self.outcome.get_or_insert(MissionOutcome::HeroVictory);
            }
            kinds::OVERLORD_VICTORY => {
                let _ = self.outcome.get_or_insert(MissionOutcome::OverlordVictory);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlord_event::requests;

    fn state() -> MissionState {
        MissionState::new(
            vec![
                MapCellSeed {
                    id: CellId::new(1),
                    kind: "door".into(),
                },
                MapCellSeed {
                    id: CellId::new(2),
                    kind: "terminal".into(),
                },
            ],
            4,
        )
    }

    #[test]
    fn threat_never_drops_below_zero() {
        let mut s = state();
        s.apply(&requests::increase_threat(-10));
        assert_eq!(s.threat, 0);
        s.apply(&requests::increase_threat(3));
        assert_eq!(s.threat, 3);
    }

    #[test]
    fn map_cells_are_addressed_by_kind_and_id() {
        let mut s = state();
        s.apply(&requests::set_map_state_activated(CellId::new(2), "terminal", true));
        assert!(s.cell("terminal", CellId::new(2)).unwrap().activated);
        assert!(!s.cell("door", CellId::new(1)).unwrap().activated);
        // A kind/id pair not on the map is inert.
        s.apply(&requests::set_map_state_activated(CellId::new(9), "door", true));
    }

    #[test]
    fn hiding_a_cell_is_idempotent() {
        let mut s = state();
        s.apply(&requests::set_map_state_visible(CellId::new(2), "terminal", false));
        s.apply(&requests::set_map_state_visible(CellId::new(2), "terminal", false));
        assert!(!s.cell("terminal", CellId::new(2)).unwrap().visible);
    }

    #[test]
    fn first_outcome_wins() {
        let mut s = state();
        s.apply(&requests::hero_victory());
        s.apply(&requests::overlord_victory());
        assert_eq!(s.outcome, Some(MissionOutcome::HeroVictory));
    }

    #[test]
    fn round_bookkeeping() {
        let mut s = state();
        assert_eq!(s.round, 1);
        s.apply(&requests::status_phase_advance_round());
        assert_eq!(s.round, 2);
        s.apply(&requests::status_phase_end_round_effects_done());
        assert_eq!(s.rounds_completed, 1);
    }

    #[test]
    fn unknown_kinds_are_inert() {
        let mut s = state();
        let before = s.clone();
        s.apply(&Request::new("SOMETHING_NOBODY_HANDLES"));
        assert_eq!(s, before);
    }
}
