//! The shared game-state store.
//!
//! One [`GameState`] value holds everything durable in a mission, split
//! into slices the way the requests that mutate them split:
//!
//! | Slice | Contents | Mutated by |
//! |-------|----------|------------|
//! | [`MissionState`] | round, threat, targets, map, outcome | status phase, map, targeting, threat and terminal kinds |
//! | [`ForcesState`] | deployed groups, HP buffs, custom AI | roster and custom-AI kinds |
//! | [`HeroesState`] | strike-team roster | [`WOUND_HERO`](overlord_event::kinds::WOUND_HERO) |
//! | `scenario: S` | scenario-local flags | the scenario's own kinds |
//!
//! Every request reaches every slice; each slice ignores what it does not
//! recognize, which together makes the whole reducer total.
//!
//! Scenario scripts supply their local slice through [`ScenarioState`];
//! the runtime stays scenario-generic.

mod forces;
mod heroes;
mod mission;

pub use forces::{CustomAiProgram, ForcesState, GroupRecord};
pub use heroes::{Hero, HeroesState};
pub use mission::{MapCell, MapCellSeed, MissionState};

use overlord_event::Request;
use overlord_runtime::Reduce;
use serde::Deserialize;

/// A scenario's local state slice.
///
/// Implementations reduce the scenario's own request kinds and any core
/// kinds they piggyback on (round-end resets, typically). The unit type
/// implements this for scenario-less harnesses.
pub trait ScenarioState: Default + 'static {
    /// Applies one request to the slice; unknown kinds are ignored.
    fn apply(&mut self, req: &Request);
}

impl ScenarioState for () {
    fn apply(&mut self, _req: &Request) {}
}

/// Host-supplied initial values for a mission.
///
/// `Deserialize` so hosts can keep their campaign setup in config files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MissionSetup {
    /// Strike-team roster.
    pub heroes: Vec<String>,
    /// Interactive map objects for this mission's map.
    pub map: Vec<MapCellSeed>,
    /// Starting threat (campaign threat level).
    pub threat: i32,
}

/// The full shared store for one mission.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState<S = ()> {
    /// Mission-wide slice.
    pub mission: MissionState,
    /// Overlord forces slice.
    pub forces: ForcesState,
    /// Strike-team slice.
    pub heroes: HeroesState,
    /// Scenario-local slice.
    pub scenario: S,
}

impl<S: ScenarioState> GameState<S> {
    /// Builds the initial store from the host's setup.
    #[must_use]
    pub fn new(setup: MissionSetup) -> Self {
        Self {
            mission: MissionState::new(setup.map, setup.threat),
            forces: ForcesState::default(),
            heroes: HeroesState::new(setup.heroes),
            scenario: S::default(),
        }
    }
}

impl<S: ScenarioState> Reduce for GameState<S> {
    fn apply(&mut self, req: &Request) {
        self.mission.apply(req);
        self.forces.apply(req);
        self.heroes.apply(req);
        self.scenario.apply(req);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlord_event::requests;
    use overlord_types::CellId;

    fn setup() -> MissionSetup {
        MissionSetup {
            heroes: vec!["ashen".into(), "korin".into()],
            map: vec![MapCellSeed {
                id: CellId::new(1),
                kind: "door".into(),
            }],
            threat: 2,
        }
    }

    #[test]
    fn setup_seeds_every_slice() {
        let state: GameState = GameState::new(setup());
        assert_eq!(state.mission.round, 1);
        assert_eq!(state.mission.threat, 2);
        assert_eq!(state.heroes.heroes.len(), 2);
        assert!(state.forces.deployed.is_empty());
    }

    #[test]
    fn reducer_fans_out_to_slices() {
        let mut state: GameState = GameState::new(setup());
        state.apply(&requests::deploy_group("kreel"));
        state.apply(&requests::wound_hero("ashen"));
        state.apply(&requests::increase_threat(1));
        assert!(state.forces.is_deployed("kreel"));
        assert!(state.heroes.heroes[0].wounded);
        assert_eq!(state.mission.threat, 3);
    }

    #[test]
    fn mission_setup_deserializes_from_config() {
        let parsed: MissionSetup = serde_json::from_str(
            r#"{
                "heroes": ["ashen"],
                "map": [{ "id": 1, "kind": "door" }],
                "threat": 4
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.threat, 4);
        assert_eq!(parsed.map[0].kind, "door");
    }
}
