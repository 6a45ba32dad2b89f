//! End-to-end tests for the "Seat of Power" mission script.
//!
//! Each test boots the mission on a fresh scheduler with scripted
//! collaborators, feeds it host-side requests, and asserts on the shared
//! store and the recorded host conversation.

use std::cell::Cell;
use std::rc::Rc;

use overlord_event::{kinds, requests, Matcher, Request};
use overlord_game::missions::constants::{TARGET_HERO_CLOSEST_UNWOUNDED, TARGET_REMAINING};
use overlord_game::missions::seat_of_power::{
    self, JuggernautStatus, SeatOfPowerGame, DEPLOYMENT_POINT_SOUTH, DEPLOYMENT_POINT_WEST,
    JUGGERNAUT, JUGGERNAUT_BOARDED, JUGGERNAUT_DEFENDS, KREEL, TARGET_JUGGERNAUT, TARGET_KREEL,
    TERMINAL_INTERACT,
};
use overlord_game::state::GameState;
use overlord_runtime::testing::TestHost;
use overlord_runtime::{Choice, Scheduler};
use overlord_types::{CellId, GroupId, MissionOutcome};
use serde_json::json;

const ROSTER: [&str; 4] = ["ashen", "korin", "mira", "talon"];

struct Mission {
    scheduler: Scheduler<SeatOfPowerGame>,
    host: TestHost,
}

impl Mission {
    /// Boots the mission entry process and runs it to idle.
    fn start_with(threat: i32, answers: Vec<Choice>) -> Self {
        let host = TestHost::with_answers(answers);
        let state: SeatOfPowerGame = GameState::new(seat_of_power::setup(
            ROSTER.iter().map(ToString::to_string).collect(),
            threat,
        ));
        let mut scheduler = Scheduler::new(state, host.services());
        let ctx = scheduler.ctx();
        scheduler.spawn("seat-of-power", seat_of_power::mission(ctx));
        scheduler.run_until_idle();
        Self { scheduler, host }
    }

    fn start(threat: i32) -> Self {
        Self::start_with(threat, Vec::new())
    }

    fn dispatch(&mut self, req: Request) {
        self.scheduler.dispatch(req);
    }

    /// Runs one status phase boundary: end-of-round effects for the
    /// current round, then the round counter advances.
    fn end_round(&mut self) {
        self.dispatch(requests::status_phase_end_round_effects());
        self.dispatch(requests::status_phase_advance_round());
    }

    fn state<R>(&self, select: impl FnOnce(&SeatOfPowerGame) -> R) -> R {
        self.scheduler.with_state(select)
    }

    fn outcome(&self) -> Option<MissionOutcome> {
        self.state(|s| s.mission.outcome)
    }

    fn kreel_ai_mentions(&self, needle: &str) -> bool {
        self.state(|s| {
            s.forces
                .unit_ai
                .get(&GroupId::new(KREEL))
                .map(|commands| commands.iter().any(|c| c.command.contains(needle)))
                .unwrap_or(false)
        })
    }
}

#[test]
fn boot_sets_targets_ai_and_ready() {
    let m = Mission::start(4);

    assert!(m.state(|s| s.mission.script_ready));
    assert_eq!(
        m.state(|s| s.mission.attack_target.clone()),
        TARGET_HERO_CLOSEST_UNWOUNDED
    );
    assert_eq!(m.state(|s| s.mission.move_target.clone()), TARGET_KREEL);

    let point = m.state(|s| s.mission.deployment_point.clone());
    assert!(point == DEPLOYMENT_POINT_WEST || point == DEPLOYMENT_POINT_SOUTH);

    let program = m.state(|s| s.forces.custom_ai.clone()).expect("default AI installed");
    assert!(program.exclusion.contains(&GroupId::new(KREEL)));
    assert!(program.exclusion.contains(&GroupId::new(JUGGERNAUT)));
    assert!(m.kreel_ai_mentions("hide behind the door"));

    assert!(m.host.telemetry.has("missionStart", "seatOfPower"));
}

#[test]
fn special_setup_deploys_roster_and_buffs_kreel() {
    let mut m = Mission::start(4);
    m.dispatch(requests::mission_special_setup());

    assert!(m.state(|s| s.mission.setup_complete));
    assert_eq!(m.state(|s| s.forces.deployed.len()), 6);
    assert!(m.state(|s| s.forces.is_deployed(KREEL)));
    assert_eq!(
        m.state(|s| s.forces.hp_buffs.get(&GroupId::new(KREEL)).copied()),
        Some(6)
    );
    assert_eq!(
        m.host.display.titles(),
        vec!["Initial Setup", "Initial Setup", "Mission Briefing"]
    );
}

#[test]
fn early_kreel_defeat_is_a_hero_victory() {
    let mut m = Mission::start(4);
    m.dispatch(requests::mission_special_setup());
    m.dispatch(requests::defeat_group(KREEL));

    assert_eq!(m.outcome(), Some(MissionOutcome::HeroVictory));
    assert!(m.host.telemetry.has("seatOfPower", "victory"));

    // The decision is final: even wounding the whole roster afterwards
    // cannot flip it.
    for hero in ROSTER {
        m.dispatch(requests::wound_hero(hero));
    }
    assert_eq!(m.outcome(), Some(MissionOutcome::HeroVictory));
    assert!(!m.host.telemetry.has("seatOfPower", "defeat"));
}

#[test]
fn wound_progression_retargets_then_defeats() {
    let mut m = Mission::start(4);

    m.dispatch(requests::wound_hero("ashen"));
    m.dispatch(requests::wound_hero("korin"));
    assert_eq!(m.outcome(), None);
    assert!(!m.state(|s| s.scenario.priority_target_last_hero));

    // Third wound leaves exactly one hero: sticky retarget, no terminal.
    m.dispatch(requests::wound_hero("mira"));
    assert_eq!(m.outcome(), None);
    assert!(m.state(|s| s.scenario.priority_target_last_hero));
    assert_eq!(m.state(|s| s.mission.attack_target.clone()), TARGET_REMAINING);
    assert_eq!(m.state(|s| s.mission.move_target.clone()), TARGET_REMAINING);

    // Fourth wound ends it.
    m.dispatch(requests::wound_hero("talon"));
    assert_eq!(m.outcome(), Some(MissionOutcome::OverlordVictory));
    assert!(m.host.telemetry.has("seatOfPower", "defeat"));
}

#[test]
fn wounding_the_same_hero_twice_does_not_count_two() {
    let mut m = Mission::start(4);
    for _ in 0..4 {
        m.dispatch(requests::wound_hero("ashen"));
    }
    assert_eq!(m.outcome(), None);
    assert!(!m.state(|s| s.scenario.priority_target_last_hero));
}

#[test]
fn round_two_vulnerability_yes_branch_deploys_the_juggernaut() {
    let mut m = Mission::start_with(4, vec![Choice::Yes]);
    m.dispatch(requests::mission_special_setup());

    m.end_round();
    assert!(!m.state(|s| s.scenario.juggernaut.is_deployed()));

    m.end_round();
    assert_eq!(m.state(|s| s.scenario.juggernaut), JuggernautStatus::Deployed);
    // Deployed exhausted: it takes no turn the round it arrives.
    assert!(m.state(|s| s.forces.last_deployed(JUGGERNAUT).expect("deployed").exhausted));
    assert!(m.kreel_ai_mentions("board"));
    assert!(m.host.telemetry.has("seatOfPower", "vulnerable"));
    // Yes branch: recovery text, no interrupted AI card.
    assert!(m
        .host
        .display
        .cards()
        .iter()
        .any(|c| c.text.iter().any(|l| l.contains("recovers"))));
    assert!(m.host.display.shown_groups().is_empty());
}

#[test]
fn round_two_vulnerability_no_branch_also_deploys() {
    let mut m = Mission::start_with(4, vec![Choice::No]);
    m.dispatch(requests::mission_special_setup());

    m.end_round();
    m.end_round();

    assert_eq!(m.state(|s| s.scenario.juggernaut), JuggernautStatus::Deployed);
    assert!(m.kreel_ai_mentions("board"));
    assert!(m.host.telemetry.has("seatOfPower", "vulnerable"));
    // No branch: Kreel interrupts and his AI card is shown.
    assert!(m
        .host
        .display
        .cards()
        .iter()
        .any(|c| c.text.iter().any(|l| l.contains("interrupts"))));
    assert_eq!(m.host.display.shown_groups(), vec![GroupId::new(KREEL)]);
}

#[test]
fn uncrewed_juggernaut_is_exhausted_every_round() {
    let mut m = Mission::start_with(4, vec![Choice::Yes]);
    m.dispatch(requests::mission_special_setup());
    m.end_round();
    m.end_round();

    // Ready it manually, then close another round: the script exhausts
    // it again because it is deployed but not crewed.
    m.dispatch(requests::set_group_unactivated(JUGGERNAUT));
    assert!(!m.state(|s| s.forces.last_deployed(JUGGERNAUT).expect("deployed").exhausted));
    m.end_round();
    assert!(m.state(|s| s.forces.last_deployed(JUGGERNAUT).expect("deployed").exhausted));
}

#[test]
fn boarding_retargets_the_mission_without_a_false_victory() {
    let mut m = Mission::start_with(6, vec![Choice::Yes]);
    m.dispatch(requests::mission_special_setup());
    m.end_round();
    m.end_round();

    m.dispatch(Request::new(JUGGERNAUT_BOARDED));

    // Kreel's scripted removal is not a mission-ending defeat.
    assert_eq!(m.outcome(), None);
    assert!(!m.state(|s| s.forces.is_deployed(KREEL)));
    assert_eq!(m.state(|s| s.scenario.juggernaut), JuggernautStatus::Active);
    assert!(!m.state(|s| s.forces.last_deployed(JUGGERNAUT).expect("deployed").exhausted));
    assert_eq!(
        m.state(|s| s.mission.hero_victory.clone()),
        "When the Juggernaut is defeated"
    );
    assert_eq!(m.state(|s| s.mission.move_target.clone()), TARGET_JUGGERNAUT);
    assert!(m.host.telemetry.has("seatOfPower", "invulnerable"));

    // Now the Juggernaut is the live figure.
    m.dispatch(requests::defeat_group(JUGGERNAUT));
    assert_eq!(m.outcome(), Some(MissionOutcome::HeroVictory));
}

#[test]
fn juggernaut_destroyed_before_boarding_reverts_kreel() {
    let mut m = Mission::start_with(4, vec![Choice::Yes]);
    m.dispatch(requests::mission_special_setup());
    m.end_round();
    m.end_round();

    m.dispatch(requests::defeat_group(JUGGERNAUT));

    assert_eq!(m.outcome(), None);
    assert!(m.kreel_ai_mentions("Field Orders"));
    // Kreel himself still ends the mission.
    m.dispatch(requests::defeat_group(KREEL));
    assert_eq!(m.outcome(), Some(MissionOutcome::HeroVictory));
}

#[test]
fn door_opening_before_deployment_gives_kreel_field_behavior() {
    let mut m = Mission::start(4);
    // A terminal activation is not the door.
    m.dispatch(requests::set_map_state_activated(CellId::new(2), "terminal", true));
    assert!(m.kreel_ai_mentions("hide behind the door"));

    m.dispatch(requests::set_map_state_activated(CellId::new(1), "door", true));
    assert!(m.kreel_ai_mentions("Field Orders"));
}

#[test]
fn door_opening_after_deployment_sends_kreel_to_the_juggernaut() {
    let mut m = Mission::start_with(4, vec![Choice::Yes]);
    m.dispatch(requests::mission_special_setup());
    m.end_round();
    m.end_round();

    m.dispatch(requests::set_map_state_activated(CellId::new(1), "door", true));
    assert!(m.kreel_ai_mentions("board"));
}

#[test]
fn defense_boost_needs_two_threat() {
    let mut m = Mission::start(1);
    m.dispatch(Request::new(JUGGERNAUT_DEFENDS));
    assert_eq!(m.state(|s| s.mission.threat), 1);
    assert!(m
        .host
        .display
        .cards()
        .iter()
        .any(|c| c.text.iter().any(|l| l.contains("not enough threat"))));

    let mut m = Mission::start(5);
    m.dispatch(Request::new(JUGGERNAUT_DEFENDS));
    assert_eq!(m.state(|s| s.mission.threat), 3);
    assert!(m
        .host
        .display
        .cards()
        .iter()
        .any(|c| c.text.iter().any(|l| l.contains("+3 {BLOCK}"))));
}

#[test]
fn terminal_destroyed_hides_the_cell_idempotently() {
    let mut m = Mission::start(4);
    m.dispatch(requests::set_map_state_activated(CellId::new(2), "terminal", true));
    assert!(!m.state(|s| s.mission.cell("terminal", CellId::new(2)).unwrap().visible));

    m.dispatch(requests::set_map_state_activated(CellId::new(2), "terminal", true));
    assert!(!m.state(|s| s.mission.cell("terminal", CellId::new(2)).unwrap().visible));

    // The other terminal and the door are untouched.
    assert!(m.state(|s| s.mission.cell("terminal", CellId::new(3)).unwrap().visible));
    assert!(m.state(|s| s.mission.cell("door", CellId::new(1)).unwrap().visible));
}

#[test]
fn terminal_interact_trades_custom_ai_for_threat() {
    let mut m = Mission::start(0);
    m.dispatch(Request::new(TERMINAL_INTERACT));

    assert_eq!(m.state(|s| s.mission.threat), 2);
    assert!(m.state(|s| s.forces.custom_ai.is_none()));
    assert!(m.state(|s| s.forces.unit_ai.is_empty()));
    assert!(m.state(|s| s.scenario.terminal_used_this_round));

    // The round boundary restores the default program and the flag.
    m.end_round();
    let program = m.state(|s| s.forces.custom_ai.clone()).expect("program restored");
    assert!(program.instructions.iter().any(|c| c.command.contains("terminal")));
    assert!(program.exclusion.contains(&GroupId::new(KREEL)));
    assert!(!m.state(|s| s.scenario.terminal_used_this_round));
}

#[test]
fn juggernaut_repairs_when_threat_allows() {
    let mut m = Mission::start(5);
    m.host.decisions.push_answer(Choice::Yes);
    m.dispatch(requests::activate_group(JUGGERNAUT));

    assert_eq!(m.state(|s| s.mission.threat), 3);
    let asked = m.host.decisions.asked();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].0, "The Juggernaut");
}

#[test]
fn juggernaut_repair_declined_keeps_threat() {
    let mut m = Mission::start(5);
    m.host.decisions.push_answer(Choice::No);
    m.dispatch(requests::activate_group(JUGGERNAUT));
    assert_eq!(m.state(|s| s.mission.threat), 5);
}

#[test]
fn repair_listener_retires_when_threat_is_low() {
    let mut m = Mission::start(1);
    m.dispatch(requests::activate_group(JUGGERNAUT));
    assert!(m.host.decisions.asked().is_empty());

    // Even with threat restored, the listener is gone for the mission.
    m.dispatch(requests::increase_threat(4));
    m.host.decisions.push_answer(Choice::Yes);
    m.dispatch(requests::activate_group(JUGGERNAUT));
    assert!(m.host.decisions.asked().is_empty());
    assert_eq!(m.state(|s| s.mission.threat), 5);
}

#[test]
fn other_group_activations_do_not_wake_the_repair_listener() {
    let mut m = Mission::start(5);
    m.dispatch(requests::mission_special_setup());
    m.dispatch(requests::activate_group("legionnaire"));
    assert!(m.host.decisions.asked().is_empty());
}

#[test]
fn unmatched_requests_are_inert() {
    let mut m = Mission::start(4);
    m.dispatch(requests::mission_special_setup());

    let before = m.state(Clone::clone);
    m.dispatch(Request::new("SOME_OTHER_MISSION_EVENT"));
    m.dispatch(Request::with_payload("ANOTHER_UNKNOWN", json!({ "id": 1, "value": true })));
    assert_eq!(m.state(Clone::clone), before);
}

#[test]
fn every_round_end_completes_exactly_once_and_reshuffles_the_breach() {
    // Crossing round 2 triggers the vulnerability prompt.
    let mut m = Mission::start_with(4, vec![Choice::Yes]);

    m.end_round();
    assert_eq!(m.state(|s| s.mission.rounds_completed), 1);
    // LoadedDice with no rolls always picks the first candidate.
    assert_eq!(m.state(|s| s.mission.deployment_point.clone()), DEPLOYMENT_POINT_WEST);

    m.host.dice.push_roll(1);
    m.end_round();
    assert_eq!(m.state(|s| s.mission.rounds_completed), 2);
    assert_eq!(m.state(|s| s.mission.deployment_point.clone()), DEPLOYMENT_POINT_SOUTH);

    // The default program survives every boundary.
    let program = m.state(|s| s.forces.custom_ai.clone()).expect("program present");
    assert_eq!(program.exclusion.len(), 4);
}

#[test]
fn status_phase_begin_is_acknowledged() {
    let mut m = Mission::start(4);

    let acks = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&acks);
    let ctx = m.scheduler.ctx();
    m.scheduler.spawn("begin-ack-spy", async move {
        loop {
            ctx.wait_for(Matcher::kind(kinds::STATUS_PHASE_BEGIN_DONE)).await;
            counter.set(counter.get() + 1);
        }
    });
    m.scheduler.run_until_idle();

    m.dispatch(requests::status_phase_begin());
    assert_eq!(acks.get(), 1);
    m.dispatch(requests::status_phase_begin());
    assert_eq!(acks.get(), 2);
}
