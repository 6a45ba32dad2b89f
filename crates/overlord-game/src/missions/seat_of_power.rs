//! The "Seat of Power" mission script.
//!
//! Overseer Kreel holds the war room behind a locked door; the strike
//! team has to bring him down. At the end of round 2 the Juggernaut war
//! machine is wheeled in, and once Kreel boards it the hunt changes
//! target. Terminals feed the overlord threat until they are destroyed.
//!
//! Priority-target progression, encoded by the listeners rather than a
//! single arbiter:
//!
//! 1. Initially, attack the closest unwounded hero; move toward Kreel.
//! 2. At the end of round 2, the move target becomes the Juggernaut once
//!    it is deployed.
//! 3. At any point, if all heroes but one are wounded, both targets lock
//!    onto that hero for the rest of the mission.

use futures::FutureExt;
use overlord_event::payload::{AiCommand, GroupTarget, MapStateChange};
use overlord_event::{kinds, requests, Matcher, Request};
use overlord_runtime::Ctx;
use overlord_types::{CellId, GroupId};
use serde_json::{json, Value};
use tracing::info;

use super::constants::{REFER_MISSION_GUIDE, TARGET_HERO_CLOSEST_UNWOUNDED, TARGET_REMAINING};
use super::helpers::{self, MissionResult};
use super::shared;
use crate::state::{GameState, ScenarioState};

/// The store type this mission runs against.
pub type SeatOfPowerGame = GameState<SeatOfPowerState>;

type MissionCtx = Ctx<SeatOfPowerGame>;

// Group ids

/// Overseer Kreel's deployment card.
pub const KREEL: &str = "kreel";
/// The Juggernaut's deployment card.
pub const JUGGERNAUT: &str = "juggernaut";

// Mission-local request kinds

/// Kreel boarded the Juggernaut (host-emitted when he interacts with it).
pub const JUGGERNAUT_BOARDED: &str = "SEAT_OF_POWER_JUGGERNAUT_BOARDED";
/// The Juggernaut is defending an attack (host-emitted).
pub const JUGGERNAUT_DEFENDS: &str = "SEAT_OF_POWER_JUGGERNAUT_DEFENDS";
/// An overlord figure interacted with a terminal (host-emitted).
pub const TERMINAL_INTERACT: &str = "SEAT_OF_POWER_TERMINAL_INTERACT";
/// Script-emitted: the Juggernaut is on the board.
pub const SET_JUGGERNAUT_DEPLOYED: &str = "SEAT_OF_POWER_SET_JUGGERNAUT_DEPLOYED";
/// Script-emitted: the Juggernaut is crewed and acts as the live figure.
pub const SET_JUGGERNAUT_ACTIVE: &str = "SEAT_OF_POWER_SET_JUGGERNAUT_ACTIVE";
/// Script-emitted: lock both targets onto the last hero.
pub const PRIORITY_TARGET_LAST_HERO: &str = "SEAT_OF_POWER_PRIORITY_TARGET_LAST_HERO";

// Figures and places

/// Move-target text while Kreel is the live figure.
pub const TARGET_KREEL: &str = "Overseer Kreel";
/// Move-target text once the Juggernaut is crewed.
pub const TARGET_JUGGERNAUT: &str = "the Juggernaut";

/// Western deployment point text.
pub const DEPLOYMENT_POINT_WEST: &str = "The western breach deployment point";
/// Southern deployment point text.
pub const DEPLOYMENT_POINT_SOUTH: &str = "The southern breach deployment point";

/// The war-room door's printed number.
const WAR_ROOM_DOOR: CellId = CellId::new(1);

const TRACK_CATEGORY: &str = "seatOfPower";

// Custom AI programs

fn terminal_ai() -> Vec<AiCommand> {
    vec![AiCommand {
        command: "{ACTION} Move to be adjacent to the terminal and {ACTION} Interact with the terminal.".into(),
        condition: "If within distance to a terminal or adjacent to a terminal (and one has not been used this round)".into(),
    }]
}

fn kreel_hold_war_room_ai() -> Vec<AiCommand> {
    vec![AiCommand {
        command: "{ACTION} Stay put and hide behind the door.".into(),
        condition: "If the door out of the War Room has not yet been opened".into(),
    }]
}

fn kreel_board_juggernaut_ai() -> Vec<AiCommand> {
    vec![
        AiCommand {
            command: "{ACTION} Move until adjacent to the door, then {ACTION} Open the door, then {ACTION} Move towards the {ELITE}Juggernaut{END}.".into(),
            condition: "If the door out of the War Room is still closed".into(),
        },
        AiCommand {
            command: "{ACTION} Move until adjacent to the {ELITE}Juggernaut{END}, then {ACTION} Move until adjacent to the {ELITE}Juggernaut{END}, then {ACTION} Interact with the {ELITE}Juggernaut{END} to board it.".into(),
            condition: "If the {ELITE}Juggernaut{END} is deployed".into(),
        },
    ]
}

fn kreel_regular_ai() -> Vec<AiCommand> {
    vec![
        AiCommand {
            command: "{ACTION} Use the Field Orders ability on that friendly figure to have it attack {ATTACK_TARGET}.".into(),
            condition: "If within 2 spaces of a friendly figure that is within attack range and LOS of {ATTACK_TARGET}".into(),
        },
        AiCommand {
            command: "{ACTION} Move to be within 4 spaces and LOS of {ATTACK_TARGET}, then {ACTION} Attack {ATTACK_TARGET}, then {ACTION} Move adjacent to the most friendly figures.".into(),
            condition: "If within 6 spaces and in LOS of {ATTACK_TARGET}".into(),
        },
        AiCommand {
            command: "Use the Take Cover ability if a rolled die does not cancel anything.".into(),
            condition: "Reaction - If defending while adjacent to a friendly figure".into(),
        },
    ]
}

fn ai_exclusion_list() -> Vec<GroupId> {
    ["ravager", "ravagerElite", KREEL, JUGGERNAUT]
        .into_iter()
        .map(GroupId::new)
        .collect()
}

// Scenario-local state

/// Where the Juggernaut is in its lifecycle.
///
/// A single tagged value instead of separate deployed/active booleans:
/// "active but never deployed" cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JuggernautStatus {
    /// Not on the board yet.
    #[default]
    Undeployed,
    /// On the board, uncrewed; it can be attacked but not activate.
    Deployed,
    /// Crewed by Kreel; it is now the live named figure.
    Active,
}

impl JuggernautStatus {
    /// On the board (crewed or not).
    #[must_use]
    pub fn is_deployed(self) -> bool {
        !matches!(self, Self::Undeployed)
    }

    /// Crewed and acting.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Mission-local slice of the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeatOfPowerState {
    /// Juggernaut lifecycle.
    pub juggernaut: JuggernautStatus,
    /// Sticky last-hero targeting lock; never cleared once set.
    pub priority_target_last_hero: bool,
    /// A terminal has been used this round (cleared at round end).
    pub terminal_used_this_round: bool,
}

fn flag_value(req: &Request) -> bool {
    req.field("value").and_then(Value::as_bool).unwrap_or(false)
}

impl ScenarioState for SeatOfPowerState {
    fn apply(&mut self, req: &Request) {
        match req.kind.as_str() {
            SET_JUGGERNAUT_DEPLOYED => {
                if flag_value(req) {
                    if self.juggernaut == JuggernautStatus::Undeployed {
                        self.juggernaut = JuggernautStatus::Deployed;
                    }
                } else if self.juggernaut == JuggernautStatus::Deployed {
                    self.juggernaut = JuggernautStatus::Undeployed;
                }
            }
            SET_JUGGERNAUT_ACTIVE => {
                if flag_value(req) {
                    self.juggernaut = JuggernautStatus::Active;
                } else if self.juggernaut == JuggernautStatus::Active {
                    self.juggernaut = JuggernautStatus::Deployed;
                }
            }
            PRIORITY_TARGET_LAST_HERO => {
                self.priority_target_last_hero = flag_value(req);
            }
            TERMINAL_INTERACT => self.terminal_used_this_round = true,
            // Round boundary: terminals become usable again.
            kinds::STATUS_PHASE_END_ROUND_EFFECTS => self.terminal_used_this_round = false,
            _ => {}
        }
    }
}

fn set_juggernaut_deployed(value: bool) -> Request {
    Request::with_payload(SET_JUGGERNAUT_DEPLOYED, json!({ "value": value }))
}

fn set_juggernaut_active(value: bool) -> Request {
    Request::with_payload(SET_JUGGERNAUT_ACTIVE, json!({ "value": value }))
}

fn priority_target_last_hero(value: bool) -> Request {
    Request::with_payload(PRIORITY_TARGET_LAST_HERO, json!({ "value": value }))
}

// Selectors

/// Goal-panel text for the host, reflecting the Juggernaut's status.
#[must_use]
pub fn goal_text(state: &SeatOfPowerGame) -> Vec<String> {
    let mut goals: Vec<String> = Vec::new();

    if !state.scenario.juggernaut.is_active() {
        goals.extend(
            [
                "{BOLD}Door:{END}",
                "Locked to heroes. A hero can interact (2 {STRENGTH} or {TECH}) to open it.",
                "{BREAK}",
                "{BOLD}Kreel:{END}",
                "Gains +6 Health, +1 Speed, +2 {DAMAGE} to attack, and +1 {BLOCK} to defense.",
                "{BREAK}",
            ]
            .map(String::from),
        );
    }

    goals.extend(
        [
            "{BOLD}Terminals:{END}",
            "A hero can attack a terminal to destroy it (Health: 8, Defense: 1 {BLOCK}).",
            "{BREAK}",
            "An overlord figure can interact to increase the threat by 2. Each terminal can be used {BOLD}once per round{END}.",
        ]
        .map(String::from),
    );

    goals
}

/// Setup values for this mission's map.
#[must_use]
pub fn setup(heroes: Vec<String>, threat: i32) -> crate::state::MissionSetup {
    use crate::state::MapCellSeed;
    crate::state::MissionSetup {
        heroes,
        map: vec![
            MapCellSeed {
                id: WAR_ROOM_DOOR,
                kind: "door".into(),
            },
            MapCellSeed {
                id: CellId::new(2),
                kind: "terminal".into(),
            },
            MapCellSeed {
                id: CellId::new(3),
                kind: "terminal".into(),
            },
        ],
        threat,
    }
}

// Listener processes

fn random_deployment_point(ctx: &MissionCtx) -> &'static str {
    ctx.pick(&[DEPLOYMENT_POINT_WEST, DEPLOYMENT_POINT_SOUTH])
}

/// One-shot: once the war-room door opens, Kreel leaves cover.
async fn watch_war_room_door(ctx: MissionCtx) -> MissionResult {
    loop {
        let req = ctx.wait_for(Matcher::kind(kinds::SET_MAP_STATE_ACTIVATED)).await;
        let Ok(change) = req.parse::<MapStateChange>() else {
            continue;
        };
        if change.id == WAR_ROOM_DOOR && change.kind == "door" && change.value {
            // If the Juggernaut is already waiting, head for it; otherwise
            // fall back to ordinary field behavior.
            if ctx.read(|s| s.scenario.juggernaut.is_deployed()) {
                ctx.emit(requests::set_custom_unit_ai(KREEL, kreel_board_juggernaut_ai()));
            } else {
                ctx.emit(requests::set_custom_unit_ai(KREEL, kreel_regular_ai()));
            }
            break;
        }
    }
    Ok(())
}

/// Round-2 interrupt, run inline by the round-end handler.
async fn vulnerable_event(ctx: &MissionCtx) -> MissionResult {
    ctx.track(TRACK_CATEGORY, "vulnerable", Some("triggered"));
    helpers::deploy(
        ctx,
        "Vulnerable",
        REFER_MISSION_GUIDE,
        &[
            "Deploy the {ELITE}Juggernaut{END} to the red points, touching the base with all points.",
            "The {ELITE}Juggernaut{END} cannot activate but can still be attacked.",
            "{ELITE}Kreel{END} can interact with the {ELITE}Juggernaut{END} to board it.",
        ],
        &[(JUGGERNAUT, "Deploy to the red points, touching the base with all points.")],
    )
    .await?;

    let answer = helpers::choice(ctx, "Has {ELITE}Kreel{END} taken any damage?", "Vulnerable").await?;
    if answer.is_yes() {
        helpers::event_card(
            ctx,
            "Vulnerable",
            &[
                "{ELITE}Kreel{END} recovers up to 5 {DAMAGE} and gains 3 movement points.",
                "Move {ELITE}Kreel{END} closer to the {ELITE}Juggernaut{END}.",
            ],
        )
        .await?;
    } else {
        helpers::event_card(
            ctx,
            "Vulnerable",
            &[
                "{ELITE}Kreel{END} interrupts to perform 2 attacks.",
                "His AI card will now be displayed.",
            ],
        )
        .await?;
        helpers::show_interrupted_group(ctx, KREEL).await?;
    }

    // Exhaust the fresh Juggernaut so it does not take a turn this round.
    // Last-instance addressing: its deployment request is still queued.
    ctx.emit(requests::set_group_activated_silent(JUGGERNAUT));
    ctx.emit(set_juggernaut_deployed(true));
    // Kreel wants to board now.
    ctx.emit(requests::set_custom_unit_ai(KREEL, kreel_board_juggernaut_ai()));
    Ok(())
}

/// Repeating until terminal: watches named-figure defeats.
async fn watch_defeats(ctx: MissionCtx) -> MissionResult {
    loop {
        let req = ctx.wait_for(Matcher::kind(kinds::DEFEAT_GROUP)).await;
        // The mission is already decided; never emit a second terminal.
        if ctx.read(|s| s.mission.outcome.is_some()) {
            break;
        }
        let Ok(target) = req.parse::<GroupTarget>() else {
            continue;
        };
        let status = ctx.read(|s| s.scenario.juggernaut);
        let live_figure_down = (!status.is_active() && target.id.matches_str(KREEL))
            || (status.is_active() && target.id.matches_str(JUGGERNAUT));
        if live_figure_down {
            ctx.emit(requests::hero_victory());
            ctx.track(TRACK_CATEGORY, "victory", Some(target.id.as_str()));
            break;
        } else if !status.is_active()
            && status.is_deployed()
            && target.id.matches_str(JUGGERNAUT)
        {
            // The machine was destroyed before Kreel could board; he has
            // nothing to run to anymore.
            ctx.emit(requests::set_custom_unit_ai(KREEL, kreel_regular_ai()));
        }
    }
    Ok(())
}

/// One-shot: Kreel boards the Juggernaut and the mission retargets.
async fn watch_juggernaut_boarded(ctx: MissionCtx) -> MissionResult {
    ctx.wait_for(Matcher::kind(JUGGERNAUT_BOARDED)).await;

    ctx.track(TRACK_CATEGORY, "invulnerable", Some("triggered"));

    // The active flag is queued ahead of the defeat below, so removing
    // Kreel here cannot read as a mission-ending defeat.
    ctx.emit(set_juggernaut_active(true));
    ctx.emit(requests::defeat_group(KREEL));

    helpers::event_card(
        &ctx,
        "Invulnerable",
        &[
            "Remove {ELITE}Kreel{END} from the game along with his deployment card.",
            "The {ELITE}Juggernaut{END} repairs 5 {DAMAGE} and gains 3 movement points.",
            "If any heroes with only {MELEE} attacks are adjacent to the {ELITE}Juggernaut{END}, use those points to move away from them.",
            "Otherwise, use those points to move within 4 spaces of the nearest hero.",
            "The {ELITE}Juggernaut{END} now activates as normal. It cannot leave the vehicle bay.",
        ],
    )
    .await?;

    // It was exhausted on deployment; give it its activations back.
    ctx.emit(requests::set_group_unactivated(JUGGERNAUT));
    ctx.emit(requests::update_hero_victory("When the Juggernaut is defeated"));
    ctx.emit(requests::set_move_target(TARGET_JUGGERNAUT));
    Ok(())
}

/// Repeating: the Juggernaut spends threat to brace when defending.
async fn watch_juggernaut_defends(ctx: MissionCtx) -> MissionResult {
    loop {
        ctx.wait_for(Matcher::kind(JUGGERNAUT_DEFENDS)).await;

        let threat = ctx.read(|s| s.mission.threat);
        if threat < 2 {
            helpers::event_card(
                &ctx,
                "The Juggernaut",
                &["There is not enough threat for the {ELITE}Juggernaut{END} to draw on."],
            )
            .await?;
        } else {
            helpers::event_card(
                &ctx,
                "The Juggernaut",
                &["Two threat was spent to give the {ELITE}Juggernaut{END} +3 {BLOCK} while defending."],
            )
            .await?;
            ctx.emit(requests::increase_threat(-2));
        }
    }
}

/// Repeating while threat allows: field repairs on activation.
async fn watch_juggernaut_activation(ctx: MissionCtx) -> MissionResult {
    loop {
        let req = ctx.wait_for(Matcher::kind(kinds::ACTIVATE_GROUP)).await;
        let Ok(target) = req.parse::<GroupTarget>() else {
            continue;
        };
        if target.id.matches_str(JUGGERNAUT) {
            let threat = ctx.read(|s| s.mission.threat);
            if threat < 2 {
                return Ok(());
            }

            let answer = helpers::choice(
                &ctx,
                "Has the {ELITE}Juggernaut{END} taken at least 4 {DAMAGE}?",
                "The Juggernaut",
            )
            .await?;
            if answer.is_yes() {
                helpers::event_card(
                    &ctx,
                    "The Juggernaut",
                    &["Two threat was spent to repair the {ELITE}Juggernaut{END} for 5 {DAMAGE}."],
                )
                .await?;
                ctx.emit(requests::increase_threat(-2));
            }
        }
    }
}

/// Repeating: destroyed terminals disappear from the map.
async fn watch_terminal_destroyed(ctx: MissionCtx) -> MissionResult {
    loop {
        let req = ctx.wait_for(Matcher::kind(kinds::SET_MAP_STATE_ACTIVATED)).await;
        let Ok(change) = req.parse::<MapStateChange>() else {
            continue;
        };
        if change.kind == "terminal" && change.value {
            ctx.emit(requests::set_map_state_visible(change.id, "terminal", false));
        }
    }
}

/// Repeating: an overlord figure uses a terminal for threat.
async fn watch_terminal_interact(ctx: MissionCtx) -> MissionResult {
    loop {
        ctx.wait_for(Matcher::kind(TERMINAL_INTERACT)).await;
        ctx.emit(requests::clear_custom_ai());
        helpers::event_card(&ctx, "Seat of Power", &["The threat has been increased by 2."]).await?;
        ctx.emit(requests::increase_threat(2));
    }
}

/// Repeating until terminal: tracks hero wounds for defeat and
/// last-hero targeting.
async fn watch_heroes_wounded(ctx: MissionCtx) -> MissionResult {
    loop {
        ctx.wait_for(Matcher::kind(kinds::WOUND_HERO)).await;
        // The mission is already decided; never emit a second terminal.
        if ctx.read(|s| s.mission.outcome.is_some()) {
            break;
        }
        if ctx.read(|s| s.heroes.all_wounded()) {
            ctx.emit(requests::overlord_victory());
            ctx.track(TRACK_CATEGORY, "defeat", Some("wounded"));
            break;
        }
        if ctx.read(|s| s.heroes.one_hero_left()) {
            // Sticky for the rest of the mission.
            ctx.emit(priority_target_last_hero(true));
            ctx.emit(requests::set_attack_target(TARGET_REMAINING));
            ctx.emit(requests::set_move_target(TARGET_REMAINING));
        }
    }
    Ok(())
}

/// Required every round: end-of-round effects.
async fn handle_round_end(ctx: MissionCtx) -> MissionResult {
    loop {
        ctx.wait_for(Matcher::kind(kinds::STATUS_PHASE_END_ROUND_EFFECTS)).await;
        let round = ctx.read(|s| s.mission.round);

        if round == 2 {
            vulnerable_event(&ctx).await?;
        }

        // A deployed-but-uncrewed Juggernaut never takes a turn.
        let status = ctx.read(|s| s.scenario.juggernaut);
        if status.is_deployed() && !status.is_active() {
            ctx.emit(requests::set_group_activated_silent(JUGGERNAUT));
        }

        // Restore the terminal program in case something cleared it.
        ctx.emit(requests::set_custom_ai(terminal_ai(), ai_exclusion_list()));

        // The breach shifts every round.
        ctx.emit(requests::set_deployment_point(random_deployment_point(&ctx)));

        ctx.emit(requests::status_phase_end_round_effects_done());
    }
}

/// Required once: special setup.
async fn handle_special_setup(ctx: MissionCtx) -> MissionResult {
    ctx.wait_for(Matcher::kind(kinds::MISSION_SPECIAL_SETUP)).await;
    helpers::event_card(
        &ctx,
        "Initial Setup",
        &[
            "Initial deployment of troops will now occur.",
            "When deploying {ELITE}Kreel{END}, deploy an {ELITE}Elite Taskmaster{END}.",
        ],
    )
    .await?;
    helpers::initial_setup(
        &ctx,
        &[
            "taskmaster",
            KREEL,
            "sentryDrone",
            "houseGuard",
            "legionnaire",
            "legionnaireElite",
        ],
    )
    .await?;
    helpers::mission_briefing(
        &ctx,
        &[
            "The {ELITE}Elite Taskmaster{END} is {ELITE}Kreel{END}. He has +6 Health and +1 Speed. He gets +2 {DAMAGE} to attack and +1 {BLOCK} to defense.",
            "An overlord figure can interact with a terminal to increase threat by 2 once per round.",
            "The door is locked to heroes. A hero can interact with it (2 {STRENGTH} or {TECH}) to open it.",
            "A hero can attack a terminal (Health: 8, Defense: 1 {BLOCK}) to destroy it.",
        ],
    )
    .await?;
    ctx.emit(requests::set_unit_hp_buff(KREEL, 6));
    ctx.emit(requests::mission_special_setup_done());
    Ok(())
}

/// Mission entry process: initial targeting, then the listener set.
pub async fn mission(ctx: MissionCtx) -> MissionResult {
    ctx.emit(requests::set_attack_target(TARGET_HERO_CLOSEST_UNWOUNDED));
    ctx.emit(requests::set_move_target(TARGET_KREEL));
    ctx.emit(requests::set_deployment_point(random_deployment_point(&ctx)));

    ctx.emit(requests::set_custom_ai(terminal_ai(), ai_exclusion_list()));
    ctx.emit(requests::set_custom_unit_ai(KREEL, kreel_hold_war_room_ai()));

    ctx.spawn_all(vec![
        ("special-setup", handle_special_setup(ctx.clone()).boxed_local()),
        ("war-room-door", watch_war_room_door(ctx.clone()).boxed_local()),
        ("named-defeats", watch_defeats(ctx.clone()).boxed_local()),
        ("juggernaut-boarded", watch_juggernaut_boarded(ctx.clone()).boxed_local()),
        ("juggernaut-defends", watch_juggernaut_defends(ctx.clone()).boxed_local()),
        ("juggernaut-activation", watch_juggernaut_activation(ctx.clone()).boxed_local()),
        ("terminal-destroyed", watch_terminal_destroyed(ctx.clone()).boxed_local()),
        ("terminal-interact", watch_terminal_interact(ctx.clone()).boxed_local()),
        ("heroes-wounded", watch_heroes_wounded(ctx.clone()).boxed_local()),
        ("status-phase-begin", shared::handle_status_phase_begin(ctx.clone()).boxed_local()),
        ("round-end", handle_round_end(ctx.clone()).boxed_local()),
    ]);

    ctx.track("missionStart", TRACK_CATEGORY, None);
    info!(mission = TRACK_CATEGORY, "mission script ready");
    ctx.emit(requests::mission_script_ready());
    Ok(())
}
