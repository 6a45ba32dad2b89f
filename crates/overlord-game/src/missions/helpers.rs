//! Sub-procedures shared by mission scripts.
//!
//! Each helper is an async function a listener calls to completion
//! (suspending the listener while the user reads a dialog). They are thin
//! compositions over the host collaborators plus the deploy requests that
//! go with them.

use overlord_event::requests;
use overlord_runtime::{Choice, Ctx, EventCard, ProcessError};
use overlord_types::GroupId;

use crate::state::{GameState, ScenarioState};

/// Result type of every mission process and helper.
pub type MissionResult = Result<(), ProcessError>;

/// Shows one titled event card and waits for acknowledgement.
pub async fn event_card<S: ScenarioState>(
    ctx: &Ctx<GameState<S>>,
    title: &str,
    text: &[&str],
) -> MissionResult {
    ctx.show_event(EventCard::new(title, text.iter().copied())).await?;
    Ok(())
}

/// Asks a yes/no question under a topic title.
pub async fn choice<S: ScenarioState>(
    ctx: &Ctx<GameState<S>>,
    prompt: &str,
    topic: &str,
) -> Result<Choice, ProcessError> {
    Ok(ctx.ask_choice(prompt, topic).await?)
}

/// Shows a deployment event card, then deploys the listed groups.
///
/// `groups` pairs each card id with its placement instructions; the
/// instructions render on the card, the deployments are emitted after
/// the user acknowledges it.
pub async fn deploy<S: ScenarioState>(
    ctx: &Ctx<GameState<S>>,
    title: &str,
    subtitle: &str,
    text: &[&str],
    groups: &[(&str, &str)],
) -> MissionResult {
    let mut lines: Vec<String> = text.iter().map(ToString::to_string).collect();
    lines.push(subtitle.to_string());
    for (_, instructions) in groups {
        lines.push((*instructions).to_string());
    }
    ctx.show_event(EventCard::new(title, lines)).await?;
    for (id, _) in groups {
        ctx.emit(requests::deploy_group(*id));
    }
    Ok(())
}

/// Shows the initial-deployment card and deploys the opening roster.
pub async fn initial_setup<S: ScenarioState>(
    ctx: &Ctx<GameState<S>>,
    groups: &[&str],
) -> MissionResult {
    let mut lines = vec!["Deploy the following groups to their setup areas:".to_string()];
    lines.extend(groups.iter().map(ToString::to_string));
    ctx.show_event(EventCard::new("Initial Setup", lines)).await?;
    for id in groups {
        ctx.emit(requests::deploy_group(*id));
    }
    Ok(())
}

/// Shows the mission briefing card.
pub async fn mission_briefing<S: ScenarioState>(
    ctx: &Ctx<GameState<S>>,
    text: &[&str],
) -> MissionResult {
    event_card(ctx, "Mission Briefing", text).await
}

/// Shows a group's AI card when it interrupts outside its activation.
pub async fn show_interrupted_group<S: ScenarioState>(
    ctx: &Ctx<GameState<S>>,
    id: &str,
) -> MissionResult {
    ctx.show_group(&GroupId::new(id)).await?;
    Ok(())
}
