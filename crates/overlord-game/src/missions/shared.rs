//! Listener loops every mission runs.

use overlord_event::{kinds, requests, Matcher};
use overlord_runtime::Ctx;

use super::helpers::MissionResult;
use crate::state::{GameState, ScenarioState};

/// Acknowledges each status-phase opening.
///
/// Missions with begin-of-round effects replace this with their own
/// handler; the acknowledgement itself is mandatory — the host waits for
/// it before offering activations.
pub async fn handle_status_phase_begin<S: ScenarioState>(ctx: Ctx<GameState<S>>) -> MissionResult {
    loop {
        ctx.wait_for(Matcher::kind(kinds::STATUS_PHASE_BEGIN)).await;
        ctx.emit(requests::status_phase_begin_done());
    }
}
