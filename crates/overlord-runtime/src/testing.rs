//! Scripted collaborator doubles for scenario tests.
//!
//! Everything here resolves immediately and records what it was asked, so
//! a test can drive a whole mission synchronously and then assert on the
//! conversation:
//!
//! ```
//! use overlord_runtime::testing::TestHost;
//! use overlord_runtime::Choice;
//!
//! let host = TestHost::with_answers([Choice::Yes]);
//! let _services = host.services(); // hand this to Scheduler::new
//! // ... run the mission ...
//! assert!(host.display.cards().is_empty());
//! ```
//!
//! These doubles live in a regular (non-`cfg(test)`) module so downstream
//! scenario crates can use them from their integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use overlord_types::GroupId;

use crate::error::HostError;
use crate::host::{
    Choice, DecisionCollector, DiceRoller, EventCard, HostServices, NarrativeDisplay, Telemetry,
};

/// [`DecisionCollector`] double that replays a queue of answers.
///
/// Every question is logged as `(topic, prompt)`. Asking with the queue
/// empty fails the call (and thereby the asking process) — a test that
/// under-scripts its answers should fail loudly, not hang.
#[derive(Default)]
pub struct ScriptedDecisions {
    answers: RefCell<VecDeque<Choice>>,
    asked: RefCell<Vec<(String, String)>>,
}

impl ScriptedDecisions {
    /// Creates a double with no scripted answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a double that answers from the queue, in order.
    #[must_use]
    pub fn with_answers(answers: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Appends another scripted answer.
    pub fn push_answer(&self, answer: Choice) {
        self.answers.borrow_mut().push_back(answer);
    }

    /// Returns every `(topic, prompt)` pair asked so far.
    #[must_use]
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.borrow().clone()
    }
}

impl DecisionCollector for ScriptedDecisions {
    fn ask_choice(&self, prompt: &str, topic: &str) -> LocalBoxFuture<'_, Result<Choice, HostError>> {
        self.asked
            .borrow_mut()
            .push((topic.to_string(), prompt.to_string()));
        let result = self
            .answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| HostError::Failed(format!("no scripted answer left for {topic:?}")));
        futures::future::ready(result).boxed_local()
    }
}

/// [`NarrativeDisplay`] double that records cards and acknowledges
/// instantly.
#[derive(Default)]
pub struct RecordingDisplay {
    cards: RefCell<Vec<EventCard>>,
    groups: RefCell<Vec<GroupId>>,
}

impl RecordingDisplay {
    /// Creates an empty recording display.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every card shown so far.
    #[must_use]
    pub fn cards(&self) -> Vec<EventCard> {
        self.cards.borrow().clone()
    }

    /// Returns the titles shown so far, in order.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.cards.borrow().iter().map(|c| c.title.clone()).collect()
    }

    /// Returns every group whose AI card was shown.
    #[must_use]
    pub fn shown_groups(&self) -> Vec<GroupId> {
        self.groups.borrow().clone()
    }
}

impl NarrativeDisplay for RecordingDisplay {
    fn show_event(&self, card: &EventCard) -> LocalBoxFuture<'_, Result<(), HostError>> {
        self.cards.borrow_mut().push(card.clone());
        futures::future::ready(Ok(())).boxed_local()
    }

    fn show_group(&self, group: &GroupId) -> LocalBoxFuture<'_, Result<(), HostError>> {
        self.groups.borrow_mut().push(group.clone());
        futures::future::ready(Ok(())).boxed_local()
    }
}

/// One recorded telemetry event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryRecord {
    /// Event category.
    pub category: String,
    /// Event action.
    pub action: String,
    /// Optional label.
    pub label: Option<String>,
}

/// [`Telemetry`] double that records every event.
#[derive(Default)]
pub struct RecordingTelemetry {
    entries: RefCell<Vec<TelemetryRecord>>,
}

impl RecordingTelemetry {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event.
    #[must_use]
    pub fn entries(&self) -> Vec<TelemetryRecord> {
        self.entries.borrow().clone()
    }

    /// Returns `true` if a `(category, action)` pair was recorded.
    #[must_use]
    pub fn has(&self, category: &str, action: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.category == category && e.action == action)
    }
}

impl Telemetry for RecordingTelemetry {
    fn record(&self, category: &str, action: &str, label: Option<&str>) {
        self.entries.borrow_mut().push(TelemetryRecord {
            category: category.to_string(),
            action: action.to_string(),
            label: label.map(ToString::to_string),
        });
    }
}

/// [`DiceRoller`] double that replays loaded rolls, then returns 0.
#[derive(Default)]
pub struct LoadedDice {
    rolls: RefCell<VecDeque<usize>>,
}

impl LoadedDice {
    /// Creates dice that always roll 0 (first candidate).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates dice that replay the given rolls, then roll 0.
    #[must_use]
    pub fn with_rolls(rolls: impl IntoIterator<Item = usize>) -> Self {
        Self {
            rolls: RefCell::new(rolls.into_iter().collect()),
        }
    }

    /// Appends another loaded roll.
    pub fn push_roll(&self, roll: usize) {
        self.rolls.borrow_mut().push_back(roll);
    }
}

impl DiceRoller for LoadedDice {
    fn pick_index(&self, len: usize) -> usize {
        let roll = self.rolls.borrow_mut().pop_front().unwrap_or(0);
        roll.min(len.saturating_sub(1))
    }
}

/// The full collaborator bundle for a test, with the concrete doubles
/// kept accessible for assertions.
pub struct TestHost {
    /// Choice dialog double.
    pub decisions: Rc<ScriptedDecisions>,
    /// Display double.
    pub display: Rc<RecordingDisplay>,
    /// Telemetry double.
    pub telemetry: Rc<RecordingTelemetry>,
    /// Dice double.
    pub dice: Rc<LoadedDice>,
}

impl TestHost {
    /// A host with no scripted answers and always-zero dice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_answers([])
    }

    /// A host whose choice dialog replays `answers`.
    #[must_use]
    pub fn with_answers(answers: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            decisions: Rc::new(ScriptedDecisions::with_answers(answers)),
            display: Rc::new(RecordingDisplay::new()),
            telemetry: Rc::new(RecordingTelemetry::new()),
            dice: Rc::new(LoadedDice::new()),
        }
    }

    /// Bundles the doubles into scheduler services.
    #[must_use]
    pub fn services(&self) -> HostServices {
        HostServices::new(
            Rc::clone(&self.decisions) as Rc<dyn DecisionCollector>,
            Rc::clone(&self.display) as Rc<dyn NarrativeDisplay>,
            Rc::clone(&self.telemetry) as Rc<dyn Telemetry>,
            Rc::clone(&self.dice) as Rc<dyn DiceRoller>,
        )
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}
