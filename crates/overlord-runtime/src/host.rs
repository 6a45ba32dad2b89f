//! Host collaborator interfaces.
//!
//! The runtime is a library; everything user-facing lives in the host
//! process and is reached through the four traits here. All of them are
//! object-safe and bundled into a [`HostServices`] value handed to the
//! scheduler at construction, then exposed to scenario processes through
//! their [`Ctx`](crate::Ctx).
//!
//! | Trait | Suspends the caller | Fallible |
//! |-------|---------------------|----------|
//! | [`DecisionCollector`] | yes (waits on a human) | yes |
//! | [`NarrativeDisplay`] | yes (until acknowledged) | yes |
//! | [`Telemetry`] | no | no |
//! | [`DiceRoller`] | no | no |
//!
//! Futures are [`LocalBoxFuture`]: the runtime is single-threaded and
//! implementations may hold non-`Send` state freely. A suspended
//! collaborator call parks only the calling process — queued requests keep
//! dispatching while a human reads a modal.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use overlord_types::GroupId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::HostError;

/// A decision returned by the host's choice dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// The user answered yes.
    Yes,
    /// The user answered no.
    No,
    /// Any other literal the dialog offered.
    Other(String),
}

impl Choice {
    /// Returns `true` for [`Yes`](Self::Yes).
    #[must_use]
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// A titled block of narrative text for the host to display.
///
/// Text lines carry display markup (`{ELITE}`, `{DAMAGE}`, `{BREAK}`...)
/// verbatim; substitution and styling belong to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    /// Dialog title.
    pub title: String,
    /// Ordered marked-up lines.
    pub text: Vec<String>,
}

impl EventCard {
    /// Creates a card from a title and its lines.
    #[must_use]
    pub fn new<T, L>(title: T, text: L) -> Self
    where
        T: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            title: title.into(),
            text: text.into_iter().map(Into::into).collect(),
        }
    }
}

/// Collects a decision from the user.
///
/// The returned future may stay pending for arbitrarily long — it
/// represents a human looking at a dialog. Only the calling process
/// suspends.
pub trait DecisionCollector {
    /// Asks a question under a topic title and resolves to the answer.
    fn ask_choice(&self, prompt: &str, topic: &str) -> LocalBoxFuture<'_, Result<Choice, HostError>>;
}

/// Renders narrative content to the user.
pub trait NarrativeDisplay {
    /// Shows an event card; resolves once the user acknowledges it.
    fn show_event(&self, card: &EventCard) -> LocalBoxFuture<'_, Result<(), HostError>>;

    /// Shows a group's AI card (used when a figure interrupts out of
    /// turn); resolves once the user acknowledges it.
    fn show_group(&self, group: &GroupId) -> LocalBoxFuture<'_, Result<(), HostError>>;
}

/// Fire-and-forget usage analytics.
///
/// Never suspends, never fails observably.
pub trait Telemetry {
    /// Records one event.
    fn record(&self, category: &str, action: &str, label: Option<&str>);
}

/// Uniform random selection.
pub trait DiceRoller {
    /// Returns a uniformly distributed index in `0..len`.
    ///
    /// `len` is at least 1; callers validate before rolling.
    fn pick_index(&self, len: usize) -> usize;
}

/// The collaborator bundle a scheduler is constructed with.
#[derive(Clone)]
pub struct HostServices {
    /// Choice dialogs.
    pub decisions: Rc<dyn DecisionCollector>,
    /// Narrative rendering.
    pub display: Rc<dyn NarrativeDisplay>,
    /// Usage analytics.
    pub telemetry: Rc<dyn Telemetry>,
    /// Randomness source.
    pub dice: Rc<dyn DiceRoller>,
}

impl HostServices {
    /// Bundles the four collaborators.
    #[must_use]
    pub fn new(
        decisions: Rc<dyn DecisionCollector>,
        display: Rc<dyn NarrativeDisplay>,
        telemetry: Rc<dyn Telemetry>,
        dice: Rc<dyn DiceRoller>,
    ) -> Self {
        Self {
            decisions,
            display,
            telemetry,
            dice,
        }
    }
}

/// Default [`DiceRoller`] backed by [`StdRng`].
///
/// # Example
///
/// ```
/// use overlord_runtime::{DiceRoller, StdDice};
///
/// let dice = StdDice::seeded(7);
/// let roll = dice.pick_index(2);
/// assert!(roll < 2);
/// ```
pub struct StdDice {
    rng: RefCell<StdRng>,
}

impl StdDice {
    /// Creates a roller seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Creates a deterministic roller from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DiceRoller for StdDice {
    fn pick_index(&self, len: usize) -> usize {
        self.rng.borrow_mut().gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_are_reproducible() {
        let a = StdDice::seeded(42);
        let b = StdDice::seeded(42);
        let rolls_a: Vec<usize> = (0..16).map(|_| a.pick_index(6)).collect();
        let rolls_b: Vec<usize> = (0..16).map(|_| b.pick_index(6)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|&r| r < 6));
    }

    #[test]
    fn event_card_collects_lines() {
        let card = EventCard::new("Vulnerable", ["line one", "line two"]);
        assert_eq!(card.title, "Vulnerable");
        assert_eq!(card.text.len(), 2);
    }

    #[test]
    fn choice_is_yes() {
        assert!(Choice::Yes.is_yes());
        assert!(!Choice::No.is_yes());
        assert!(!Choice::Other("maybe".into()).is_yes());
    }
}
