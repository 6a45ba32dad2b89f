//! Strike-team state.

use overlord_event::payload::WoundHero;
use overlord_event::{kinds, Request};

/// One hero on the strike team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    /// Host-assigned hero identifier.
    pub id: String,
    /// Wounded heroes are out of the fight for targeting purposes.
    pub wounded: bool,
}

/// Hero-side slice of the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeroesState {
    /// The roster, as configured by the host at setup.
    pub heroes: Vec<Hero>,
}

impl HeroesState {
    pub(crate) fn new(ids: Vec<String>) -> Self {
        Self {
            heroes: ids
                .into_iter()
                .map(|id| Hero { id, wounded: false })
                .collect(),
        }
    }

    /// Returns `true` when every hero on a non-empty roster is wounded.
    #[must_use]
    pub fn all_wounded(&self) -> bool {
        !self.heroes.is_empty() && self.heroes.iter().all(|h| h.wounded)
    }

    /// Returns `true` when exactly one hero is still unwounded.
    #[must_use]
    pub fn one_hero_left(&self) -> bool {
        self.heroes.iter().filter(|h| !h.wounded).count() == 1
    }

    pub(crate) fn apply(&mut self, req: &Request) {
        if req.kind == kinds::WOUND_HERO {
            if let Ok(WoundHero { id }) = req.parse() {
                if let Some(hero) = self.heroes.iter_mut().find(|h| h.id == id) {
                    hero.wounded = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlord_event::requests;

    fn roster() -> HeroesState {
        HeroesState::new(vec!["ashen".into(), "korin".into(), "mira".into()])
    }

    #[test]
    fn wounding_is_per_hero_and_idempotent() {
        let mut h = roster();
        h.apply(&requests::wound_hero("ashen"));
        h.apply(&requests::wound_hero("ashen"));
        assert!(h.heroes[0].wounded);
        assert!(!h.all_wounded());
        assert!(!h.one_hero_left());
    }

    #[test]
    fn one_left_then_all_wounded() {
        let mut h = roster();
        h.apply(&requests::wound_hero("ashen"));
        h.apply(&requests::wound_hero("korin"));
        assert!(h.one_hero_left());
        assert!(!h.all_wounded());
        h.apply(&requests::wound_hero("mira"));
        assert!(h.all_wounded());
        assert!(!h.one_hero_left());
    }

    #[test]
    fn unknown_hero_is_inert() {
        let mut h = roster();
        let before = h.clone();
        h.apply(&requests::wound_hero("nobody"));
        assert_eq!(h, before);
    }

    #[test]
    fn empty_roster_is_never_all_wounded() {
        let h = HeroesState::default();
        assert!(!h.all_wounded());
    }
}
