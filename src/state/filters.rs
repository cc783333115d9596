use courtside_api::{Badge, Game};
use std::collections::BTreeSet;

/// The checked badge filters. Empty means "show everything".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterSet {
    checked: BTreeSet<Badge>,
}

impl FilterSet {
    pub fn new(badges: impl IntoIterator<Item = Badge>) -> Self {
        Self { checked: badges.into_iter().collect() }
    }

    /// Flip one checkbox. Returns whether it is now checked.
    pub fn toggle(&mut self, badge: Badge) -> bool {
        if self.checked.remove(&badge) {
            false
        } else {
            self.checked.insert(badge);
            true
        }
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    pub fn is_checked(&self, badge: Badge) -> bool {
        self.checked.contains(&badge)
    }

    fn contains_tag(&self, tag: &str) -> bool {
        Badge::from_tag(tag).is_some_and(|b| self.checked.contains(&b))
    }

    /// OR across the checked filters. Everything matches an empty set.
    pub fn matches(&self, game: &Game) -> bool {
        self.is_empty() || game.badges.iter().any(|tag| self.contains_tag(tag))
    }

    /// The game's badges that are also checked, in the game's own order.
    /// Nothing is shown while no filter is checked.
    pub fn visible_badges(&self, game: &Game) -> Vec<Badge> {
        let mut out = Vec::new();
        for badge in game.badges.iter().filter_map(|tag| Badge::from_tag(tag)) {
            if self.checked.contains(&badge) && !out.contains(&badge) {
                out.push(badge);
            }
        }
        out
    }
}

/// Games that pass the filter, in listing order.
pub fn compute_visible<'a>(games: &'a [Game], filters: &FilterSet) -> Vec<&'a Game> {
    games.iter().filter(|g| filters.matches(g)).collect()
}
