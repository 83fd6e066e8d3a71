//! Favorites slice: an insertion-ordered id list with set membership.

use crate::domain::MovieId;
use std::collections::HashSet;

/// Ordered, duplicate-free list of favorite movie ids.
///
/// The sequence preserves insertion order for display and persistence; the
/// set gives constant-time membership for toggling and badge rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesState {
    ids: Vec<MovieId>,
    members: HashSet<MovieId>,
}

impl FavoritesState {
    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[MovieId] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: MovieId) -> bool {
        self.members.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Adds the id if absent, removes it if present.
    pub(crate) fn toggle(&mut self, id: MovieId) {
        if self.members.remove(&id) {
            self.ids.retain(|existing| *existing != id);
        } else if id > 0 {
            self.members.insert(id);
            self.ids.push(id);
        }
    }

    /// Replaces the list, dropping zero ids and later duplicates.
    pub(crate) fn hydrate(&mut self, ids: &[MovieId]) {
        self.ids.clear();
        self.members.clear();
        for &id in ids {
            if id > 0 && self.members.insert(id) {
                self.ids.push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut favorites = FavoritesState::default();
        favorites.hydrate(&[3, 5]);
        let before = favorites.clone();

        favorites.toggle(7);
        assert!(favorites.contains(7));
        assert_eq!(favorites.ids(), &[3, 5, 7]);

        favorites.toggle(7);
        assert_eq!(favorites, before);
    }

    #[test]
    fn hydrate_dedupes_keeping_first_occurrence() {
        let mut favorites = FavoritesState::default();
        favorites.hydrate(&[9, 0, 4, 9, 4, 1]);
        assert_eq!(favorites.ids(), &[9, 4, 1]);
        assert_eq!(favorites.len(), 3);
    }

    #[test]
    fn zero_id_is_never_added() {
        let mut favorites = FavoritesState::default();
        favorites.toggle(0);
        assert!(favorites.is_empty());
    }
}
