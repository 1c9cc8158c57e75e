//! Play order: the sequence actually traversed by next/previous
//!
//! Either the catalog in its own order, or a shuffled permutation of it with
//! the current track pinned at index 0. Always a permutation of the catalog.

use crate::shuffle::shuffle_pinned;
use gaane_core::{Catalog, Track, TrackId};
use rand::Rng;

/// Traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Ordered view of the catalog used for traversal
#[derive(Debug, Clone, Default)]
pub struct PlayOrder {
    tracks: Vec<Track>,
    shuffled: bool,
}

impl PlayOrder {
    /// Linear order over `catalog`
    pub fn linear(catalog: &Catalog) -> Self {
        Self {
            tracks: catalog.tracks().to_vec(),
            shuffled: false,
        }
    }

    /// Rebuild from `catalog` according to the current shuffle flag
    ///
    /// When shuffled, `pinned` (if it is in the catalog) lands at index 0 and
    /// the rest is a fresh uniform permutation.
    pub fn rebuild<R>(&mut self, catalog: &Catalog, pinned: Option<&Track>, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.tracks = if self.shuffled {
            shuffle_pinned(catalog.tracks(), pinned, rng)
        } else {
            catalog.tracks().to_vec()
        };
    }

    /// Switch shuffle on or off and return the current track's new index
    ///
    /// Turning shuffle on pins `current` to index 0. Turning it off restores
    /// catalog order and re-resolves `current`; if it cannot be found the
    /// index falls back to 0 for a non-empty order. No current track yields
    /// `None`.
    pub fn toggle<R>(
        &mut self,
        enabled: bool,
        catalog: &Catalog,
        current: Option<&Track>,
        rng: &mut R,
    ) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        self.shuffled = enabled;
        self.rebuild(catalog, current, rng);

        let current = current?;
        self.index_of(&current.id)
            .or_else(|| (!self.tracks.is_empty()).then_some(0))
    }

    /// Position of a track in the order
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == *id)
    }

    /// Neighbouring index, wrapping at both ends
    ///
    /// With no current index, `Next` starts at 0 and `Previous` at the end.
    pub fn step(&self, current: Option<usize>, direction: Direction) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        Some(match (current, direction) {
            (Some(i), Direction::Next) => (i + 1) % len,
            (Some(i), Direction::Previous) => (i + len - 1) % len,
            (None, Direction::Next) => 0,
            (None, Direction::Previous) => len - 1,
        })
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaane_core::Locator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn catalog(count: usize) -> Catalog {
        Catalog::new(
            (0..count)
                .map(|i| {
                    Track::new(
                        TrackId::new(format!("t{i}")),
                        format!("Track {i}"),
                        "Artist",
                        Duration::from_secs(200),
                        Locator::new(format!("/m/{i}.mp3")),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn step_wraps_both_directions() {
        let order = PlayOrder::linear(&catalog(3));

        assert_eq!(order.step(Some(2), Direction::Next), Some(0));
        assert_eq!(order.step(Some(0), Direction::Previous), Some(2));
        assert_eq!(order.step(Some(1), Direction::Next), Some(2));
        assert_eq!(order.step(None, Direction::Next), Some(0));
        assert_eq!(order.step(None, Direction::Previous), Some(2));
    }

    #[test]
    fn step_on_empty_order() {
        let order = PlayOrder::linear(&Catalog::default());
        assert_eq!(order.step(Some(0), Direction::Next), None);
    }

    #[test]
    fn toggle_on_pins_current() {
        let cat = catalog(8);
        let mut order = PlayOrder::linear(&cat);
        let mut rng = StdRng::seed_from_u64(5);
        let current = cat.get(4).cloned();

        let index = order.toggle(true, &cat, current.as_ref(), &mut rng);
        assert_eq!(index, Some(0));
        assert_eq!(order.get(0).map(|t| t.id.as_str()), Some("t4"));
        assert!(order.is_shuffled());
    }

    #[test]
    fn toggle_off_restores_catalog_order() {
        let cat = catalog(8);
        let mut order = PlayOrder::linear(&cat);
        let mut rng = StdRng::seed_from_u64(5);
        let current = cat.get(4).cloned();

        order.toggle(true, &cat, current.as_ref(), &mut rng);
        let index = order.toggle(false, &cat, current.as_ref(), &mut rng);

        assert_eq!(index, Some(4));
        assert_eq!(order.tracks(), cat.tracks());
    }

    #[test]
    fn toggle_without_current() {
        let cat = catalog(4);
        let mut order = PlayOrder::linear(&cat);
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(order.toggle(true, &cat, None, &mut rng), None);
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn toggle_falls_back_to_zero_for_missing_current() {
        let cat = catalog(4);
        let stranger = catalog(6).get(5).cloned();
        let mut order = PlayOrder::linear(&cat);
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(
            order.toggle(false, &cat, stranger.as_ref(), &mut rng),
            Some(0)
        );
        assert_eq!(
            order.toggle(false, &Catalog::default(), stranger.as_ref(), &mut rng),
            None
        );
    }
}
