//! Shuffle algorithm for play order randomization
//!
//! Fisher-Yates over the catalog, with an optional pinned track held at the
//! front so that toggling shuffle mid-track never moves what is playing.

use gaane_core::Track;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle `tracks`, placing `pinned` first when it is present
///
/// Every permutation of the remaining tracks is equally likely. A pinned
/// track that is not in `tracks` is ignored.
pub fn shuffle_pinned<R>(tracks: &[Track], pinned: Option<&Track>, rng: &mut R) -> Vec<Track>
where
    R: Rng + ?Sized,
{
    let pinned = pinned.filter(|p| tracks.iter().any(|t| t.id == p.id));

    let mut rest: Vec<Track> = match pinned {
        Some(p) => tracks.iter().filter(|t| t.id != p.id).cloned().collect(),
        None => tracks.to_vec(),
    };
    rest.shuffle(rng);

    match pinned {
        Some(p) => {
            let mut order = Vec::with_capacity(tracks.len());
            order.push(p.clone());
            order.extend(rest);
            order
        }
        None => rest,
    }
}
