mod catalog;
mod ids;
mod playback_state;
mod track;

pub use catalog::Catalog;
pub use ids::{Locator, TrackId};
pub use playback_state::{PersistedSnapshot, RepeatMode};
pub use track::Track;
