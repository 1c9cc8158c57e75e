/// Desktop audio focus
use gaane_playback::{FocusArbitrator, FocusGrant};
use tracing::debug;

/// Desktop mixers let every app play at once, so focus is always granted
#[derive(Debug, Default)]
pub struct DesktopFocus {
    held: bool,
}

impl DesktopFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl FocusArbitrator for DesktopFocus {
    fn acquire(&mut self) -> FocusGrant {
        debug!("audio focus acquired");
        self.held = true;
        FocusGrant::Granted
    }

    fn release(&mut self) {
        debug!("audio focus released");
        self.held = false;
    }
}
