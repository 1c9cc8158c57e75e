//! Audio focus arbitration
//!
//! Audio output is a shared resource. Before starting, the controller asks
//! the platform's [`FocusArbitrator`] for focus; afterwards the platform
//! reports [`FocusChange`]s, which [`FocusTracker`] turns into
//! [`FocusAction`]s for the controller to perform.

/// Platform focus service
pub trait FocusArbitrator {
    /// Request exclusive playback focus
    fn acquire(&mut self) -> FocusGrant;

    /// Give focus back
    fn release(&mut self);
}

/// Result of a focus request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusGrant {
    Granted,
    Denied,
}

/// Focus change reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    /// Focus regained
    Gain,

    /// Another app took focus for good
    Loss,

    /// Another app took focus briefly (a call, a navigation prompt)
    LossTransient,

    /// Another app took focus briefly and allows us to keep playing quietly
    LossTransientCanDuck,
}

/// What the controller should do about a focus change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    /// Nothing to do
    None,

    /// Pause and hand focus back
    PauseAndRelease,

    /// Pause, expecting to resume on gain
    Pause,

    /// Lower output gain
    Duck,

    /// Restore full gain, resuming if playback was interrupted by a transient
    /// loss
    Restore { resume: bool },
}

/// Focus bookkeeping owned by the controller
#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    held: bool,
    ducked: bool,
    resume_on_gain: bool,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a granted acquisition
    pub fn acquired(&mut self) {
        self.held = true;
        self.ducked = false;
    }

    /// Record a voluntary release
    pub fn released(&mut self) {
        self.held = false;
        self.ducked = false;
        self.resume_on_gain = false;
    }

    /// User paused: a later gain must not resume
    pub fn forget_resume(&mut self) {
        self.resume_on_gain = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn is_ducked(&self) -> bool {
        self.ducked
    }

    pub fn resume_pending(&self) -> bool {
        self.resume_on_gain
    }

    /// Map a platform change to an action
    ///
    /// `playing` is whether output was running when the change arrived.
    pub fn on_change(&mut self, change: FocusChange, playing: bool) -> FocusAction {
        match change {
            FocusChange::Loss => {
                self.released();
                FocusAction::PauseAndRelease
            }
            FocusChange::LossTransient if playing => {
                self.resume_on_gain = true;
                FocusAction::Pause
            }
            FocusChange::LossTransientCanDuck if playing => {
                self.ducked = true;
                FocusAction::Duck
            }
            FocusChange::LossTransient | FocusChange::LossTransientCanDuck => FocusAction::None,
            // A gain after a permanent loss does not mean we hold focus again
            FocusChange::Gain => {
                self.ducked = false;
                FocusAction::Restore {
                    resume: std::mem::take(&mut self.resume_on_gain),
                }
            }
        }
    }
}
