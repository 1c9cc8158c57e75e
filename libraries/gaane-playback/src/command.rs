//! External transport commands
//!
//! Remote controls (media keys, a notification, a terminal) send
//! [`TransportCommand`]s from any thread through a [`CommandSender`]; the
//! owning loop receives them and applies them to the controller in order.

use crate::controller::TransportController;
use crate::error::{PlaybackError, Result};
use crossbeam_channel::{Receiver, Sender};
use std::str::FromStr;
use std::time::Duration;

/// Commands accepted from outside the controller's thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play,
    Pause,
    Next,
    Previous,
    /// Pause, release focus, and end the session
    Stop,
    Seek(Duration),
    ToggleShuffle,
    ToggleRepeat,
    /// Select a play order index
    Select(usize),
}

impl FromStr for TransportCommand {
    type Err = PlaybackError;

    /// Parse `play`, `pause`, `next`, `prev`, `stop`, `shuffle`, `repeat`,
    /// `seek <seconds>` or `select <index>`
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| PlaybackError::InvalidCommand("empty command".into()))?;
        let arg = parts.next();

        if parts.next().is_some() {
            return Err(PlaybackError::InvalidCommand(s.trim().to_string()));
        }

        let command = match (verb.to_ascii_lowercase().as_str(), arg) {
            ("play", None) => Self::Play,
            ("pause", None) => Self::Pause,
            ("next" | "n", None) => Self::Next,
            ("prev" | "previous" | "p", None) => Self::Previous,
            ("stop" | "quit" | "q", None) => Self::Stop,
            ("shuffle", None) => Self::ToggleShuffle,
            ("repeat", None) => Self::ToggleRepeat,
            ("seek", Some(secs)) => {
                let secs: f64 = secs
                    .parse()
                    .map_err(|_| PlaybackError::InvalidCommand(format!("bad seek time: {secs}")))?;
                let position = Duration::try_from_secs_f64(secs)
                    .map_err(|_| PlaybackError::InvalidCommand(format!("bad seek time: {secs}")))?;
                Self::Seek(position)
            }
            ("select" | "s", Some(index)) => Self::Select(index.parse().map_err(|_| {
                PlaybackError::InvalidCommand(format!("bad index: {index}"))
            })?),
            _ => return Err(PlaybackError::InvalidCommand(s.trim().to_string())),
        };
        Ok(command)
    }
}

/// Cloneable sending half handed to remote controls
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<TransportCommand>,
}

impl CommandSender {
    /// Queue a command; returns `false` once the receiving loop is gone
    pub fn send(&self, command: TransportCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

/// Unbounded command queue owned by the controller's loop
#[derive(Debug)]
pub struct CommandChannel {
    tx: Sender<TransportCommand>,
    rx: Receiver<TransportCommand>,
}

impl CommandChannel {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    /// Receiving half, for `select!` alongside other event sources
    pub fn receiver(&self) -> &Receiver<TransportCommand> {
        &self.rx
    }

    /// Next queued command without blocking
    pub fn try_recv(&self) -> Option<TransportCommand> {
        self.rx.try_recv().ok()
    }
}

impl Default for CommandChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportController {
    /// Apply one external command
    ///
    /// `Stop` only pauses and releases focus here; ending the session is the
    /// owner's job.
    pub fn apply(&mut self, command: TransportCommand) -> Result<()> {
        match command {
            TransportCommand::Play => self.play(),
            TransportCommand::Pause => {
                self.pause();
                Ok(())
            }
            TransportCommand::Next => self.next(),
            TransportCommand::Previous => self.previous(),
            TransportCommand::Stop => {
                self.stop();
                Ok(())
            }
            TransportCommand::Seek(position) => self.seek(position),
            TransportCommand::ToggleShuffle => {
                self.toggle_shuffle();
                Ok(())
            }
            TransportCommand::ToggleRepeat => {
                self.toggle_repeat();
                Ok(())
            }
            TransportCommand::Select(index) => self.load_track(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!("play".parse::<TransportCommand>().unwrap(), TransportCommand::Play);
        assert_eq!(" Next ".parse::<TransportCommand>().unwrap(), TransportCommand::Next);
        assert_eq!("prev".parse::<TransportCommand>().unwrap(), TransportCommand::Previous);
        assert_eq!("q".parse::<TransportCommand>().unwrap(), TransportCommand::Stop);
        assert_eq!(
            "shuffle".parse::<TransportCommand>().unwrap(),
            TransportCommand::ToggleShuffle
        );
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            "seek 12.5".parse::<TransportCommand>().unwrap(),
            TransportCommand::Seek(Duration::from_millis(12_500))
        );
        assert_eq!(
            "select 3".parse::<TransportCommand>().unwrap(),
            TransportCommand::Select(3)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<TransportCommand>().is_err());
        assert!("dance".parse::<TransportCommand>().is_err());
        assert!("seek".parse::<TransportCommand>().is_err());
        assert!("seek -4".parse::<TransportCommand>().is_err());
        assert!("select x".parse::<TransportCommand>().is_err());
        assert!("play now please".parse::<TransportCommand>().is_err());
    }

    #[test]
    fn channel_delivers_in_order() {
        let channel = CommandChannel::new();
        let sender = channel.sender();
        let remote = sender.clone();

        assert!(sender.send(TransportCommand::Play));
        assert!(remote.send(TransportCommand::Next));

        assert_eq!(channel.try_recv(), Some(TransportCommand::Play));
        assert_eq!(channel.try_recv(), Some(TransportCommand::Next));
        assert_eq!(channel.try_recv(), None);
    }

    #[test]
    fn sender_reports_closed_channel() {
        let channel = CommandChannel::new();
        let sender = channel.sender();
        drop(channel);
        assert!(!sender.send(TransportCommand::Pause));
    }
}
