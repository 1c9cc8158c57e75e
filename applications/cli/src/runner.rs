//! Interactive session loop
//!
//! Everything that touches the controller happens on the loop's thread:
//! commands from stdin (or any other [`CommandSender`]), decoder
//! notifications and progress ticks are handled one at a time.

use crate::app::format_duration;
use crate::audio::DecoderMonitor;
use crate::error::Result;
use crossbeam_channel::select;
use gaane_playback::{
    CommandChannel, CommandSender, PlaybackEvent, PlayerSession, TransportCommand,
};
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Upper bound on how long the loop sleeps between decoder checks
const DECODER_POLL: Duration = Duration::from_millis(200);

pub const HELP: &str =
    "commands: play, pause, next, prev, seek <secs>, select <n>, shuffle, repeat, stop";

pub struct Runner {
    session: PlayerSession,
    monitor: DecoderMonitor,
    commands: CommandChannel,
    last_tick: Instant,
}

impl Runner {
    pub fn new(session: PlayerSession, monitor: DecoderMonitor) -> Self {
        Self {
            session,
            monitor,
            commands: CommandChannel::new(),
            last_tick: Instant::now(),
        }
    }

    pub fn sender(&self) -> CommandSender {
        self.commands.sender()
    }

    /// Run until a `stop` command; the snapshot is saved on the way out
    pub fn run(&mut self) -> Result<()> {
        let commands = self.commands.receiver().clone();
        loop {
            self.pump_decoder();
            self.flush();

            let wait = self.wait_time();
            select! {
                recv(commands) -> command => {
                    let Ok(command) = command else {
                        self.session.destroy()?;
                        return Ok(());
                    };
                    debug!(?command, "command received");
                    if self.session.dispatch(command).is_break() {
                        self.flush();
                        return Ok(());
                    }
                }
                default(wait) => {}
            }

            self.tick_if_due();
        }
    }

    fn pump_decoder(&mut self) {
        for event in self.monitor.take_events() {
            self.session.controller_mut().on_decoder_event(&event);
        }
    }

    fn flush(&mut self) {
        for event in self.session.drain_events() {
            if let Some(line) = render(&event) {
                println!("{line}");
            }
        }
    }

    fn wait_time(&self) -> Duration {
        match self.session.controller().next_tick_in() {
            Some(interval) => interval
                .saturating_sub(self.last_tick.elapsed())
                .min(DECODER_POLL),
            None => DECODER_POLL,
        }
    }

    fn tick_if_due(&mut self) {
        match self.session.controller().next_tick_in() {
            Some(interval) if self.last_tick.elapsed() >= interval => {
                self.session.controller_mut().tick();
                self.last_tick = Instant::now();
            }
            Some(_) => {}
            None => self.last_tick = Instant::now(),
        }
    }
}

/// Parse lines into commands until EOF, then ask the loop to stop
pub fn forward_commands<R: BufRead>(reader: R, sender: &CommandSender) {
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<TransportCommand>() {
            Ok(command) => {
                if !sender.send(command) {
                    return;
                }
            }
            Err(e) => {
                warn!(error = %e, "ignoring input");
                println!("{HELP}");
            }
        }
    }
    sender.send(TransportCommand::Stop);
}

pub fn spawn_stdin_reader(sender: CommandSender) -> JoinHandle<()> {
    thread::spawn(move || forward_commands(std::io::stdin().lock(), &sender))
}

/// Terminal line for an event; `None` for events not worth printing
pub fn render(event: &PlaybackEvent) -> Option<String> {
    match event {
        PlaybackEvent::TrackChanged {
            track: Some(track),
            is_playing,
        } => Some(format!(
            "{} {} - {}",
            if *is_playing { "Playing" } else { "Loaded" },
            track.artist,
            track.title
        )),
        PlaybackEvent::TrackChanged { track: None, .. } => Some("Nothing loaded".to_string()),
        PlaybackEvent::PlaybackStateChanged { is_playing } => {
            Some(if *is_playing { "[playing]" } else { "[paused]" }.to_string())
        }
        PlaybackEvent::Progress {
            position_ms,
            duration_ms,
        } => {
            if *duration_ms == 0 {
                return None;
            }
            Some(format!(
                "[{} / {}]",
                format_duration(Duration::from_millis(*position_ms)),
                format_duration(Duration::from_millis(*duration_ms))
            ))
        }
        PlaybackEvent::OrderChanged { .. } => None,
        PlaybackEvent::Notice(notice) => Some(notice.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaane_core::{Locator, Track, TrackId};
    use gaane_playback::Notice;
    use std::io::Cursor;

    #[test]
    fn forwards_parsed_lines_and_stops_at_eof() {
        let channel = CommandChannel::new();
        let input = Cursor::new("play\n\nbogus\nseek 30\nnext\n");

        forward_commands(input, &channel.sender());

        let received: Vec<_> = std::iter::from_fn(|| channel.try_recv()).collect();
        assert_eq!(
            received,
            vec![
                TransportCommand::Play,
                TransportCommand::Seek(Duration::from_secs(30)),
                TransportCommand::Next,
                TransportCommand::Stop,
            ]
        );
    }

    #[test]
    fn renders_track_changes() {
        let track = Track::new(
            TrackId::new("a"),
            "Piya Tose",
            "Lata Mangeshkar",
            Duration::from_secs(300),
            Locator::new("file:///music/piya.flac"),
        );
        let line = render(&PlaybackEvent::TrackChanged {
            track: Some(track),
            is_playing: true,
        });
        assert_eq!(line.as_deref(), Some("Playing Lata Mangeshkar - Piya Tose"));
    }

    #[test]
    fn renders_progress_only_with_a_duration() {
        let ticking = PlaybackEvent::Progress {
            position_ms: 61_000,
            duration_ms: 300_000,
        };
        assert_eq!(render(&ticking).as_deref(), Some("[01:01 / 05:00]"));

        let unprepared = PlaybackEvent::Progress {
            position_ms: 0,
            duration_ms: 0,
        };
        assert_eq!(render(&unprepared), None);
    }

    #[test]
    fn renders_notices_verbatim() {
        let event = PlaybackEvent::Notice(Notice::NothingToPlay);
        assert_eq!(render(&event).as_deref(), Some("No songs to play"));
    }
}
