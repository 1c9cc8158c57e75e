//! Audio output through rodio
//!
//! One [`Sink`] per prepared track, all fed into a single output stream.
//! rodio has no completion callback, so [`DecoderMonitor`] polls watched
//! sinks and turns a drained sink into [`DecoderEvent::Completed`].

use crate::error::{CliError, Result};
use gaane_core::Track;
use gaane_library::path_from_locator;
use gaane_playback::{Decoder, DecoderBackend, DecoderEvent, PlaybackError, PrepareTicket};
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, warn};

/// Decoder notifications waiting for the event loop
#[derive(Clone, Default)]
pub struct DecoderMonitor {
    inner: Rc<RefCell<MonitorState>>,
}

#[derive(Default)]
struct MonitorState {
    queued: VecDeque<DecoderEvent>,
    watched: Vec<(PrepareTicket, Weak<Sink>)>,
}

impl DecoderMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    fn post(&self, event: DecoderEvent) {
        self.inner.borrow_mut().queued.push_back(event);
    }

    fn watch(&self, ticket: PrepareTicket, sink: &Rc<Sink>) {
        let sink = Rc::downgrade(sink);
        let mut state = self.inner.borrow_mut();
        if !state.watched.iter().any(|(_, watched)| watched.ptr_eq(&sink)) {
            state.watched.push((ticket, sink));
        }
    }

    /// Queued events followed by completions of drained sinks
    ///
    /// A completed sink stops being watched until its decoder reloads it.
    /// Sinks whose decoder was dropped are forgotten.
    pub fn take_events(&self) -> Vec<DecoderEvent> {
        let mut state = self.inner.borrow_mut();
        let mut finished = Vec::new();

        state.watched.retain(|(ticket, sink)| match sink.upgrade() {
            Some(sink) if sink.empty() => {
                finished.push(ticket.clone());
                false
            }
            Some(_) => true,
            None => false,
        });

        let mut events: Vec<DecoderEvent> = state.queued.drain(..).collect();
        events.extend(finished.into_iter().map(DecoderEvent::Completed));
        events
    }
}

/// Opens tracks from the local file system onto the default output device
///
/// The output stream is opened on first use so commands that never play
/// audio do not touch the sound card.
pub struct RodioBackend {
    stream: Option<OutputStream>,
    monitor: DecoderMonitor,
}

impl RodioBackend {
    pub fn new(monitor: DecoderMonitor) -> Self {
        Self {
            stream: None,
            monitor,
        }
    }

    /// Open the default output device now rather than on the first track
    pub fn ensure_output(&mut self) -> Result<()> {
        self.stream()?;
        Ok(())
    }

    fn stream(&mut self) -> Result<&OutputStream> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::from_default_device()
                .and_then(|builder| {
                    builder
                        .with_error_callback(|e| warn!(error = %e, "audio output error"))
                        .open_stream_or_fallback()
                })
                .map_err(|e| CliError::Audio(e.to_string()))?;
            stream.log_on_drop(false);
            debug!("opened default audio output");
            self.stream = Some(stream);
        }

        self.stream
            .as_ref()
            .ok_or_else(|| CliError::Audio("output stream unavailable".to_string()))
    }
}

impl DecoderBackend for RodioBackend {
    fn open(
        &mut self,
        track: &Track,
        ticket: PrepareTicket,
    ) -> gaane_playback::Result<Box<dyn Decoder>> {
        let path = track
            .file_path
            .clone()
            .unwrap_or_else(|| path_from_locator(&track.locator));

        let source = open_source(&path)?;
        let duration = source.total_duration().unwrap_or(track.duration);

        let mixer = self
            .stream()
            .map_err(|e| PlaybackError::decoder(e.to_string()))?
            .mixer();
        let sink = Rc::new(Sink::connect_new(mixer));
        sink.pause();
        sink.append(source);

        self.monitor.watch(ticket.clone(), &sink);
        self.monitor.post(DecoderEvent::Prepared(ticket.clone()));
        debug!(path = %path.display(), ?duration, "decoder opened");

        Ok(Box::new(RodioDecoder {
            sink,
            path,
            duration,
            ticket,
            monitor: self.monitor.clone(),
        }))
    }
}

/// One track on its own sink
pub struct RodioDecoder {
    sink: Rc<Sink>,
    path: PathBuf,
    duration: Duration,
    ticket: PrepareTicket,
    monitor: DecoderMonitor,
}

impl RodioDecoder {
    /// Queue the file again after the sink played it to the end
    fn reload_if_drained(&mut self) -> gaane_playback::Result<()> {
        if !self.sink.empty() {
            return Ok(());
        }
        let source = open_source(&self.path)?;
        self.sink.append(source);
        self.monitor.watch(self.ticket.clone(), &self.sink);
        debug!(path = %self.path.display(), "reloaded drained track");
        Ok(())
    }
}

impl Decoder for RodioDecoder {
    fn start(&mut self) -> gaane_playback::Result<()> {
        self.reload_if_drained()?;
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek(&mut self, position: Duration) -> gaane_playback::Result<Duration> {
        self.reload_if_drained()?;

        let target = if self.duration.is_zero() {
            position
        } else {
            position.min(self.duration)
        };
        self.sink
            .try_seek(target)
            .map_err(|err| PlaybackError::decoder(format!("failed to seek: {err:?}")))?;
        Ok(target)
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.sink.set_volume(gain);
    }
}

impl Drop for RodioDecoder {
    fn drop(&mut self) {
        self.sink.stop();
    }
}

fn open_source(path: &Path) -> gaane_playback::Result<impl Source + Send + 'static> {
    let file = File::open(path).map_err(|e| {
        PlaybackError::decoder(format!("failed to open {}: {}", path.display(), e))
    })?;
    rodio::Decoder::try_from(file).map_err(|e| {
        PlaybackError::decoder(format!("failed to decode {}: {}", path.display(), e))
    })
}
