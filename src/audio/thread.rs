use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use crate::config::AudioSettings;
use crate::error::EngineError;

use super::queue::{next_position, prev_position};
use super::sink::create_sink;
use super::types::{AudioCmd, Envelope, PlaybackHandle};

/// Everything the audio thread knows about the live session.
struct Deck {
    generation: u64,
    seq: u64,
    ended: bool,
    queue: Vec<PathBuf>,
    pos: Option<usize>,
    sink: Option<Sink>,
    paused: bool,
    repeat: bool,
    volume: f32,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Deck {
    fn new(volume: f32) -> Self {
        Self {
            generation: 0,
            seq: 0,
            ended: false,
            queue: Vec::new(),
            pos: None,
            sink: None,
            paused: false,
            repeat: false,
            volume,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn publish(&self, playback_info: &PlaybackHandle) {
        if let Ok(mut info) = playback_info.lock() {
            info.generation = self.generation;
            info.seq = self.seq;
            info.ended = self.ended;
            info.index = if self.sink.is_some() { self.pos } else { None };
            info.elapsed = self.elapsed();
            info.playing = self.sink.is_some() && !self.paused;
        }
    }

    /// Start the entry at `i`, skipping forward past files that fail to decode.
    fn play_at(&mut self, stream: &OutputStream, mut i: usize) {
        for _ in 0..self.queue.len() {
            match create_sink(stream, &self.queue[i], self.volume) {
                Ok(new_sink) => {
                    if let Some(old) = self.sink.take() {
                        old.stop();
                    }
                    new_sink.play();
                    debug!(index = i, path = %self.queue[i].display(), "track started");
                    self.sink = Some(new_sink);
                    self.pos = Some(i);
                    self.paused = false;
                    self.started_at = Some(Instant::now());
                    self.accumulated = Duration::ZERO;
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "skipping unplayable track");
                    match next_position(Some(i), self.queue.len(), self.repeat) {
                        Some(n) => i = n,
                        None => break,
                    }
                }
            }
        }
        self.finish();
    }

    /// Stop without being asked to and rewind, so the next `Play` starts over.
    fn finish(&mut self) {
        self.stop();
        self.pos = None;
        self.ended = true;
        debug!(generation = self.generation, "playback ended");
    }

    fn play(&mut self, stream: &OutputStream) {
        if let Some(ref s) = self.sink {
            if self.paused {
                s.play();
                self.paused = false;
                self.started_at = Some(Instant::now());
            }
            return;
        }
        if let Some(i) = next_position(None, self.queue.len(), self.repeat) {
            self.play_at(stream, self.pos.unwrap_or(i));
        }
    }

    fn pause(&mut self) {
        if let Some(ref s) = self.sink {
            if !self.paused {
                s.pause();
                if let Some(st) = self.started_at.take() {
                    self.accumulated += st.elapsed();
                }
                self.paused = true;
            }
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.paused = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn reset(&mut self, generation: u64) {
        self.stop();
        self.generation = generation;
        self.ended = false;
        self.queue.clear();
        self.pos = None;
        self.repeat = false;
    }

    fn skip(&mut self, stream: &OutputStream, target: Option<usize>) {
        match target {
            Some(i) => self.play_at(stream, i),
            None => self.finish(),
        }
    }
}

fn fade_out_sink(sink: &Sink, volume: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(volume * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Spawn the thread that owns the output stream.
///
/// The outcome of opening the output device is reported once through `ready`
/// before any command is processed.
pub(super) fn spawn_audio_thread(
    rx: Receiver<Envelope>,
    ready: SyncSender<Result<(), EngineError>>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(EngineError::NoOutputDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would land on the TUI.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));
        info!("audio output opened");

        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        let mut deck = Deck::new(audio_settings.volume);

        loop {
            match rx.recv_timeout(tick) {
                Ok(Envelope { generation, seq, cmd }) => match cmd {
                    AudioCmd::Reset => {
                        deck.reset(generation);
                        deck.seq = seq;
                        debug!(generation, "new playback session");
                    }
                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = deck.sink {
                            if !deck.paused {
                                fade_out_sink(s, deck.volume, fade_out_ms);
                            }
                        }
                        deck.stop();
                        deck.pos = None;
                        deck.publish(&playback_info);
                        break;
                    }
                    cmd if generation != deck.generation => {
                        debug!(generation, current = deck.generation, ?cmd, "ignoring command from retired session");
                    }
                    cmd => {
                        deck.seq = seq;
                        match cmd {
                            AudioCmd::Enqueue(path) => deck.queue.push(path),
                            AudioCmd::Play => {
                                deck.ended = false;
                                deck.play(&stream);
                            }
                            AudioCmd::Pause => deck.pause(),
                            AudioCmd::Stop => {
                                deck.ended = false;
                                deck.stop();
                            }
                            AudioCmd::Next => {
                                let target = next_position(deck.pos, deck.queue.len(), deck.repeat);
                                // Manual skip at the end without repeat keeps the last track.
                                if let Some(i) = target {
                                    deck.ended = false;
                                    deck.play_at(&stream, i);
                                }
                            }
                            AudioCmd::Prev => {
                                let target = prev_position(deck.pos, deck.queue.len(), deck.repeat);
                                if let Some(i) = target {
                                    deck.ended = false;
                                    deck.play_at(&stream, i);
                                }
                            }
                            AudioCmd::SetRepeat(repeat) => deck.repeat = repeat,
                            AudioCmd::Reset | AudioCmd::Quit { .. } => {}
                        }
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic check for auto-advance
                    let finished = deck
                        .sink
                        .as_ref()
                        .is_some_and(|s| !deck.paused && s.empty());
                    if finished {
                        let target = next_position(deck.pos, deck.queue.len(), deck.repeat);
                        deck.skip(&stream, target);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
            deck.publish(&playback_info);
        }
    })
}
