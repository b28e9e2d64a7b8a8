//! Commands and shared state exchanged with the audio thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Drop the current queue and adopt the envelope's generation.
    Reset,
    /// Append a file to the end of the queue.
    Enqueue(PathBuf),
    /// Resume if paused, otherwise start at the current (or first) queue entry.
    Play,
    Pause,
    /// Stop playback; the queue position is kept.
    Stop,
    Next,
    Prev,
    /// Wrap around at either end of the queue.
    SetRepeat(bool),
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// A command tagged with the generation of the session that sent it.
///
/// `seq` counts the commands a session has sent, starting at 1.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub generation: u64,
    pub seq: u64,
    pub cmd: AudioCmd,
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Session generation the rest of the fields belong to.
    pub generation: u64,
    /// Queue position of the current track (if any).
    pub index: Option<usize>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Whether audio is currently coming out.
    pub playing: bool,
    /// `seq` of the last command the audio thread handled for `generation`.
    pub seq: u64,
    /// Playback stopped by itself: the queue ran out or nothing in it decoded.
    pub ended: bool,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
