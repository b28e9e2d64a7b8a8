use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tracing::debug;

use crate::config::AudioSettings;
use crate::error::EngineError;

use super::engine::{EngineFactory, PlaybackEngine};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, Envelope, PlaybackHandle, PlaybackInfo};

/// Owns the audio thread and output stream for the lifetime of the player.
///
/// Every `create` call starts a new generation: the audio thread drops its
/// queue and from then on only obeys the newest `RodioSession`.
pub struct AudioBackend {
    tx: Sender<Envelope>,
    playback: PlaybackHandle,
    generation: u64,
    quit_fade_out_ms: u64,
    join: Option<JoinHandle<()>>,
}

impl AudioBackend {
    /// Open the default output device on a fresh audio thread.
    pub fn new(audio_settings: AudioSettings) -> Result<Self, EngineError> {
        let (tx, rx) = mpsc::channel::<Envelope>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let quit_fade_out_ms = audio_settings.quit_fade_out_ms;

        let join = spawn_audio_thread(rx, ready_tx, playback_info.clone(), audio_settings);

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = join.join();
                return Err(e);
            }
            Err(_) => return Err(EngineError::Disconnected),
        }

        Ok(Self {
            tx,
            playback: playback_info,
            generation: 0,
            quit_fade_out_ms,
            join: Some(join),
        })
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    /// Fade out, stop the audio thread and wait for it. Safe to call twice.
    pub fn quit_softly(&mut self) {
        let Some(handle) = self.join.take() else {
            return;
        };
        let _ = self.tx.send(Envelope {
            generation: self.generation,
            seq: 0,
            cmd: AudioCmd::Quit {
                fade_out_ms: self.quit_fade_out_ms,
            },
        });
        let _ = handle.join();
    }
}

impl EngineFactory for AudioBackend {
    type Engine = RodioSession;

    fn create(&mut self) -> Result<RodioSession, EngineError> {
        if self.join.is_none() {
            return Err(EngineError::Disconnected);
        }
        self.generation += 1;
        debug!(generation = self.generation, "creating playback session");

        let mut session = RodioSession {
            tx: self.tx.clone(),
            generation: self.generation,
            seq: 0,
            playback: self.playback.clone(),
            active: false,
            paused: false,
        };
        session.send(AudioCmd::Reset)?;
        Ok(session)
    }

    fn shutdown(&mut self) {
        self.quit_softly();
    }
}

impl Drop for AudioBackend {
    fn drop(&mut self) {
        self.quit_softly();
    }
}

/// One generation of the audio thread's queue.
///
/// Once a newer session exists, commands sent through this one are ignored.
pub struct RodioSession {
    tx: Sender<Envelope>,
    generation: u64,
    seq: u64,
    playback: PlaybackHandle,
    active: bool,
    paused: bool,
}

impl RodioSession {
    /// A session wired to a bare channel instead of an audio thread.
    #[cfg(test)]
    pub(super) fn detached(generation: u64) -> (Self, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel();
        let session = Self {
            tx,
            generation,
            seq: 0,
            playback: Arc::new(Mutex::new(PlaybackInfo::default())),
            active: false,
            paused: false,
        };
        (session, rx)
    }

    #[cfg(test)]
    pub(super) fn playback(&self) -> &PlaybackHandle {
        &self.playback
    }

    fn send(&mut self, cmd: AudioCmd) -> Result<(), EngineError> {
        let seq = self.seq + 1;
        self.tx
            .send(Envelope {
                generation: self.generation,
                seq,
                cmd,
            })
            .map_err(|_| EngineError::Disconnected)?;
        self.seq = seq;
        Ok(())
    }
}

impl PlaybackEngine for RodioSession {
    fn enqueue(&mut self, path: &Path) -> Result<(), EngineError> {
        self.send(AudioCmd::Enqueue(path.to_path_buf()))
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.send(AudioCmd::Play)?;
        self.active = true;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.send(AudioCmd::Pause)?;
        if self.active {
            self.paused = true;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.send(AudioCmd::Stop)?;
        self.active = false;
        self.paused = false;
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn skip_forward(&mut self) -> Result<(), EngineError> {
        self.send(AudioCmd::Next)?;
        self.active = true;
        self.paused = false;
        Ok(())
    }

    fn skip_backward(&mut self) -> Result<(), EngineError> {
        self.send(AudioCmd::Prev)?;
        self.active = true;
        self.paused = false;
        Ok(())
    }

    fn set_repeat(&mut self, repeat: bool) -> Result<(), EngineError> {
        self.send(AudioCmd::SetRepeat(repeat))
    }

    /// Only trusted once the audio thread has handled every command this
    /// session sent, so a pending `Play` is never mistaken for an ended queue.
    fn has_ended(&self) -> bool {
        self.playback.lock().is_ok_and(|info| {
            info.generation == self.generation && info.seq == self.seq && info.ended
        })
    }

    fn current_index(&self) -> Option<usize> {
        let info = self.playback.lock().ok()?;
        if info.generation == self.generation {
            info.index
        } else {
            None
        }
    }
}
