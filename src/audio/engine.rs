use std::path::Path;

use crate::error::EngineError;

/// One live playback session: an ordered queue of files plus transport state.
///
/// Implementations must preserve enqueue order; `skip_forward`/`skip_backward`
/// walk that order.
pub trait PlaybackEngine {
    fn enqueue(&mut self, path: &Path) -> Result<(), EngineError>;
    fn play(&mut self) -> Result<(), EngineError>;
    fn pause(&mut self) -> Result<(), EngineError>;
    fn stop(&mut self) -> Result<(), EngineError>;
    fn is_paused(&self) -> bool;
    fn skip_forward(&mut self) -> Result<(), EngineError>;
    fn skip_backward(&mut self) -> Result<(), EngineError>;
    fn set_repeat(&mut self, repeat: bool) -> Result<(), EngineError>;
    /// Playback stopped by itself (end of queue, or nothing playable) and no
    /// command sent since then is still outstanding.
    fn has_ended(&self) -> bool;
    /// Queue position of the track being played, if any.
    fn current_index(&self) -> Option<usize>;
}

/// Builds fresh sessions. Each call to `create` retires whatever session the
/// factory handed out before.
pub trait EngineFactory {
    type Engine: PlaybackEngine;

    fn create(&mut self) -> Result<Self::Engine, EngineError>;

    /// Release the underlying output. Called once when the player exits.
    fn shutdown(&mut self) {}
}
