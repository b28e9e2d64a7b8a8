//! Playback engine abstraction and its `rodio` implementation.
//!
//! The controller talks to engines only through `PlaybackEngine` and
//! `EngineFactory`. `AudioBackend` owns the output stream on a dedicated
//! thread and hands out one `RodioSession` per reload.

mod engine;
mod player;
mod queue;
mod sink;
mod thread;
mod types;

pub use engine::{EngineFactory, PlaybackEngine};
pub use player::AudioBackend;
pub use types::{PlaybackHandle, PlaybackInfo};

#[cfg(test)]
mod tests;
