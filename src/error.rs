//! Error types shared by the playlist, library scanner, audio engine and controller.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid index or position passed to a Track List operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("index {index} is out of range for a playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// `position` is 1-based; valid values are `1..=len`.
    #[error("target position {position} is out of range for a playlist of {len} tracks")]
    TargetOutOfRange { position: usize, len: usize },
}

/// Why a directory could not be listed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("cannot list {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failures raised by a playback engine or its factory.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("audio thread is not running")]
    Disconnected,

    #[error("cannot play {path}: {reason}")]
    Unplayable { path: PathBuf, reason: String },
}

/// Errors returned by `PlaylistController` operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error("playback engine failed: {0}")]
    Engine(#[from] EngineError),
}
