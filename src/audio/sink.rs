//! Utilities for creating `rodio` sinks from queued files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::EngineError;

/// Open and decode `path` into a paused `Sink` at `volume`.
pub(super) fn create_sink(
    stream: &OutputStream,
    path: &Path,
    volume: f32,
) -> Result<Sink, EngineError> {
    let unplayable = |reason: String| EngineError::Unplayable {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| unplayable(e.to_string()))?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| unplayable(e.to_string()))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
