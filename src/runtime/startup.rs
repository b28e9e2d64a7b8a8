use std::path::Path;

use tracing::warn;

use crate::config;
use crate::error::ControllerError;
use crate::runtime::Deck;

/// Apply playback defaults and load the initial directory.
pub fn load_initial(deck: &mut Deck, dir: &Path, settings: &config::Settings) -> Result<(), ControllerError> {
    // Set before loading so the first session already carries it.
    deck.set_repeat(settings.playback.repeat)?;
    deck.view_mut().repeat = settings.playback.repeat;

    let report = deck.load_directory(dir)?;
    if let Some(w) = report.warning {
        warn!(error = %w, "starting with an empty playlist");
        deck.view_mut().set_status(w.to_string());
    }

    if !settings.playback.autoplay {
        deck.stop()?;
    }
    Ok(())
}
