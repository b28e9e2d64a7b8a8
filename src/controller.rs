//! The playlist controller: owns the Track List and the active playback
//! session, and rebuilds the session whenever playlist order changes.

mod view;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::audio::{EngineFactory, PlaybackEngine};
use crate::config::LibrarySettings;
use crate::error::{ControllerError, ScanError};
use crate::library::scan;
use crate::playlist::TrackList;

pub use view::{PlaylistView, SessionState};

/// Outcome of `load_directory`.
#[derive(Debug)]
pub struct LoadReport {
    pub loaded: usize,
    /// Set when the directory could not be listed; the playlist is then empty.
    pub warning: Option<ScanError>,
}

pub struct PlaylistController<F: EngineFactory, V: PlaylistView> {
    tracks: TrackList,
    base_dir: PathBuf,
    library: LibrarySettings,
    factory: F,
    session: F::Engine,
    state: SessionState,
    repeat: bool,
    view: V,
}

impl<F: EngineFactory, V: PlaylistView> PlaylistController<F, V> {
    /// Create a controller with an empty playlist and a fresh, idle session.
    pub fn new(mut factory: F, view: V, library: LibrarySettings) -> Result<Self, ControllerError> {
        let session = factory.create()?;
        Ok(Self {
            tracks: TrackList::new(),
            base_dir: PathBuf::new(),
            library,
            factory,
            session,
            state: SessionState::Idle,
            repeat: false,
            view,
        })
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Playlist index of the track the session is playing.
    pub fn current_index(&self) -> Option<usize> {
        self.session.current_index()
    }

    /// Replace the playlist with the playable files found directly in `dir`,
    /// then reload.
    ///
    /// A directory that cannot be listed is not an error: the playlist ends up
    /// empty and the reason comes back in `LoadReport::warning`. If the new
    /// session cannot be built, the previous playlist and directory are kept.
    pub fn load_directory(&mut self, dir: impl Into<PathBuf>) -> Result<LoadReport, ControllerError> {
        let dir = dir.into();

        let (tracks, warning) = match scan(&dir, &self.library) {
            Ok(names) => (names.into_iter().collect::<TrackList>(), None),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "directory could not be listed");
                (TrackList::new(), Some(e))
            }
        };

        let was_paused = self.retire_session()?;
        let fresh = Self::build_session(&mut self.factory, self.repeat, &tracks, &dir)?;

        info!(dir = %dir.display(), tracks = tracks.len(), "playlist loaded");
        self.tracks = tracks;
        self.base_dir = dir;
        self.swap_in(fresh, was_paused)?;

        Ok(LoadReport {
            loaded: self.tracks.len(),
            warning,
        })
    }

    /// Add `name` to the end of the playlist. The session is not touched.
    pub fn append(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(%name, "appended track");
        self.tracks.append(name);
    }

    pub fn get(&self, index: usize) -> Result<&str, ControllerError> {
        Ok(self.tracks.get(index)?)
    }

    /// Remove the entry at `index`. The session is not touched.
    pub fn remove_at(&mut self, index: usize) -> Result<String, ControllerError> {
        let name = self.tracks.remove_at(index)?;
        debug!(index, %name, "removed track");
        Ok(name)
    }

    /// Move the entry at `source` to the 1-based `target_position`, then reload.
    ///
    /// The reload happens even when the entry is already in place. Invalid
    /// arguments leave both the playlist and the session alone.
    pub fn move_to(&mut self, source: usize, target_position: usize) -> Result<(), ControllerError> {
        self.tracks.move_to(source, target_position)?;
        info!(source, target_position, "moved track");
        self.reload()
    }

    /// Remove the track being played from the playlist and reload.
    ///
    /// Returns the removed name, or `None` when nothing is playing.
    pub fn remove_current(&mut self) -> Result<Option<String>, ControllerError> {
        let Some(index) = self.session.current_index() else {
            return Ok(None);
        };
        if index >= self.tracks.len() {
            return Ok(None);
        }

        let name = self.tracks.remove_at(index)?;
        info!(index, %name, "removed current track");
        self.reload()?;
        Ok(Some(name))
    }

    /// Retire the current session and rebuild a fresh one from the playlist.
    ///
    /// On success the new session holds exactly the playlist, in order, and is
    /// playing. On failure the playlist and the view keep their contents and
    /// the old session stays in place, stopped.
    pub fn reload(&mut self) -> Result<(), ControllerError> {
        let was_paused = self.retire_session()?;
        let fresh = Self::build_session(&mut self.factory, self.repeat, &self.tracks, &self.base_dir)?;
        self.swap_in(fresh, was_paused)
    }

    /// Stop the live session. Returns whether it was paused.
    fn retire_session(&mut self) -> Result<bool, ControllerError> {
        let was_paused = self.session.is_paused();
        self.session.stop()?;
        self.state = SessionState::Stopped;
        Ok(was_paused)
    }

    /// A fresh session holding `tracks` in order. Nothing is shared with the
    /// controller until it succeeds.
    fn build_session(
        factory: &mut F,
        repeat: bool,
        tracks: &TrackList,
        base_dir: &Path,
    ) -> Result<F::Engine, ControllerError> {
        let mut fresh = factory.create()?;
        fresh.set_repeat(repeat)?;
        for name in tracks.iter() {
            fresh.enqueue(&base_dir.join(name))?;
        }
        Ok(fresh)
    }

    /// Make `fresh` the live session, refresh the view and start playing.
    fn swap_in(&mut self, fresh: F::Engine, was_paused: bool) -> Result<(), ControllerError> {
        // The old session is dropped here.
        self.session = fresh;

        self.view.clear_list();
        for name in self.tracks.iter() {
            self.view.set_list(name);
        }
        if was_paused {
            self.view.playback_changed(SessionState::Paused);
        }

        self.session.play()?;
        self.set_state(SessionState::Playing);
        debug!(tracks = self.tracks.len(), was_paused, "session reloaded");
        Ok(())
    }

    /// Catch up with a session that stopped by itself, such as at the end of
    /// the queue without repeat. Call this regularly from the event loop.
    pub fn sync_state(&mut self) -> Result<(), ControllerError> {
        let running = matches!(self.state, SessionState::Playing | SessionState::Paused);
        if running && self.session.has_ended() {
            // Clears the session's own paused flag too.
            self.session.stop()?;
            self.set_state(SessionState::Stopped);
            debug!("session ended on its own");
        }
        Ok(())
    }

    pub fn play(&mut self) -> Result<(), ControllerError> {
        self.session.play()?;
        self.set_state(SessionState::Playing);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), ControllerError> {
        self.session.pause()?;
        if self.state == SessionState::Playing {
            self.set_state(SessionState::Paused);
        }
        Ok(())
    }

    /// Pause when playing, play otherwise.
    pub fn toggle_pause(&mut self) -> Result<(), ControllerError> {
        if self.state == SessionState::Playing {
            self.pause()
        } else {
            self.play()
        }
    }

    pub fn stop(&mut self) -> Result<(), ControllerError> {
        self.session.stop()?;
        self.set_state(SessionState::Stopped);
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), ControllerError> {
        self.session.skip_forward()?;
        if !self.tracks.is_empty() {
            self.set_state(SessionState::Playing);
        }
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), ControllerError> {
        self.session.skip_backward()?;
        if !self.tracks.is_empty() {
            self.set_state(SessionState::Playing);
        }
        Ok(())
    }

    /// Toggle wrap-around. The flag survives reloads.
    pub fn set_repeat(&mut self, repeat: bool) -> Result<(), ControllerError> {
        self.session.set_repeat(repeat)?;
        self.repeat = repeat;
        Ok(())
    }

    /// Stop the session and release the engine.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.session.stop() {
            debug!(error = %e, "session already gone at shutdown");
        }
        self.factory.shutdown();
    }

    fn set_state(&mut self, state: SessionState) {
        self.state = state;
        self.view.playback_changed(state);
    }
}
