//! Application model types: `App` and `NowPlaying`.

use std::path::Path;
use std::time::Duration;

use crate::audio::PlaybackHandle;
use crate::controller::{PlaylistView, SessionState};
use crate::library::{TrackTags, display_name, read_tags};

/// Tags of the track the audio thread reports as playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub index: usize,
    pub name: String,
    pub tags: TrackTags,
}

impl NowPlaying {
    pub fn label(&self) -> String {
        display_name(&self.name, &self.tags)
    }
}

/// The main application model.
#[derive(Default)]
pub struct App {
    /// Playlist entries in the order the controller last announced them.
    pub rows: Vec<String>,
    pub selected: usize,
    pub playback: SessionState,
    pub playback_handle: Option<PlaybackHandle>,
    pub repeat: bool,
    pub current_dir: Option<String>,
    /// One-line message shown in the status box (warnings, errors).
    pub status: Option<String>,
    pub now_playing: Option<NowPlaying>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// The selection clamped to the current rows, or `None` when there are none.
    pub fn selected_index(&self) -> Option<usize> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.selected.min(self.rows.len() - 1))
        }
    }

    /// Select `idx`, clamped to the last row.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx.min(self.rows.len().saturating_sub(1));
    }

    /// Move selection to the next row, wrapping to the first.
    pub fn next(&mut self) {
        if let Some(sel) = self.selected_index() {
            self.selected = (sel + 1) % self.rows.len();
        }
    }

    /// Move selection to the previous row, wrapping to the last.
    pub fn prev(&mut self) {
        if let Some(sel) = self.selected_index() {
            self.selected = if sel == 0 { self.rows.len() - 1 } else { sel - 1 };
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// `(source, target_position)` that moves the selected row one step down.
    pub fn move_down_args(&self) -> Option<(usize, usize)> {
        let sel = self.selected_index()?;
        (sel + 1 < self.rows.len()).then_some((sel, sel + 2))
    }

    /// `(source, target_position)` that moves the selected row one step up.
    pub fn move_up_args(&self) -> Option<(usize, usize)> {
        let sel = self.selected_index()?;
        (sel > 0).then_some((sel, sel))
    }

    /// Whether sound is coming out right now (playing and not paused).
    pub fn is_audible(&self) -> bool {
        self.playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok().map(|info| info.playing))
            .unwrap_or(false)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok())
            .filter(|info| info.index.is_some())
            .map(|info| info.elapsed)
    }

    /// Refresh `now_playing` for the track at `index`, reading tags from
    /// `base_dir` only when the track changed.
    pub fn sync_now_playing(&mut self, index: Option<usize>, base_dir: &Path) {
        let Some(index) = index else {
            self.now_playing = None;
            return;
        };
        let Some(name) = self.rows.get(index) else {
            self.now_playing = None;
            return;
        };

        let unchanged = self
            .now_playing
            .as_ref()
            .is_some_and(|np| np.index == index && &np.name == name);
        if unchanged {
            return;
        }

        let tags = read_tags(&base_dir.join(name));
        self.now_playing = Some(NowPlaying {
            index,
            name: name.clone(),
            tags,
        });
    }
}

impl PlaylistView for App {
    fn clear_list(&mut self) {
        self.rows.clear();
        self.now_playing = None;
    }

    fn set_list(&mut self, name: &str) {
        self.rows.push(name.to_string());
    }

    fn playback_changed(&mut self, state: SessionState) {
        self.playback = state;
    }
}
