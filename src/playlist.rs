//! The ordered Track List owned by the playlist controller.
//!
//! Entries are plain file names (no directory part); order is playback order and
//! duplicates are allowed.

use crate::error::PlaylistError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackList {
    names: Vec<String>,
}

impl TrackList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Add `name` to the end of the list.
    pub fn append(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn get(&self, index: usize) -> Result<&str, PlaylistError> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(PlaylistError::IndexOutOfRange {
                index,
                len: self.names.len(),
            })
    }

    /// Remove the entry at `index`, shifting later entries left by one.
    pub fn remove_at(&mut self, index: usize) -> Result<String, PlaylistError> {
        if index >= self.names.len() {
            return Err(PlaylistError::IndexOutOfRange {
                index,
                len: self.names.len(),
            });
        }
        Ok(self.names.remove(index))
    }

    /// Relocate the entry at `source` so it ends up at the 1-based `target_position`.
    ///
    /// Entries between the old and new slot shift one step towards the vacated slot;
    /// everything else keeps its place. Both arguments are checked before the list is
    /// touched, so a failed call leaves it unchanged.
    pub fn move_to(&mut self, source: usize, target_position: usize) -> Result<(), PlaylistError> {
        let len = self.names.len();
        if source >= len {
            return Err(PlaylistError::IndexOutOfRange { index: source, len });
        }
        if target_position == 0 || target_position > len {
            return Err(PlaylistError::TargetOutOfRange {
                position: target_position,
                len,
            });
        }

        let target = target_position - 1;
        if target != source {
            let name = self.names.remove(source);
            self.names.insert(target, name);
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for TrackList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests;
