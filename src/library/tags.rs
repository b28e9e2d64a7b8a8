use std::path::Path;
use std::time::Duration;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use tracing::debug;

/// Tag fields shown for the now-playing track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

fn non_empty(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Read tags from `path`. Unreadable or untagged files give empty tags.
pub fn read_tags(path: &Path) -> TrackTags {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable tags");
            return TrackTags::default();
        }
    };

    let mut tags = TrackTags {
        duration: Some(tagged.properties().duration()),
        ..TrackTags::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        tags.title = non_empty(tag.title());
        tags.artist = non_empty(tag.artist());
        tags.album = non_empty(tag.album());
    }

    tags
}

/// Build the label for a playlist entry: `Artist - Title` when tags allow it,
/// otherwise the file name without its extension.
pub fn display_name(file_name: &str, tags: &TrackTags) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let title = tags.title.as_deref().unwrap_or(stem);

    match tags.artist.as_deref() {
        Some(a) => format!("{a} - {title}"),
        None => title.to_string(),
    }
}
