use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::ScanError;

fn is_audio_file(name: &str, settings: &LibrarySettings) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();

    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| !e.is_empty() && e == ext)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// List the playable file names directly inside `dir`.
///
/// Names come back in directory enumeration order, without any sorting.
/// Subdirectories are never entered.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<String>, ScanError> {
    let mut names: Vec<String> = Vec::new();

    let walker = WalkDir::new(dir)
        .max_depth(1)
        .follow_links(settings.follow_links);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(source) if source.depth() == 0 => {
                return Err(ScanError::Unreadable {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                debug!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                return Err(ScanError::NotADirectory(dir.to_path_buf()));
            }
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        // Names must round-trip through `base_dir.join(name)`.
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %entry.path().display(), "skipping file with a non UTF-8 name");
            continue;
        };
        if (settings.include_hidden || !is_hidden(&name)) && is_audio_file(&name, settings) {
            names.push(name);
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file("a.mp3", &settings));
        assert!(is_audio_file("a.MP3", &settings));
        assert!(is_audio_file("some.band - a.mp3", &settings));
        assert!(!is_audio_file("a.flac", &settings));
        assert!(!is_audio_file("a.txt", &settings));
        assert!(!is_audio_file("mp3", &settings));

        let settings = LibrarySettings {
            extensions: vec![".OGG".into(), " flac ".into()],
            ..LibrarySettings::default()
        };
        assert!(is_audio_file("a.ogg", &settings));
        assert!(is_audio_file("a.flac", &settings));
        assert!(!is_audio_file("a.mp3", &settings));
    }

    #[test]
    fn scan_keeps_only_matching_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.mp3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("y.txt"), b"ignore me").unwrap();
        fs::write(dir.path().join("z.mp3"), b"not a real mp3").unwrap();

        let mut names = scan(dir.path(), &LibrarySettings::default()).unwrap();
        names.sort();
        assert_eq!(names, vec!["x.mp3".to_string(), "z.mp3".to_string()]);
    }

    #[test]
    fn scan_does_not_recurse_or_list_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();
        fs::create_dir_all(dir.path().join("folder.mp3")).unwrap();

        let names = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(names, vec!["root.mp3".to_string()]);
    }

    #[test]
    fn scan_respects_include_hidden() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let names = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(names, vec!["visible.mp3".to_string()]);

        let settings = LibrarySettings {
            include_hidden: true,
            ..LibrarySettings::default()
        };
        let mut names = scan(dir.path(), &settings).unwrap();
        names.sort();
        assert_eq!(
            names,
            vec![".hidden.mp3".to_string(), "visible.mp3".to_string()]
        );
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_names_that_are_not_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("plain.mp3"), b"not real").unwrap();
        let odd = dir.path().join(OsStr::from_bytes(b"caf\xe9.mp3"));
        if fs::write(&odd, b"not real").is_err() {
            // Some filesystems reject non UTF-8 names.
            return;
        }

        let names = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(names, vec!["plain.mp3".to_string()]);
        for name in &names {
            assert!(dir.path().join(name).exists());
        }
    }

    #[test]
    fn scan_missing_directory_is_unreadable() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = scan(&missing, &LibrarySettings::default()).unwrap_err();
        assert!(matches!(err, ScanError::Unreadable { .. }));
    }

    #[test]
    fn scan_of_a_file_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        fs::write(&file, b"not real").unwrap();
        let err = scan(&file, &LibrarySettings::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(p) if p == file));
    }
}
