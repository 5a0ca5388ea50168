use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Audio file extensions picked up by a scan (compared case-insensitively).
pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "flac", "ogg", "wav", "m4a"];

/// Whether `path` has one of the [`AUDIO_EXTENSIONS`].
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            AUDIO_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Scans `root` for audio files, descending into subdirectories when
/// `recursive` is set.
///
/// Paths come back sorted by file name within each directory so repeated
/// scans yield the same row order. Unreadable entries are logged and skipped.
pub fn scan(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_audio_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_scan_audio_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        // Create dummy files in root
        File::create(root.join("song.mp3")).unwrap();
        File::create(root.join("music.flac")).unwrap();
        File::create(root.join("notes.txt")).unwrap(); // Should be ignored
        File::create(root.join("image.png")).unwrap(); // Should be ignored
        File::create(root.join("UPPERCASE.OGG")).unwrap(); // Should be found (case-insensitive)

        // Create subdirectory
        let subdir = root.join("subdir");
        std::fs::create_dir(&subdir).unwrap();
        File::create(subdir.join("track.wav")).unwrap();
        File::create(subdir.join("ignore.doc")).unwrap(); // Should be ignored

        let paths = scan(root, true);
        assert_eq!(paths.len(), 4);

        let file_names: Vec<String> = paths
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(|s| s.to_string()))
            .collect();

        assert!(file_names.contains(&"song.mp3".to_string()));
        assert!(file_names.contains(&"music.flac".to_string()));
        assert!(file_names.contains(&"track.wav".to_string()));
        assert!(file_names.contains(&"UPPERCASE.OGG".to_string()));
        assert!(!file_names.contains(&"notes.txt".to_string()));
    }

    #[test]
    fn test_scan_non_recursive() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        File::create(root.join("top.mp3")).unwrap();
        let subdir = root.join("nested");
        std::fs::create_dir(&subdir).unwrap();
        File::create(subdir.join("deep.mp3")).unwrap();

        let paths = scan(root, false);
        assert_eq!(paths, vec![root.join("top.mp3")]);
    }

    #[test]
    fn test_scan_order_is_stable() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for name in ["c.mp3", "a.mp3", "b.mp3"] {
            File::create(root.join(name)).unwrap();
        }
        assert_eq!(
            scan(root, true),
            vec![root.join("a.mp3"), root.join("b.mp3"), root.join("c.mp3")]
        );
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("/music/a.M4A")));
        assert!(!is_audio_file(Path::new("/music/cover.jpg")));
        assert!(!is_audio_file(Path::new("/music/README")));
    }
}
