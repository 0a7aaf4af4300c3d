// src/core/audio.rs

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::core::models::CoughFile;

/// Maps a file extension to the MIME type sent to the backend.
///
/// Returns `None` for anything that is not a wav or mp3 recording.
pub fn audio_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "wav" => Some("audio/wav"),
        "mp3" => Some("audio/mpeg"),
        _ => None,
    }
}

/// Loads a cough recording from disk.
///
/// Files that are not wav/mp3 are ignored: the result is `Ok(None)` and the
/// file is never read. Read errors on a supported file are returned.
///
/// # Arguments
/// * `path` - Path typed by the user. Surrounding whitespace and quotes are
///   stripped, since terminals often add them when a file is dropped in.
pub fn load_cough_file(path: &str) -> io::Result<Option<CoughFile>> {
    let cleaned = path.trim().trim_matches(|c| c == '\'' || c == '"');
    let path = Path::new(cleaned);

    let Some(mime_type) = audio_mime_type(path) else {
        debug!(path = %path.display(), "Ignoring file with unsupported type.");
        return Ok(None);
    };

    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cleaned.to_string());

    info!(name = %name, size = bytes.len(), mime_type, "Loaded cough recording.");
    Ok(Some(CoughFile {
        name,
        mime_type: mime_type.to_string(),
        bytes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(audio_mime_type(Path::new("a.wav")), Some("audio/wav"));
        assert_eq!(audio_mime_type(Path::new("a.WAV")), Some("audio/wav"));
        assert_eq!(audio_mime_type(Path::new("dir/b.mp3")), Some("audio/mpeg"));
        assert_eq!(audio_mime_type(Path::new("c.ogg")), None);
        assert_eq!(audio_mime_type(Path::new("noext")), None);
    }

    #[test]
    fn test_loads_supported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cough.wav");
        fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let file = load_cough_file(path.to_str().unwrap()).unwrap().unwrap();
        assert_eq!(file.name, "cough.wav");
        assert_eq!(file.mime_type, "audio/wav");
        assert_eq!(file.bytes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_strips_quotes_and_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cough.mp3");
        fs::write(&path, [9u8]).unwrap();

        let typed = format!("  '{}' ", path.display());
        let file = load_cough_file(&typed).unwrap().unwrap();
        assert_eq!(file.mime_type, "audio/mpeg");
    }

    #[test]
    fn test_ignores_unsupported_type_without_reading() {
        // The file does not exist; an unsupported extension must not even try to open it.
        let result = load_cough_file("/definitely/missing/notes.txt").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_supported_file_is_an_error() {
        assert!(load_cough_file("/definitely/missing/cough.wav").is_err());
    }
}
