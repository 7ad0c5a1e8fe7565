//! JSON document I/O shared by the catalog and the answer store

use crate::error::{Result, SurveyError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const INDENT: &[u8] = b"    ";

/// Read and decode a JSON document
///
/// # Errors
/// - `SurveyError::Io` if the file cannot be opened
/// - `SurveyError::Json` if the content does not decode into `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path).map_err(|e| SurveyError::io_error(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| SurveyError::json_error(path, e))
}

/// Encode a value as indented JSON, non-ASCII text left unescaped
///
/// # Errors
/// `SurveyError::Json` if `value` cannot be serialized
pub fn to_pretty_json<T: Serialize>(value: &T, path: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| SurveyError::json_error(path, e))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Replace `path` with the JSON encoding of `value`
///
/// The document is written to a temporary file beside `path` and renamed over
/// it, so readers see either the old or the new document.
///
/// # Errors
/// - `SurveyError::Json` if `value` cannot be serialized
/// - `SurveyError::Io` if the temporary file cannot be written
/// - `SurveyError::Persist` if the rename fails
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = to_pretty_json(value, path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SurveyError::io_error(dir, e))?;
    tmp.write_all(&bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| SurveyError::io_error(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| SurveyError::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Copy `src` to `dst` byte for byte, creating parent directories of `dst`
///
/// # Errors
/// `SurveyError::Io` naming whichever side failed
pub fn copy_verbatim(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SurveyError::io_error(parent, e))?;
    }
    let bytes = std::fs::read(src).map_err(|e| SurveyError::io_error(src, e))?;
    std::fs::write(dst, bytes).map_err(|e| SurveyError::io_error(dst, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_json_keeps_umlauts_and_uses_four_spaces() {
        let bytes = to_pretty_json(&json!({"text": "weniger Lärm"}), Path::new("x")).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("weniger Lärm"));
        assert!(text.contains("\n    \"text\""));
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{}").unwrap();

        write_json_atomic(&path, &json!({"scenarios": []})).unwrap();

        let back: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(back, json!({"scenarios": []}));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn read_json_reports_path_on_bad_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, SurveyError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn copy_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("template.json");
        let dst = dir.path().join("nested/state/store.json");
        std::fs::write(&src, "{\"scenarios\": []}").unwrap();

        copy_verbatim(&src, &dst).unwrap();
        assert_eq!(std::fs::read(&src).unwrap(), std::fs::read(&dst).unwrap());
    }
}
