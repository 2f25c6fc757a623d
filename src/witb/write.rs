use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Errors that can occur while writing an output file.
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("I/O error writing '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed for '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes `value` as pretty JSON, replacing `path` in one rename.
///
/// The document is first written to a sibling `.tmp` file so readers never
/// observe a half-written index.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), WriteError> {
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = (|| {
        let mut writer = BufWriter::new(File::create(&tmp_path).map_err(io_err)?);
        serde_json::to_writer_pretty(&mut writer, value).map_err(|source| WriteError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        fs::rename(&tmp_path, path).map_err(io_err)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "witb_write_{}_{}_{}",
            name,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .subsec_nanos()
        ))
    }

    #[test]
    fn test_write_creates_parent_and_replaces() {
        let dir = scratch_dir("replace");
        let path = dir.join("nested").join("out.json");

        write_json_atomic(&path, &vec!["a", "b"]).unwrap();
        write_json_atomic(&path, &vec!["c"]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vec!["c".to_string()]);
        assert!(text.contains("\n  \"c\""));
        assert!(!dir.join("nested").join("out.json.tmp").exists());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_write_into_unwritable_location_fails() {
        let dir = scratch_dir("blocked");
        std::fs::create_dir_all(&dir).unwrap();
        // A file where a directory is expected.
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let err = write_json_atomic(&blocker.join("out.json"), &1).unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));

        std::fs::remove_dir_all(dir).ok();
    }
}
