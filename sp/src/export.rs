//! Report export to a plain-text file

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::wizard::{Field, ValidationError};

/// Extension appended to every exported report
pub const REPORT_EXTENSION: &str = "txt";

/// Errors from exporting a report
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes compiled reports as `<name>.txt` into a directory
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a report named `filename` would be written to
    pub fn artifact_path(&self, filename: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", filename, REPORT_EXTENSION))
    }

    /// Write `content` verbatim to `<dir>/<filename>.txt`
    ///
    /// Existing files are overwritten. The filename is used as given.
    pub fn export_report(&self, content: &str, filename: &str) -> Result<PathBuf, ExportError> {
        debug!(content_len = content.len(), %filename, "export_report: called");
        if content.is_empty() {
            return Err(ValidationError::MissingField(Field::Report).into());
        }
        if filename.trim().is_empty() {
            return Err(ValidationError::MissingField(Field::Filename).into());
        }

        let path = self.artifact_path(filename);
        fs::write(&path, content).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Report saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_literal_content() {
        let temp = tempdir().unwrap();
        let exporter = Exporter::new(temp.path());
        let content = "Strategic Plan Document\n\nline with trailing spaces   \n";

        let path = exporter.export_report(content, "my-plan").unwrap();

        assert_eq!(path, temp.path().join("my-plan.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_export_requires_content() {
        let temp = tempdir().unwrap();
        let exporter = Exporter::new(temp.path());
        let err = exporter.export_report("", "name").unwrap_err();
        assert!(matches!(
            err,
            ExportError::Validation(ValidationError::MissingField(Field::Report))
        ));
        assert!(!temp.path().join("name.txt").exists());
    }

    #[test]
    fn test_export_requires_filename() {
        let temp = tempdir().unwrap();
        let exporter = Exporter::new(temp.path());
        let err = exporter.export_report("content", "").unwrap_err();
        assert!(matches!(
            err,
            ExportError::Validation(ValidationError::MissingField(Field::Filename))
        ));
    }

    #[test]
    fn test_export_overwrites_existing() {
        let temp = tempdir().unwrap();
        let exporter = Exporter::new(temp.path());
        exporter.export_report("first", "plan").unwrap();
        exporter.export_report("second", "plan").unwrap();
        assert_eq!(fs::read_to_string(temp.path().join("plan.txt")).unwrap(), "second");
    }

    #[test]
    fn test_export_into_missing_dir_is_io_error() {
        let temp = tempdir().unwrap();
        let exporter = Exporter::new(temp.path().join("does/not/exist"));
        assert!(matches!(
            exporter.export_report("content", "plan"),
            Err(ExportError::Io { .. })
        ));
    }
}
