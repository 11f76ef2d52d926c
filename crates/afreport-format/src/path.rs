//! Output path composition and filename generation.

use chrono::Local;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::OutputFormat;

/// Returns a filename for the given format.
///
/// With no base name, a random `{uuid-v4}.{ext}` name is generated. A
/// supplied base name keeps its stem and has its extension normalized to the
/// format's.
#[must_use]
pub fn random_filename(filename: Option<&str>, format: OutputFormat) -> String {
    match filename {
        Some(name) => {
            let stem = Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(name);
            format!("{stem}.{}", format.extension())
        }
        None => format!("{}.{}", Uuid::new_v4(), format.extension()),
    }
}

/// Builder for report output file paths.
///
/// A resolved path is composed of the base output directory, an optional
/// sub-folder, an optional `YYYY/MM/DD` date-stamped sub-path, and the
/// filename.
#[derive(Debug, Clone)]
pub struct OutputPath {
    base_dir: PathBuf,
    subfolder: Option<String>,
    date_stamped: bool,
    filename: Option<String>,
    format: OutputFormat,
}

impl OutputPath {
    /// Creates a path builder rooted at the given output directory.
    pub fn new(base_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            base_dir: base_dir.into(),
            subfolder: None,
            date_stamped: false,
            filename: None,
            format,
        }
    }

    /// Adds a sub-folder under the base directory.
    #[must_use]
    pub fn with_subfolder(mut self, subfolder: impl Into<String>) -> Self {
        self.subfolder = Some(subfolder.into());
        self
    }

    /// Adds a `YYYY/MM/DD` sub-path for today's local date.
    #[must_use]
    pub const fn with_date_stamp(mut self, stamped: bool) -> Self {
        self.date_stamped = stamped;
        self
    }

    /// Sets the caller-supplied base filename.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Resolves the full output path, generating a random filename when none
    /// was supplied.
    #[must_use]
    pub fn resolve(&self) -> PathBuf {
        let mut path = self.base_dir.clone();
        if let Some(subfolder) = &self.subfolder {
            path.push(subfolder);
        }
        if self.date_stamped {
            let today = Local::now().date_naive();
            path.push(today.format("%Y/%m/%d").to_string());
        }
        path.push(random_filename(self.filename.as_deref(), self.format));
        path
    }
}
