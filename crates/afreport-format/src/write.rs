//! Report result persistence.

use afreport_types::Record;
use std::fs;
use std::path::Path;

use crate::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

/// Writes a report result to `path` in the requested format.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if directory creation or writing fails.
pub fn persist_records(
    records: &[Record],
    path: &Path,
    format: OutputFormat,
) -> Result<(), FormatError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;

    match format {
        OutputFormat::Csv => CsvFormatter::new().write_records(records, file),
        OutputFormat::Json => JsonFormatter::new().write_records(records, file),
    }
}
