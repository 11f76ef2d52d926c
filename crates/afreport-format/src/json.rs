//! JSON output format.

use afreport_types::Record;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON formatter writing the full report result as one array.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Whether to pretty-print.
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Sets whether to pretty-print output.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_records<W: Write + Send>(
        &self,
        records: &[Record],
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, records)?;
        } else {
            serde_json::to_writer(&mut writer, records)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_json_array() {
        let formatter = JsonFormatter::new();
        let records = vec![
            Record::Keyed(vec![("installs".into(), "42".into())]),
            Record::Keyed(vec![("installs".into(), "7".into())]),
        ];
        let mut output = Cursor::new(Vec::new());

        formatter.write_records(&records, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result.trim_end(), r#"[{"installs":"42"},{"installs":"7"}]"#);
    }

    #[test]
    fn test_pretty_json() {
        let formatter = JsonFormatter::new().with_pretty(true);
        let records = vec![Record::Positional(vec!["x".into()])];
        let mut output = Cursor::new(Vec::new());

        formatter.write_records(&records, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains('\n'));
        assert!(result.contains("  "));
    }
}
