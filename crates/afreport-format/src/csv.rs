//! CSV output format.

use afreport_types::Record;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter using the standard writer with the default dialect.
///
/// Keyed records emit a header row taken from the first record.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Creates a new CSV formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn write_records<W: Write + Send>(
        &self,
        records: &[Record],
        writer: W,
    ) -> Result<(), FormatError> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);

        if let Some(headers) = records.first().and_then(Record::headers) {
            wtr.write_record(&headers)?;
        }
        for record in records {
            wtr.write_record(record.values())?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_csv_keyed_records() {
        let formatter = CsvFormatter::new();
        let records = vec![
            Record::Keyed(vec![
                ("media_source".into(), "organic".into()),
                ("installs".into(), "42".into()),
            ]),
            Record::Keyed(vec![
                ("media_source".into(), "paid".into()),
                ("installs".into(), "7".into()),
            ]),
        ];
        let mut output = Cursor::new(Vec::new());

        formatter.write_records(&records, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines, vec!["media_source,installs", "organic,42", "paid,7"]);
    }

    #[test]
    fn test_csv_positional_records() {
        let formatter = CsvFormatter::new();
        let records = vec![
            Record::Positional(vec!["a".into(), "b".into()]),
            Record::Positional(vec!["1".into(), "2".into()]),
        ];
        let mut output = Cursor::new(Vec::new());

        formatter.write_records(&records, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result.lines().collect::<Vec<_>>(), vec!["a,b", "1,2"]);
    }

    #[test]
    fn test_csv_quotes_embedded_delimiters() {
        let formatter = CsvFormatter::new();
        let records = vec![Record::Positional(vec!["x,y".into(), "plain".into()])];
        let mut output = Cursor::new(Vec::new());

        formatter.write_records(&records, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result.trim_end(), "\"x,y\",plain");
    }
}
