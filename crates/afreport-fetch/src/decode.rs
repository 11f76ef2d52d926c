//! Streaming CSV decoding.
//!
//! The reporting API answers CSV exports with HTTP 200 even when the request
//! failed; the failure shows up as an HTML login page in the body. The
//! decoder therefore checks the first physical line for an HTML marker before
//! yielding anything.

use bytes::{Buf, BytesMut};
use csv_async::{AsyncReaderBuilder, StringRecord};
use encoding_rs::Encoding;
use thiserror::Error;
use tokio::io::AsyncRead;
use tokio_util::codec::{Decoder, FramedRead};
use tokio_util::io::StreamReader;

use afreport_types::Record;

/// Literal marking an HTML error page disguised as a CSV body.
pub const HTML_MARKER: &str = "<!DOCTYPE html>";

/// How decoded rows are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Plain ordered field sequences.
    Positional {
        /// Field delimiter byte.
        delimiter: u8,
        /// Quote character byte.
        quote: u8,
    },
    /// Header-keyed rows; the first line is the header.
    Keyed,
}

impl Default for DecodeMode {
    fn default() -> Self {
        Self::Positional {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Errors that can occur during stream decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The body is an HTML error page, not CSV.
    #[error("API returned an HTML payload instead of CSV; check the API key and endpoint")]
    HtmlPayload,

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// Reading the stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Incremental transcoder from a source text encoding to UTF-8.
///
/// A leading byte order mark matching the encoding is dropped, so the default
/// UTF-8 configuration behaves like the `utf-8-sig` codec.
struct Transcode {
    decoder: encoding_rs::Decoder,
    flushed: bool,
}

impl Transcode {
    fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder_with_bom_removal(),
            flushed: false,
        }
    }
}

impl Decoder for Transcode {
    type Item = BytesMut;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let mut out = vec![
            0;
            self.decoder
                .max_utf8_buffer_length_without_replacement(src.len())
                .unwrap_or(src.len() * 2)
        ];
        let (_result, read, written, _had_errors) =
            self.decoder.decode_to_utf8(src, &mut out, false);

        if read == 0 && written == 0 {
            // Need more input to make progress (e.g. a split BOM).
            return Ok(None);
        }

        src.advance(read);
        Ok(Some(BytesMut::from(&out[..written])))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // The final call runs even with an empty buffer: a partial sequence
        // consumed earlier still sits inside the decoder and must be flushed
        // (as U+FFFD) exactly once.
        if self.flushed {
            return Ok(None);
        }
        self.flushed = true;

        let mut out = vec![
            0;
            self.decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len() * 2)
        ];
        let (_result, _read, written, _had_errors) =
            self.decoder.decode_to_utf8(src, &mut out, true);
        src.clear();

        if written > 0 {
            Ok(Some(BytesMut::from(&out[..written])))
        } else {
            Ok(None)
        }
    }
}

/// Decodes a streamed CSV body into ordered records.
///
/// The body is transcoded from `encoding` to UTF-8 and parsed row by row
/// without buffering the whole stream. The first physical line (the header in
/// keyed mode) is checked for [`HTML_MARKER`]; later rows are not checked.
///
/// # Errors
///
/// Fails with [`DecodeError::HtmlPayload`] when the first line is an HTML
/// error page, or with a CSV/I/O error when the stream is malformed.
pub async fn decode_csv<R>(
    reader: R,
    mode: DecodeMode,
    encoding: &'static Encoding,
) -> Result<Vec<Record>, DecodeError>
where
    R: AsyncRead + Unpin + Send,
{
    let transcoded = StreamReader::new(FramedRead::new(reader, Transcode::new(encoding)));

    match mode {
        DecodeMode::Keyed => {
            let mut rdr = AsyncReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .create_reader(transcoded);

            let headers = rdr.headers().await?.clone();
            check_first_line(&headers)?;

            let mut records = Vec::new();
            let mut row = StringRecord::new();
            while rdr.read_record(&mut row).await? {
                let pairs = headers
                    .iter()
                    .zip(row.iter())
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect();
                records.push(Record::Keyed(pairs));
            }
            Ok(records)
        }
        DecodeMode::Positional { delimiter, quote } => {
            let mut rdr = AsyncReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .delimiter(delimiter)
                .quote(quote)
                .create_reader(transcoded);

            let mut records = Vec::new();
            let mut row = StringRecord::new();
            while rdr.read_record(&mut row).await? {
                if records.is_empty() {
                    check_first_line(&row)?;
                }
                records.push(Record::Positional(row.iter().map(str::to_string).collect()));
            }
            Ok(records)
        }
    }
}

/// Rejects a first line whose rendered text contains the HTML marker.
fn check_first_line(row: &StringRecord) -> Result<(), DecodeError> {
    let rendered = row.iter().collect::<Vec<_>>().join(",");
    if rendered.contains(HTML_MARKER) {
        return Err(DecodeError::HtmlPayload);
    }
    Ok(())
}
