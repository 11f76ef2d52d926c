//! Output formatters for afreport.
//!
//! This crate provides persistence for fetched report results:
//!
//! - [`CsvFormatter`] - CSV format (default dialect)
//! - [`JsonFormatter`] - JSON array format
//! - [`OutputPath`] - Output path composition and random filenames
//! - [`persist_records`] - Writes a report result to disk

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod path;
mod write;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::JsonFormatter;
pub use path::{OutputPath, random_filename};
pub use write::persist_records;
