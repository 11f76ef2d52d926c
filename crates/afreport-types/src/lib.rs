//! Core types for the afreport AppsFlyer reporting client.
//!
//! This crate provides the fundamental data structures used throughout
//! afreport:
//!
//! - [`ReportError`] - The public error taxonomy
//! - [`Record`] - A single decoded report row
//! - [`ReportFamily`] - A named group of related report endpoints
//! - [`validate`] - Date and report-name validation helpers

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod family;
mod record;
pub mod validate;

pub use error::{ReportError, Result};
pub use family::ReportFamily;
pub use record::Record;
