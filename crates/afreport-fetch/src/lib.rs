//! HTTP client and streaming CSV decoding for afreport.
//!
//! This crate provides the request/response pipeline:
//!
//! - [`url::report_url`] - Constructs authenticated report endpoint URLs
//! - [`ReportClient`] - HTTP client with explicit timeouts
//! - [`decode_csv`] - Streaming CSV decoder with transcoding and
//!   HTML-error detection

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod decode;
pub mod url;

pub use client::{ClientConfig, ReportClient, RequestError};
pub use decode::{DecodeError, DecodeMode, HTML_MARKER, decode_csv};
pub use url::UrlError;
