//! Report fetching and batch aggregation for afreport.
//!
//! This crate drives the request/response pipeline end to end:
//!
//! - [`Settings`] - Environment-backed client configuration
//! - [`families`] - Built-in report family definitions
//! - [`AppsFlyerClient`] - Per-report fetcher with error translation
//! - [`AppsFlyerClient::get_all_reports`] - Batch aggregation over a family

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
pub mod families;
mod fetcher;
mod settings;

pub use aggregator::{BatchEntry, BatchOptions, BatchResult};
pub use fetcher::{AppsFlyerClient, PersistSpec, ReportRequest};
pub use settings::Settings;
