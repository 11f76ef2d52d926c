//! Unofficial Rust client for the AppsFlyer reporting API.
//!
//! This is a facade crate that re-exports functionality from the afreport
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use afreport::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env();
//!     let client = AppsFlyerClient::new("my_application", settings)?;
//!
//!     let family = families::raw_data();
//!     let request = ReportRequest::new("installs_report")
//!         .with_dates("2024-01-01", "2024-01-31")
//!         .with_keyed_records(true);
//!
//!     let records = client.get_report(&family, &request).await?;
//!     println!("fetched {} rows", records.len());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use afreport_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use afreport_fetch::{
    ClientConfig, DecodeError, DecodeMode, HTML_MARKER, ReportClient, RequestError, UrlError,
    decode_csv, url,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use afreport_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat, OutputPath,
    persist_records, random_filename,
};

// Re-export report fetching and aggregation
#[cfg(feature = "report")]
pub use afreport_report::{
    AppsFlyerClient, BatchEntry, BatchOptions, BatchResult, PersistSpec, ReportRequest, Settings,
    families,
};

/// Prelude module for convenient imports.
///
/// ```
/// use afreport::prelude::*;
/// ```
pub mod prelude {
    pub use afreport_types::{Record, ReportError, ReportFamily, Result, validate};

    #[cfg(feature = "fetch")]
    pub use afreport_fetch::{ClientConfig, DecodeMode, ReportClient, decode_csv};

    #[cfg(feature = "format")]
    pub use afreport_format::{Formatter, OutputFormat, OutputPath};

    #[cfg(feature = "report")]
    pub use afreport_report::{
        AppsFlyerClient, BatchOptions, PersistSpec, ReportRequest, Settings, families,
    };
}
