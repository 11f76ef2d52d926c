//! Per-report fetch orchestration.

use thiserror::Error;
use tracing::debug;

use afreport_fetch::{
    DecodeError, ReportClient, RequestError, UrlError, decode_csv, url::report_url,
};
use afreport_format::{FormatError, OutputFormat, OutputPath, persist_records};
use afreport_types::{Record, ReportError, ReportFamily, Result, validate};

use crate::Settings;

/// Persistence directive for a single fetch.
#[derive(Debug, Clone)]
pub struct PersistSpec {
    /// Output format of the written copy.
    pub format: OutputFormat,
    /// Caller-supplied base filename; a random unique name when absent.
    pub filename: Option<String>,
    /// Sub-folder under the base output directory.
    pub subfolder: Option<String>,
    /// Whether to add a `YYYY/MM/DD` sub-path.
    pub date_stamped: bool,
}

impl PersistSpec {
    /// A CSV copy with a generated filename.
    #[must_use]
    pub const fn csv() -> Self {
        Self {
            format: OutputFormat::Csv,
            filename: None,
            subfolder: None,
            date_stamped: false,
        }
    }

    /// A JSON copy with a generated filename.
    #[must_use]
    pub const fn json() -> Self {
        Self {
            format: OutputFormat::Json,
            filename: None,
            subfolder: None,
            date_stamped: false,
        }
    }

    /// Sets the base filename.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the sub-folder.
    #[must_use]
    pub fn with_subfolder(mut self, subfolder: impl Into<String>) -> Self {
        self.subfolder = Some(subfolder.into());
        self
    }

    /// Enables the date-stamped sub-path.
    #[must_use]
    pub const fn with_date_stamp(mut self, stamped: bool) -> Self {
        self.date_stamped = stamped;
        self
    }
}

/// Parameters for one report fetch.
///
/// The report name travels with the request; nothing is stored on the client
/// between calls.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub(crate) report_name: String,
    pub(crate) from_date: Option<String>,
    pub(crate) to_date: Option<String>,
    pub(crate) timezone: Option<String>,
    pub(crate) retargeting: bool,
    pub(crate) alternate_fields: bool,
    pub(crate) keyed: bool,
    pub(crate) persist: Option<PersistSpec>,
}

impl ReportRequest {
    /// Creates a request for the named report with defaults everywhere else.
    pub fn new(report_name: impl Into<String>) -> Self {
        Self {
            report_name: report_name.into(),
            from_date: None,
            to_date: None,
            timezone: None,
            retargeting: false,
            alternate_fields: false,
            keyed: false,
            persist: None,
        }
    }

    /// Sets both date bounds (`YYYY-MM-DD`).
    #[must_use]
    pub fn with_dates(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_date = Some(from.into());
        self.to_date = Some(to.into());
        self
    }

    /// Sets the timezone identifier.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Requests the retargeting variant (`reattr=true`).
    #[must_use]
    pub const fn with_retargeting(mut self, retargeting: bool) -> Self {
        self.retargeting = retargeting;
        self
    }

    /// Requests the alternate additional-fields list.
    #[must_use]
    pub const fn with_alternate_fields(mut self, alternate: bool) -> Self {
        self.alternate_fields = alternate;
        self
    }

    /// Requests header-keyed records instead of positional ones.
    #[must_use]
    pub const fn with_keyed_records(mut self, keyed: bool) -> Self {
        self.keyed = keyed;
        self
    }

    /// Writes a copy of the result to disk.
    #[must_use]
    pub fn with_persistence(mut self, spec: PersistSpec) -> Self {
        self.persist = Some(spec);
        self
    }
}

/// Failures from the individual fetch steps, before public translation.
#[derive(Error, Debug)]
enum FetchStepError {
    #[error(transparent)]
    Known(#[from] ReportError),
    #[error(transparent)]
    Url(#[from] UrlError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Client for the AppsFlyer reporting API.
#[derive(Debug, Clone)]
pub struct AppsFlyerClient {
    pub(crate) application: String,
    pub(crate) settings: Settings,
    http: ReportClient,
}

impl AppsFlyerClient {
    /// Creates a client for the given application.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(application: impl Into<String>, settings: Settings) -> Result<Self> {
        let http = ReportClient::with_defaults().map_err(ReportError::unknown)?;
        Ok(Self {
            application: application.into(),
            settings,
            http,
        })
    }

    /// Creates a client with an explicit HTTP client.
    #[must_use]
    pub fn with_http(application: impl Into<String>, settings: Settings, http: ReportClient) -> Self {
        Self {
            application: application.into(),
            settings,
            http,
        }
    }

    /// Returns the application name.
    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Fetches one report as a CSV stream and decodes it into records.
    ///
    /// Validates inputs, substitutes the default date range when either bound
    /// is absent, performs the streamed GET, decodes within the stream's
    /// lifetime, and optionally persists a copy.
    ///
    /// # Errors
    ///
    /// `Validation` for bad names, dates, or an HTML payload;
    /// `Authentication` for a missing API key; `Processing` for transport,
    /// decoding, or persistence failures; `Unknown` for anything else.
    pub async fn get_report(
        &self,
        family: &ReportFamily,
        request: &ReportRequest,
    ) -> Result<Vec<Record>> {
        self.fetch_report(family, request)
            .await
            .map_err(translate)
    }

    /// Fetches a report endpoint on the plain-JSON path.
    ///
    /// # Errors
    ///
    /// `Validation` for an unknown report name; `Authentication` for a
    /// missing API key; `Communication` for a non-200 status or transport
    /// failure.
    pub async fn get_json(
        &self,
        family: &ReportFamily,
        report_name: &str,
        extra: &[(String, String)],
    ) -> Result<serde_json::Value> {
        validate::validate_report_name(report_name, family.report_names())?;

        let url = report_url(
            &self.settings.host,
            &self.application,
            report_name,
            &self.settings.api_key,
            extra,
        )
        .map_err(|err| match err {
            UrlError::MissingApiKey => ReportError::Authentication(err.to_string()),
            other => ReportError::unknown(other),
        })?;
        debug!(%url, "prepared report url");

        self.http.get_json(&url).await.map_err(|err| match err {
            RequestError::Status { status } => ReportError::status(status),
            RequestError::Http(err) => ReportError::communication(err.to_string()),
        })
    }

    /// The low-level fetch pipeline; errors keep their native kinds.
    async fn fetch_report(
        &self,
        family: &ReportFamily,
        request: &ReportRequest,
    ) -> std::result::Result<Vec<Record>, FetchStepError> {
        validate::validate_dates_and_names(
            &request.report_name,
            family.report_names(),
            request.from_date.as_deref(),
            request.to_date.as_deref(),
        )?;

        let (from, to) = match (&request.from_date, &request.to_date) {
            (Some(from), Some(to)) => (from.clone(), to.clone()),
            _ => validate::default_date_range(self.settings.default_days_back),
        };
        let timezone = request
            .timezone
            .clone()
            .unwrap_or_else(|| self.settings.default_timezone.clone());

        let mut extra: Vec<(String, String)> = vec![
            ("from".into(), from),
            ("to".into(), to),
            ("timezone".into(), timezone),
        ];
        let fields = if request.alternate_fields {
            family.alternate_fields()
        } else {
            family.additional_fields()
        };
        if !fields.is_empty() {
            extra.push(("additional_fields".into(), fields.join(",")));
        }
        if request.retargeting {
            extra.push(("reattr".into(), "true".into()));
        }

        let url = report_url(
            &self.settings.host,
            &self.application,
            &request.report_name,
            &self.settings.api_key,
            &extra,
        )?;
        debug!(%url, "prepared report url");

        // The decoder drains the reader before it is dropped; decoding never
        // outlives the response stream.
        let reader = self.http.get_stream(&url).await?;
        let mode = self.settings.decode_mode(request.keyed);
        let records = decode_csv(reader, mode, self.settings.encoding).await?;

        if let Some(spec) = &request.persist {
            let mut out =
                OutputPath::new(&self.settings.output_dir, spec.format).with_date_stamp(spec.date_stamped);
            if let Some(subfolder) = &spec.subfolder {
                out = out.with_subfolder(subfolder);
            }
            if let Some(filename) = &spec.filename {
                out = out.with_filename(filename);
            }
            let path = out.resolve();
            persist_records(&records, &path, spec.format)?;
            debug!(path = %path.display(), "persisted report copy");
        }

        Ok(records)
    }
}

/// Maps step failures onto the public error taxonomy.
fn translate(err: FetchStepError) -> ReportError {
    match err {
        FetchStepError::Known(err) => err,
        FetchStepError::Url(UrlError::MissingApiKey) => {
            ReportError::Authentication(UrlError::MissingApiKey.to_string())
        }
        FetchStepError::Url(err) => ReportError::unknown(err),
        FetchStepError::Request(err) => ReportError::processing("fetching report stream", err),
        FetchStepError::Decode(err @ DecodeError::HtmlPayload) => {
            ReportError::Validation(err.to_string())
        }
        FetchStepError::Decode(err) => ReportError::processing("decoding report stream", err),
        FetchStepError::Format(err) => ReportError::processing("writing report copy", err),
    }
}
