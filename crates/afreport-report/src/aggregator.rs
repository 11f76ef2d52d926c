//! Batch aggregation over a report family.

use afreport_types::{Record, ReportFamily, Result, validate};

use crate::{AppsFlyerClient, PersistSpec, ReportRequest};

/// One aggregated result, keyed by report name (with a `_retargeting` suffix
/// for retargeting variants).
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// Report identifier.
    pub key: String,
    /// The fetched records.
    pub records: Vec<Record>,
}

/// Ordered batch results, following family iteration order with each
/// retargeting entry immediately after its base entry.
pub type BatchResult = Vec<BatchEntry>;

/// Options shared by every fetch in a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Report names dropped from the primary sequence.
    pub exclude_reports: Vec<String>,
    /// Names whose extra retargeting call is skipped. Filters only the
    /// retargeting-eligible subset; the base report still appears in the
    /// primary sequence.
    pub exclude_retargeting: Vec<String>,
    /// From-date bound (`YYYY-MM-DD`).
    pub from_date: Option<String>,
    /// To-date bound (`YYYY-MM-DD`).
    pub to_date: Option<String>,
    /// Timezone identifier.
    pub timezone: Option<String>,
    /// Whether rows are decoded as header-keyed records.
    pub keyed: bool,
    /// Persistence directive applied to every fetch.
    pub persist: Option<PersistSpec>,
}

impl BatchOptions {
    /// Creates empty options: all reports, default dates, positional rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Excludes reports from the primary sequence.
    #[must_use]
    pub fn exclude_reports<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.exclude_reports = names.into_iter().map(Into::into).collect();
        self
    }

    /// Excludes reports from the extra retargeting call.
    #[must_use]
    pub fn exclude_retargeting<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.exclude_retargeting = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets both date bounds.
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

    /// Requests header-keyed records.
    #[must_use]
    pub const fn with_keyed_records(mut self, keyed: bool) -> Self {
        self.keyed = keyed;
        self
    }

    /// Applies a persistence directive to every fetch.
    #[must_use]
    pub fn with_persistence(mut self, spec: PersistSpec) -> Self {
        self.persist = Some(spec);
        self
    }

    fn request_for(&self, report_name: &str) -> ReportRequest {
        let mut request = ReportRequest::new(report_name)
            .with_keyed_records(self.keyed);
        if let (Some(from), Some(to)) = (&self.from_date, &self.to_date) {
            request = request.with_dates(from, to);
        }
        if let Some(timezone) = &self.timezone {
            request = request.with_timezone(timezone);
        }
        if let Some(spec) = &self.persist {
            request = request.with_persistence(spec.clone());
        }
        request
    }
}

impl AppsFlyerClient {
    /// Fetches every report in the family, one at a time, in family order.
    ///
    /// Retargeting-eligible reports produce a second entry keyed
    /// `{name}_retargeting` immediately after the base entry;
    /// alternate-field reports are fetched with the alternate field list.
    /// The first failure aborts the remaining iteration.
    ///
    /// # Errors
    ///
    /// Propagates the first per-report failure unchanged.
    pub async fn get_all_reports(
        &self,
        family: &ReportFamily,
        options: &BatchOptions,
    ) -> Result<BatchResult> {
        let effective = if options.exclude_reports.is_empty() {
            family.report_names().to_vec()
        } else {
            validate::exclude_names(family.report_names(), &options.exclude_reports)
        };
        // Filters the retargeting subset only; the primary sequence is
        // untouched by retargeting exclusions.
        let retargeting = if options.exclude_retargeting.is_empty() {
            family.retargeting_eligible().to_vec()
        } else {
            validate::exclude_names(family.retargeting_eligible(), &options.exclude_retargeting)
        };

        let mut results = BatchResult::with_capacity(effective.len());
        for name in &effective {
            if retargeting.contains(name) {
                let records = self
                    .get_report(family, &options.request_for(name))
                    .await?;
                results.push(BatchEntry {
                    key: name.clone(),
                    records,
                });

                let request = options.request_for(name).with_retargeting(true);
                let records = self.get_report(family, &request).await?;
                results.push(BatchEntry {
                    key: format!("{name}_retargeting"),
                    records,
                });
            } else if family.uses_alternate_fields(name) {
                let request = options.request_for(name).with_alternate_fields(true);
                let records = self.get_report(family, &request).await?;
                results.push(BatchEntry {
                    key: name.clone(),
                    records,
                });
            } else {
                let records = self
                    .get_report(family, &options.request_for(name))
                    .await?;
                results.push(BatchEntry {
                    key: name.clone(),
                    records,
                });
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Settings, families};
    use afreport_types::ReportError;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> AppsFlyerClient {
        let settings = Settings::default()
            .with_host(server.uri())
            .with_api_key("some_api_key");
        AppsFlyerClient::new("TestApp", settings).unwrap()
    }

    async fn mount_catch_all(server: &MockServer) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("h1,h2\nv1,v2\n"))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_raw_data_expansion_order() {
        let server = MockServer::start().await;
        mount_catch_all(&server).await;
        let client = client_for(&server).await;

        let results = client
            .get_all_reports(&families::raw_data(), &BatchOptions::new())
            .await
            .unwrap();

        let keys: Vec<&str> = results.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "installs_report",
                "installs_report_retargeting",
                "in_app_events_report",
                "in_app_events_report_retargeting",
                "organic_installs_report",
                "organic_in_app_events_report",
                "uninstall_events_report",
            ]
        );
        assert_eq!(server.received_requests().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_retargeting_requests_carry_flag() {
        let server = MockServer::start().await;
        mount_catch_all(&server).await;
        let client = client_for(&server).await;

        client
            .get_all_reports(&families::raw_data(), &BatchOptions::new())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let with_reattr = requests
            .iter()
            .filter(|r| r.url.query_pairs().any(|(k, v)| k == "reattr" && v == "true"))
            .count();
        assert_eq!(with_reattr, 2);
    }

    #[tokio::test]
    async fn test_exclude_reports_filters_primary_sequence() {
        let server = MockServer::start().await;
        mount_catch_all(&server).await;
        let client = client_for(&server).await;

        let options = BatchOptions::new().exclude_reports(vec![
            "in_app_events_report",
            "organic_in_app_events_report",
        ]);
        let results = client
            .get_all_reports(&families::raw_data(), &options)
            .await
            .unwrap();

        let keys: Vec<&str> = results.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "installs_report",
                "installs_report_retargeting",
                "organic_installs_report",
                "uninstall_events_report",
            ]
        );
    }

    #[tokio::test]
    async fn test_exclude_retargeting_keeps_base_entry() {
        let server = MockServer::start().await;
        mount_catch_all(&server).await;
        let client = client_for(&server).await;

        let options = BatchOptions::new().exclude_retargeting(vec!["installs_report"]);
        let results = client
            .get_all_reports(&families::raw_data(), &options)
            .await
            .unwrap();

        let keys: Vec<&str> = results.iter().map(|e| e.key.as_str()).collect();
        // installs_report stays in the primary sequence; only its extra
        // retargeting call disappears.
        assert_eq!(
            keys,
            vec![
                "installs_report",
                "in_app_events_report",
                "in_app_events_report_retargeting",
                "organic_installs_report",
                "organic_in_app_events_report",
                "uninstall_events_report",
            ]
        );
    }

    #[tokio::test]
    async fn test_performance_family_plain_expansion() {
        let server = MockServer::start().await;
        mount_catch_all(&server).await;
        let client = client_for(&server).await;

        let results = client
            .get_all_reports(&families::performance(), &BatchOptions::new())
            .await
            .unwrap();

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|e| !e.key.ends_with("_retargeting")));
    }

    #[tokio::test]
    async fn test_first_failure_aborts_iteration() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let err = client
            .get_all_reports(&families::raw_data(), &BatchOptions::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::Processing { .. }));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
