//! Report endpoint URL construction.

use thiserror::Error;
use url::Url;

/// Path literal selecting the export action.
pub const API_ACTION: &str = "export";

/// Reporting API version literal.
pub const API_VERSION: &str = "v5";

/// Errors that can occur while building a report URL.
#[derive(Error, Debug)]
pub enum UrlError {
    /// No API key configured.
    #[error("API key not provided")]
    MissingApiKey,

    /// The base host is not a valid URL.
    #[error("invalid base URL: {0}")]
    Invalid(#[from] url::ParseError),

    /// The base host cannot carry path segments (e.g. `data:` URLs).
    #[error("base URL cannot carry path segments: {0}")]
    CannotBeBase(String),
}

/// Builds the URL for a report endpoint:
/// `{host}/export/{application}/{report_name}/v5?api_token={key}&{...extra}`.
///
/// Path segments are percent-encoded. The query starts with `api_token` and
/// is extended by `extra` in caller order; a duplicate key within `extra`
/// overwrites the earlier value while keeping its original position.
///
/// # Errors
///
/// Fails with [`UrlError::MissingApiKey`] before any other work when the key
/// is empty, or with a parse error for a malformed host.
///
/// # Example
///
/// ```
/// use afreport_fetch::url::report_url;
///
/// let url = report_url(
///     "https://hq.appsflyer.com",
///     "BaseTestAppName",
///     "some_report_name",
///     "some_api_key",
///     &[],
/// )
/// .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://hq.appsflyer.com/export/BaseTestAppName/some_report_name/v5?api_token=some_api_key"
/// );
/// ```
pub fn report_url(
    host: &str,
    application: &str,
    report_name: &str,
    api_key: &str,
    extra: &[(String, String)],
) -> Result<Url, UrlError> {
    if api_key.is_empty() {
        return Err(UrlError::MissingApiKey);
    }

    let mut url = Url::parse(host)?;
    url.path_segments_mut()
        .map_err(|()| UrlError::CannotBeBase(host.to_string()))?
        .pop_if_empty()
        .extend([API_ACTION, application, report_name, API_VERSION]);

    // Later duplicate keys overwrite earlier values, keeping first position.
    let mut params: Vec<(&str, &str)> = Vec::with_capacity(extra.len());
    for (key, value) in extra {
        match params.iter_mut().find(|(k, _)| *k == key.as_str()) {
            Some(slot) => slot.1 = value,
            None => params.push((key, value)),
        }
    }

    let mut query = url.query_pairs_mut();
    query.append_pair("api_token", api_key);
    for (key, value) in params {
        query.append_pair(key, value);
    }
    drop(query);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "https://hq.appsflyer.com";

    fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
        values
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_url_without_extra_params() {
        let url = report_url(HOST, "BaseTestAppName", "some_report_name", "some_api_key", &[])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://hq.appsflyer.com/export/BaseTestAppName/some_report_name/v5?api_token=some_api_key"
        );
    }

    #[test]
    fn test_url_extends_query_in_order() {
        let extra = pairs(&[("some_v", "args"), ("readonly", "true")]);
        let url = report_url(HOST, "BaseTestAppName", "some_report_name", "some_api_key", &extra)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://hq.appsflyer.com/export/BaseTestAppName/some_report_name/v5?api_token=some_api_key&some_v=args&readonly=true"
        );
    }

    #[test]
    fn test_duplicate_keys_overwrite_in_place() {
        let extra = pairs(&[("from", "2024-01-01"), ("timezone", "UTC"), ("from", "2024-02-01")]);
        let url = report_url(HOST, "app", "daily_report", "key", &extra).unwrap();
        assert_eq!(
            url.query(),
            Some("api_token=key&from=2024-02-01&timezone=UTC")
        );
    }

    #[test]
    fn test_missing_api_key() {
        let err = report_url(HOST, "app", "daily_report", "", &[]).unwrap_err();
        assert!(matches!(err, UrlError::MissingApiKey));
    }

    #[test]
    fn test_trailing_slash_host() {
        let url = report_url("https://hq.appsflyer.com/", "app", "geo_report", "key", &[])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://hq.appsflyer.com/export/app/geo_report/v5?api_token=key"
        );
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let url = report_url(HOST, "my app", "geo report", "key", &[]).unwrap();
        assert_eq!(url.path(), "/export/my%20app/geo%20report/v5");
    }
}
