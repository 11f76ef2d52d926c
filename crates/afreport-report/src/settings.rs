//! Client configuration.

use std::path::PathBuf;

use afreport_fetch::DecodeMode;
use encoding_rs::Encoding;

/// Default reporting API host.
pub const DEFAULT_HOST: &str = "https://hq.appsflyer.com";

/// Client configuration with environment-backed loading.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base host URL of the reporting API.
    pub host: String,
    /// Static API key sent as the `api_token` query parameter.
    pub api_key: String,
    /// Lookback window used when the caller omits a date bound.
    pub default_days_back: i64,
    /// Timezone identifier used when the caller omits one.
    pub default_timezone: String,
    /// CSV field delimiter for positional decoding.
    pub csv_delimiter: u8,
    /// CSV quote character for positional decoding.
    pub csv_quote: u8,
    /// Text encoding of response bodies.
    pub encoding: &'static Encoding,
    /// Base directory for persisted report copies.
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: String::new(),
            default_days_back: 1,
            default_timezone: "Europe/Moscow".to_string(),
            csv_delimiter: b',',
            csv_quote: b'"',
            encoding: encoding_rs::UTF_8,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Loads settings from the process environment, after reading an optional
    /// `.env` file. Unset or unparsable variables fall back to the defaults.
    ///
    /// Recognized variables: `APPSFLYER_HOST`, `APPSFLYER_API_KEY`,
    /// `APPSFLYER_DAYS_BACK`, `APPSFLYER_TIMEZONE`,
    /// `APPSFLYER_CSV_DELIMITER`, `APPSFLYER_CSV_QUOTE`,
    /// `APPSFLYER_ENCODING` (an encoding label, e.g. `windows-1251`),
    /// `APPSFLYER_OUTPUT_DIR`.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut settings = Self::default();

        if let Ok(host) = std::env::var("APPSFLYER_HOST") {
            settings.host = host;
        }
        if let Ok(key) = std::env::var("APPSFLYER_API_KEY") {
            settings.api_key = key;
        }
        if let Some(days) = env_parse("APPSFLYER_DAYS_BACK") {
            settings.default_days_back = days;
        }
        if let Ok(timezone) = std::env::var("APPSFLYER_TIMEZONE") {
            settings.default_timezone = timezone;
        }
        if let Some(delimiter) = env_byte("APPSFLYER_CSV_DELIMITER") {
            settings.csv_delimiter = delimiter;
        }
        if let Some(quote) = env_byte("APPSFLYER_CSV_QUOTE") {
            settings.csv_quote = quote;
        }
        if let Some(encoding) = std::env::var("APPSFLYER_ENCODING")
            .ok()
            .and_then(|label| Encoding::for_label(label.as_bytes()))
        {
            settings.encoding = encoding;
        }
        if let Ok(dir) = std::env::var("APPSFLYER_OUTPUT_DIR") {
            settings.output_dir = PathBuf::from(dir);
        }

        settings
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets the base host URL.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the base output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Returns the decode mode for a fetch: keyed, or positional with the
    /// configured delimiter and quote.
    #[must_use]
    pub const fn decode_mode(&self, keyed: bool) -> DecodeMode {
        if keyed {
            DecodeMode::Keyed
        } else {
            DecodeMode::Positional {
                delimiter: self.csv_delimiter,
                quote: self.csv_quote,
            }
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_byte(name: &str) -> Option<u8> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.bytes().next())
}
