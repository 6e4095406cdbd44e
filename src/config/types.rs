use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use url::Url;

use crate::i18n::LanguageCode;

/// Placeholder replaced by the language code in `translationsPath`.
pub const LANG_PLACEHOLDER: &str = "{lang}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "pages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid URL in configuration: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// URL the page is served from. Relative resource paths resolve against it.
    pub base_url: String,
    /// Translation resource path, relative to `base_url`. Must contain `{lang}`.
    pub translations_path: String,

    pub schedule_endpoint: String,
    /// Location identifier appended to `schedule_endpoint` (77 = Sarajevo).
    pub location_id: u32,

    /// Language applied when nothing has been persisted yet.
    pub default_language: String,
    pub storage_key: String,
    /// Persist the fallback language instead of the requested one when
    /// the requested language could not be loaded.
    pub persist_fallback_language: bool,

    pub highlight_interval_secs: u64,
    /// Delay before the first highlight, giving the schedule fetch a head start.
    pub initial_highlight_delay_ms: u64,

    pub home_page: String,
    pub page_query_param: String,
    pub site_title: String,
    /// Section identifiers of the page, in navigation order.
    pub pages: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            translations_path: "locales/{lang}.json".to_string(),
            schedule_endpoint: "https://api.vaktija.ba/vaktija/v1".to_string(),
            location_id: 77,
            default_language: "en".to_string(),
            storage_key: "language".to_string(),
            persist_fallback_language: false,
            highlight_interval_secs: 60,
            initial_highlight_delay_ms: 1000,
            home_page: "home".to_string(),
            page_query_param: "page".to_string(),
            site_title: "Vaktija".to_string(),
            pages: ["home", "prayer-times", "about", "services", "contact"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl SiteSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid URL
    /// - Unknown default language
    /// - Zero highlight interval
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Url::parse(&self.base_url) {
            errors.push(ValidationError::new(
                "baseUrl",
                format!("Invalid URL '{}': {e}", self.base_url),
            ));
        }

        if self.translations_path.is_empty() {
            errors.push(ValidationError::new(
                "translationsPath",
                "The path cannot be empty. Example: \"locales/{lang}.json\"",
            ));
        } else if !self.translations_path.contains(LANG_PLACEHOLDER) {
            errors.push(ValidationError::new(
                "translationsPath",
                format!("The path must contain the {LANG_PLACEHOLDER} placeholder"),
            ));
        }

        if let Err(e) = Url::parse(&self.schedule_endpoint) {
            errors.push(ValidationError::new(
                "scheduleEndpoint",
                format!("Invalid URL '{}': {e}", self.schedule_endpoint),
            ));
        }

        if let Err(e) = self.default_language.parse::<LanguageCode>() {
            errors.push(ValidationError::new("defaultLanguage", e.to_string()));
        }

        if self.storage_key.is_empty() {
            errors.push(ValidationError::new("storageKey", "The storage key cannot be empty"));
        }

        if self.highlight_interval_secs == 0 {
            errors.push(ValidationError::new(
                "highlightIntervalSecs",
                "The interval must be at least 1 second",
            ));
        }

        if self.page_query_param.is_empty() {
            errors.push(ValidationError::new(
                "pageQueryParam",
                "The query parameter cannot be empty. Example: \"page\"",
            ));
        }

        for (index, page) in self.pages.iter().enumerate() {
            if page.is_empty() || page.contains(char::is_whitespace) {
                errors.push(ValidationError::new(
                    format!("pages[{index}]"),
                    format!("Invalid page identifier '{page}'"),
                ));
            }
        }

        if !self.pages.contains(&self.home_page) {
            errors.push(ValidationError::new(
                "homePage",
                format!("The home page '{}' must be listed in 'pages'", self.home_page),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The configured default language, or the fallback when it does not parse.
    #[must_use]
    pub fn default_language_code(&self) -> LanguageCode {
        self.default_language.parse().unwrap_or(LanguageCode::FALLBACK)
    }

    /// # Errors
    /// Returns error if `base_url` is not a valid URL.
    pub fn translation_url(&self, language: LanguageCode) -> Result<Url, url::ParseError> {
        let path = self.translations_path.replace(LANG_PLACEHOLDER, language.as_str());
        Url::parse(&self.base_url)?.join(&path)
    }

    /// # Errors
    /// Returns error if `schedule_endpoint` is not a valid URL.
    pub fn schedule_url(&self) -> Result<Url, url::ParseError> {
        let endpoint = self.schedule_endpoint.trim_end_matches('/');
        Url::parse(&format!("{endpoint}/{}", self.location_id))
    }

    /// Never shorter than one second, even for settings that skipped
    /// [`Self::validate`].
    #[must_use]
    pub const fn highlight_interval(&self) -> Duration {
        let secs = if self.highlight_interval_secs == 0 { 1 } else { self.highlight_interval_secs };
        Duration::from_secs(secs)
    }

    #[must_use]
    pub const fn initial_highlight_delay(&self) -> Duration {
        Duration::from_millis(self.initial_highlight_delay_ms)
    }
}
