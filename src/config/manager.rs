//! Settings of one site directory, validated once on load.

use std::path::PathBuf;

use url::Url;

use super::{
    ConfigError,
    SiteSettings,
    loader,
};

/// File holding persisted preferences, relative to the site root.
pub const STATE_FILE_NAME: &str = ".vaktija-site-state.json";

/// Validated settings plus the paths and URLs derived from them.
///
/// A `ConfigManager` only exists for settings that passed
/// [`SiteSettings::validate`], so everything handed to a page session from
/// here is already checked.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    site_root: PathBuf,
    settings: SiteSettings,
    location: Url,
}

impl ConfigManager {
    /// Reads `.vaktija-site.json` from `site_root`, or uses the defaults when
    /// the file is absent.
    ///
    /// # Errors
    /// - The settings file cannot be read or parsed
    /// - The settings fail validation
    pub fn load(site_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let site_root = site_root.into();
        let settings = loader::load_from_site_root(&site_root)?.unwrap_or_default();
        Self::from_settings(site_root, settings)
    }

    /// Wraps settings that did not come from disk.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationErrors`] listing every invalid field.
    pub fn from_settings(
        site_root: impl Into<PathBuf>,
        settings: SiteSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        let location = Url::parse(&settings.base_url)?;
        let site_root = site_root.into();

        tracing::info!(
            site_root = %site_root.display(),
            base_url = %location,
            location_id = settings.location_id,
            "Site settings loaded"
        );
        Ok(Self { site_root, settings, location })
    }

    #[must_use]
    pub const fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// URL the page is opened at.
    #[must_use]
    pub const fn location(&self) -> &Url {
        &self.location
    }

    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.site_root.join(STATE_FILE_NAME)
    }
}
