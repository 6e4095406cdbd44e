use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    SiteSettings,
};

/// Settings file name looked up in the site root.
pub(super) const CONFIG_FILE_NAME: &str = ".vaktija-site.json";

/// `Ok(None)` when the site root has no settings file.
pub(super) fn load_from_site_root(site_root: &Path) -> Result<Option<SiteSettings>, ConfigError> {
    let path = site_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file; using defaults");
            return Ok(None);
        }
        Err(error) => return Err(error.into()),
    };

    tracing::debug!(path = %path.display(), "Reading settings file");
    Ok(Some(serde_json::from_str(&content)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn reads_partial_settings() {
        let site = TempDir::new().unwrap();
        fs::write(site.path().join(CONFIG_FILE_NAME), r#"{"siteTitle": "Džamija"}"#).unwrap();

        let settings = load_from_site_root(site.path()).unwrap().unwrap();

        assert_eq!(settings.site_title, "Džamija");
        assert_eq!(settings.home_page, "home");
    }

    #[rstest]
    fn absent_file_is_not_an_error() {
        let site = TempDir::new().unwrap();

        assert!(load_from_site_root(site.path()).unwrap().is_none());
    }

    #[rstest]
    #[case::not_json("invalid json")]
    #[case::wrong_type(r#"{"locationId": "sarajevo"}"#)]
    fn malformed_file_is_a_parse_error(#[case] content: &str) {
        let site = TempDir::new().unwrap();
        fs::write(site.path().join(CONFIG_FILE_NAME), content).unwrap();

        let result = load_from_site_root(site.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    fn site_root_that_is_a_file_is_an_io_error() {
        let site = TempDir::new().unwrap();
        let not_a_dir = site.path().join("plain");
        fs::write(&not_a_dir, "").unwrap();

        let result = load_from_site_root(&not_a_dir);

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
