//! Site configuration.
mod loader;
mod manager;
mod types;

pub use manager::{
    ConfigManager,
    STATE_FILE_NAME,
};
pub use types::{
    ConfigError,
    SiteSettings,
    ValidationError,
};
