//! vaktija-site
//!
//! Client-side behaviour of a multilingual mosque and prayer-times website:
//! section routing, translation substitution and next-prayer highlighting.

pub mod config;
pub mod dom;
pub mod i18n;
pub mod platform;
pub mod router;
pub mod schedule;
pub mod session;
pub mod types;

mod test_utils;

pub use session::PageSession;
