//! Supported page languages.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageCode {
    En,
    Bs,
    Tr,
    De,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language code '{0}', expected one of: en, bs, tr, de")]
pub struct UnknownLanguage(pub String);

impl LanguageCode {
    /// Selector order on the page.
    pub const ALL: [Self; 4] = [Self::En, Self::Bs, Self::Tr, Self::De];

    /// Language whose translations must always be loadable.
    pub const FALLBACK: Self = Self::En;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Bs => "bs",
            Self::Tr => "tr",
            Self::De => "de",
        }
    }
}

impl FromStr for LanguageCode {
    type Err = UnknownLanguage;

    /// Accepts region-qualified tags (`bs-BA`, `de_AT`) by their primary subtag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.trim().split(['-', '_']).next().unwrap_or_default().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == primary)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = UnknownLanguage;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(language: LanguageCode) -> Self {
        language.as_str().to_string()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
