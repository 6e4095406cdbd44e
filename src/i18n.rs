//! Multilingual text substitution.

mod language;
mod map;
mod service;

pub use language::{
    LanguageCode,
    UnknownLanguage,
};
pub use map::{
    TranslationMap,
    TranslationValue,
};
pub use service::{
    ResolvedTranslations,
    TranslationError,
    TranslationService,
    apply_map,
};
