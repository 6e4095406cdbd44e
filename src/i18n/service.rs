//! Translation loading, caching and application.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::{
    LanguageCode,
    TranslationMap,
};
use crate::config::SiteSettings;
use crate::dom::{
    ACTIVE_CLASS,
    Dom,
    I18N_ATTR,
    I18N_NESTED_ATTR,
    LANG_ATTR,
    LANG_OPTION_CLASS,
};
use crate::platform::{
    FetchError,
    Fetcher,
    PreferenceStore,
};

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Invalid translation URL for '{language}': {source}")]
    Url {
        language: LanguageCode,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to fetch translations for '{language}': {source}")]
    Fetch {
        language: LanguageCode,
        #[source]
        source: FetchError,
    },
    #[error("Translations for '{language}' must be a JSON object")]
    InvalidFormat { language: LanguageCode },
    /// Neither the requested nor the fallback language could be loaded
    #[error("Fallback language '{fallback}' is unavailable (requested '{requested}'): {source}")]
    FallbackUnavailable {
        requested: LanguageCode,
        fallback: LanguageCode,
        #[source]
        source: Box<TranslationError>,
    },
}

/// Result of a translation lookup.
#[derive(Debug, Clone)]
pub struct ResolvedTranslations {
    pub requested: LanguageCode,
    /// Language whose map was returned; differs from `requested` after a fallback.
    pub language: LanguageCode,
    pub map: Arc<TranslationMap>,
}

impl ResolvedTranslations {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.requested != self.language
    }
}

/// Loads, caches and applies translations; persists the chosen language.
///
/// One instance lives for the whole page session and owns the cache.
#[derive(Debug)]
pub struct TranslationService<F, S> {
    fetcher: F,
    store: S,
    settings: SiteSettings,
    cache: HashMap<LanguageCode, Arc<TranslationMap>>,
    initial: LanguageCode,
    current: LanguageCode,
}

impl<F, S> TranslationService<F, S>
where
    F: Fetcher,
    S: PreferenceStore,
{
    /// Creates the service with the persisted language as current, or the
    /// configured default when nothing valid is stored.
    pub fn new(settings: SiteSettings, fetcher: F, store: S) -> Self {
        let current = store
            .get(&settings.storage_key)
            .and_then(|stored| match stored.parse() {
                Ok(language) => Some(language),
                Err(error) => {
                    tracing::warn!("Ignoring stored language: {}", error);
                    None
                }
            })
            .unwrap_or_else(|| settings.default_language_code());

        Self { fetcher, store, settings, cache: HashMap::new(), initial: current, current }
    }

    /// Language to apply on page load: the persisted choice, else the default.
    #[must_use]
    pub const fn initial_language(&self) -> LanguageCode {
        self.initial
    }

    #[must_use]
    pub const fn current_language(&self) -> LanguageCode {
        self.current
    }

    #[must_use]
    pub fn is_cached(&self, language: LanguageCode) -> bool {
        self.cache.contains_key(&language)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the map for `language`, falling back to English once.
    ///
    /// A failure for a non-fallback language is logged and answered with the
    /// fallback map. Only when the fallback itself cannot be loaded does this
    /// return an error.
    pub async fn load_translations(
        &mut self,
        language: LanguageCode,
    ) -> Result<ResolvedTranslations, TranslationError> {
        let fallback = LanguageCode::FALLBACK;

        let error = match self.load_exact(language).await {
            Ok(map) => return Ok(ResolvedTranslations { requested: language, language, map }),
            Err(error) => error,
        };

        if language == fallback {
            return Err(TranslationError::FallbackUnavailable {
                requested: language,
                fallback,
                source: Box::new(error),
            });
        }

        tracing::warn!("{}; falling back to '{}'", error, fallback);

        match self.load_exact(fallback).await {
            Ok(map) => Ok(ResolvedTranslations { requested: language, language: fallback, map }),
            Err(source) => Err(TranslationError::FallbackUnavailable {
                requested: language,
                fallback,
                source: Box::new(source),
            }),
        }
    }

    /// Cache lookup, then a single fetch. Failures are not cached.
    async fn load_exact(
        &mut self,
        language: LanguageCode,
    ) -> Result<Arc<TranslationMap>, TranslationError> {
        if let Some(map) = self.cache.get(&language) {
            tracing::debug!(%language, "Translations cache hit");
            return Ok(Arc::clone(map));
        }

        let url = self
            .settings
            .translation_url(language)
            .map_err(|source| TranslationError::Url { language, source })?;

        let json = self
            .fetcher
            .fetch_json(&url)
            .await
            .map_err(|source| TranslationError::Fetch { language, source })?;

        let map = TranslationMap::from_json(&json)
            .ok_or(TranslationError::InvalidFormat { language })?;

        tracing::debug!(%language, entries = map.len(), "Loaded translations");
        let map = Arc::new(map);
        self.cache.insert(language, Arc::clone(&map));
        Ok(map)
    }

    /// Applies `language` to the page and persists the choice.
    ///
    /// Returns the language whose texts are now displayed. The persisted
    /// preference and the active selector follow the requested language
    /// unless `persist_fallback_language` is set, in which case they follow
    /// the displayed one.
    pub async fn apply_translations<D: Dom>(
        &mut self,
        dom: &mut D,
        language: LanguageCode,
    ) -> Result<LanguageCode, TranslationError> {
        let resolved = self.load_translations(language).await?;

        let updated = apply_map(dom, &resolved.map);
        tracing::debug!(language = %resolved.language, updated, "Applied translations");

        let selected = if resolved.is_fallback() && self.settings.persist_fallback_language {
            resolved.language
        } else {
            language
        };

        // every selector group on the page marks its own matching option
        for option in dom.query_class(LANG_OPTION_CLASS) {
            let code = dom.attr(option, LANG_ATTR);
            dom.set_class(option, ACTIVE_CLASS, code.as_deref() == Some(selected.as_str()));
        }

        self.current = selected;
        if let Err(error) = self.store.set(&self.settings.storage_key, selected.as_str()) {
            tracing::warn!("Failed to persist language '{}': {}", selected, error);
        }

        Ok(resolved.language)
    }
}

/// Writes every resolvable key of `map` into the page, returning how many
/// elements changed. Elements with unknown keys keep their text.
pub fn apply_map<D: Dom>(dom: &mut D, map: &TranslationMap) -> usize {
    let mut updated = 0;

    for (node, key) in dom.query_attr(I18N_ATTR) {
        if let Some(text) = map.text(&key) {
            dom.set_text(node, text);
            updated += 1;
        }
    }

    for (node, key) in dom.query_attr(I18N_NESTED_ATTR) {
        if let Some(text) = map.dotted(&key) {
            dom.set_text(node, text);
            updated += 1;
        }
    }

    updated
}
