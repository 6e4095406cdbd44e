//! Translation lookup table for one language.

use std::collections::HashMap;

use serde_json::Value;

/// A translation entry: plain text or one level of grouped texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    Text(String),
    Group(HashMap<String, String>),
}

/// Key to text lookup for one language, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: HashMap<String, TranslationValue>,
}

impl TranslationMap {
    /// Builds a map from a translation document.
    ///
    /// Returns `None` unless the document is a JSON object. Entries that are
    /// neither strings nor objects are skipped, and so are non-string members
    /// of a group, since nesting is limited to one level.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use vaktija_site::i18n::TranslationMap;
    ///
    /// let map = TranslationMap::from_json(&json!({
    ///     "title": "Prayer times",
    ///     "prayers": { "fajr": "Fajr" }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(map.text("title"), Some("Prayer times"));
    /// assert_eq!(map.nested("prayers", "fajr"), Some("Fajr"));
    /// ```
    #[must_use]
    pub fn from_json(json: &Value) -> Option<Self> {
        let Value::Object(object) = json else {
            return None;
        };

        let entries = object
            .iter()
            .filter_map(|(key, value)| {
                let entry = match value {
                    Value::String(text) => TranslationValue::Text(text.clone()),
                    Value::Object(group) => TranslationValue::Group(
                        group
                            .iter()
                            .filter_map(|(child, text)| {
                                text.as_str().map(|text| (child.clone(), text.to_string()))
                            })
                            .collect(),
                    ),
                    _ => {
                        tracing::debug!(key = %key, "Skipping non-text translation entry");
                        return None;
                    }
                };
                Some((key.clone(), entry))
            })
            .collect();

        Some(Self { entries })
    }

    /// Text of a flat key; `None` for missing keys and for groups.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            TranslationValue::Text(text) => Some(text),
            TranslationValue::Group(_) => None,
        }
    }

    #[must_use]
    pub fn nested(&self, parent: &str, child: &str) -> Option<&str> {
        match self.entries.get(parent)? {
            TranslationValue::Group(group) => group.get(child).map(String::as_str),
            TranslationValue::Text(_) => None,
        }
    }

    /// Resolves a `parent.child` key. Only the first dot separates.
    #[must_use]
    pub fn dotted(&self, key: &str) -> Option<&str> {
        let (parent, child) = key.split_once('.')?;
        self.nested(parent, child)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TranslationValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
