use std::{collections::HashMap, hash::BuildHasher};

/// Reference to a localizable string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalizedText {
    pub key: String,
    /// String table to look the key up in. `None` is the default table.
    pub table: Option<String>,
    /// Text used when no translation exists.
    pub default_value: Option<String>,
}

impl LocalizedText {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            table: None,
            default_value: None,
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Resolves to a literal string.
    ///
    /// The localizer's entry wins, then the default value, then the key
    /// itself.
    pub fn resolve<L: Localizer + ?Sized>(&self, localizer: &L) -> String {
        localizer
            .lookup(&self.key, self.table.as_deref())
            .or_else(|| self.default_value.clone())
            .unwrap_or_else(|| self.key.clone())
    }
}

/// Source of translated strings.
pub trait Localizer {
    fn lookup(&self, key: &str, table: Option<&str>) -> Option<String>;
}

/// Flat key → translation map; tables are ignored.
impl<S: BuildHasher> Localizer for HashMap<String, String, S> {
    fn lookup(&self, key: &str, _table: Option<&str>) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Localizer without any translations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLocalization;

impl Localizer for NoLocalization {
    fn lookup(&self, _key: &str, _table: Option<&str>) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_wins() {
        let mut strings = HashMap::new();
        strings.insert("greeting".to_string(), "Bonjour".to_string());

        let text = LocalizedText::new("greeting").default_value("Hello");
        assert_eq!(text.resolve(&strings), "Bonjour");
    }

    #[test]
    fn default_value_then_key() {
        let text = LocalizedText::new("greeting").default_value("Hello");
        assert_eq!(text.resolve(&NoLocalization), "Hello");
        assert_eq!(LocalizedText::new("greeting").resolve(&NoLocalization), "greeting");
    }
}
