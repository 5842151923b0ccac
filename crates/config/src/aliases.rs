use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Learned corrections from raw scraped names to canonical display names.
///
/// Authors and series are kept in separate tables, keyed by the exact raw
/// string as it came out of the metadata source. Lookups never transform
/// the key: `"J K Rowling"` and `"j k rowling"` are different entries.
///
/// Serialized as two top-level tables, `author_mappings` and
/// `series_mappings`, inside the settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasStore {
    #[serde(rename = "author_mappings")]
    authors: BTreeMap<String, String>,
    #[serde(rename = "series_mappings")]
    series: BTreeMap<String, String>,
}

impl AliasStore {
    pub fn get_author_alias(&self, raw: &str) -> Option<&str> {
        self.authors.get(raw).map(String::as_str)
    }

    pub fn get_series_alias(&self, raw: &str) -> Option<&str> {
        self.series.get(raw).map(String::as_str)
    }

    /// Records `raw -> canonical`, returning `true` if the table changed.
    pub fn insert_author_alias(&mut self, raw: impl Into<String>, canonical: impl Into<String>) -> bool {
        insert(&mut self.authors, raw.into(), canonical.into())
    }

    /// Records `raw -> canonical`, returning `true` if the table changed.
    pub fn insert_series_alias(&mut self, raw: impl Into<String>, canonical: impl Into<String>) -> bool {
        insert(&mut self.series, raw.into(), canonical.into())
    }

    pub fn author_aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.authors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn series_aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.series.is_empty()
    }
}

fn insert(table: &mut BTreeMap<String, String>, raw: String, canonical: String) -> bool {
    if table.get(&raw) == Some(&canonical) {
        return false;
    }
    table.insert(raw, canonical);
    true
}
