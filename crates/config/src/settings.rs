use crate::AliasStore;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output root used when nothing else was configured. The leading underscore
/// keeps it out of author-folder scans when it sits inside another library.
pub const DEFAULT_OUTPUT_FOLDER: &str = "_shelve_output_";

/// The whole persisted settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_input_folder: Option<PathBuf>,
    pub default_output_folder: PathBuf,
    pub last_used_settings: ProcessingFlags,
    #[serde(flatten)]
    pub aliases: AliasStore,
    pub preferred_metadata_source: MetadataSource,
    pub auto_create_config: bool,
    pub conflict_resolution: ConflictResolution,
    pub skip_existing_folders: bool,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            default_input_folder: None,
            default_output_folder: PathBuf::from(DEFAULT_OUTPUT_FOLDER),
            last_used_settings: ProcessingFlags::default(),
            aliases: AliasStore::default(),
            preferred_metadata_source: MetadataSource::default(),
            auto_create_config: true,
            conflict_resolution: ConflictResolution::default(),
            skip_existing_folders: false,
        }
    }
}

/// The action toggles remembered from the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingFlags {
    pub scan: bool,
    pub auto: bool,
    pub flatten: bool,
    pub rename: bool,
    pub opf: bool,
    pub infotxt: bool,
    pub cover: bool,
    pub copy: bool,
}
impl Default for ProcessingFlags {
    fn default() -> Self {
        Self {
            scan: true,
            auto: true,
            flatten: true,
            rename: true,
            opf: true,
            infotxt: true,
            cover: true,
            copy: false,
        }
    }
}

/// Which catalogue the fetch collaborators should prefer.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataSource {
    #[display("audible")]
    Audible,
    #[display("goodreads")]
    Goodreads,
    #[default]
    #[display("both")]
    Both,
}

/// What to do when a destination folder already holds files.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictResolution {
    /// Copy over the top, replacing files with the same name.
    #[default]
    #[display("merge")]
    Merge,
    /// Leave the destination alone when skipping existing folders is enabled.
    #[display("skip")]
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_output_folder, PathBuf::from(DEFAULT_OUTPUT_FOLDER));
        assert!(settings.last_used_settings.scan);
        assert!(!settings.last_used_settings.copy);
        assert_eq!(settings.preferred_metadata_source, MetadataSource::Both);
        assert_eq!(settings.conflict_resolution, ConflictResolution::Merge);
        assert!(settings.aliases.is_empty());
    }

    #[test]
    fn test_document_shape() {
        let mut settings = Settings::default();
        settings.aliases.insert_author_alias("J K Rowling", "J.K. Rowling");
        let json = serde_json::to_value(&settings).unwrap();
        // Alias tables live at the top level of the document.
        assert_eq!(json["author_mappings"]["J K Rowling"], "J.K. Rowling");
        assert!(json["series_mappings"].is_object());
        assert_eq!(json["conflict_resolution"], "merge");
        assert_eq!(json["preferred_metadata_source"], "both");
        assert!(json.get("default_input_folder").is_none());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let json = r#"{"series_mappings": {"Harry Potter (French)": "Harry Potter"}, "unknown_key": 1}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.aliases.get_series_alias("Harry Potter (French)"), Some("Harry Potter"));
        assert_eq!(settings.default_output_folder, PathBuf::from(DEFAULT_OUTPUT_FOLDER));
        assert!(settings.auto_create_config);
    }

    #[rstest]
    #[case(r#""audible""#, MetadataSource::Audible)]
    #[case(r#""goodreads""#, MetadataSource::Goodreads)]
    #[case(r#""both""#, MetadataSource::Both)]
    fn test_metadata_source(#[case] json: &str, #[case] expected: MetadataSource) {
        assert_eq!(serde_json::from_str::<MetadataSource>(json).unwrap(), expected);
        assert_eq!(format!("\"{expected}\""), json);
    }

    #[rstest]
    #[case(ConflictResolution::Merge, "merge")]
    #[case(ConflictResolution::Skip, "skip")]
    fn test_conflict_resolution(#[case] value: ConflictResolution, #[case] name: &str) {
        assert_eq!(serde_json::to_value(value).unwrap(), name);
        assert_eq!(value.to_string(), name);
    }
}
