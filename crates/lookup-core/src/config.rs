use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LookupError, Result};

/// Field used to label records when no display field is configured.
pub const DEFAULT_DISPLAY_FIELD: &str = "Name";

/// Widget configuration, set once by the host and read-only for the life of
/// a session. Loadable from `~/.config/lookup/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Record type to query, e.g. "Account". The only required field.
    pub object_name: String,

    /// Field whose value labels each record.
    /// `field_name` is the deprecated spelling.
    #[serde(alias = "field_name")]
    pub display_field: String,

    pub icon: String,
    pub label: String,
    pub placeholder: String,

    /// Shown when `required` is set and nothing is selected.
    pub required_message: String,

    #[serde(deserialize_with = "flex_bool")]
    pub required: bool,

    /// Optional sub-classification filter forwarded to the search source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    #[serde(deserialize_with = "flex_bool")]
    pub multi_select: bool,

    #[serde(deserialize_with = "flex_bool")]
    pub show_pills: bool,

    /// Comma-separated fields matched against the search term.
    pub search_fields: String,

    /// Comma-separated secondary fields shown under each result.
    /// `field_names` is the deprecated spelling.
    #[serde(alias = "field_names")]
    pub additional_fields: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            display_field: DEFAULT_DISPLAY_FIELD.to_string(),
            icon: "standard:record".to_string(),
            label: "Lookup".to_string(),
            placeholder: "Search...".to_string(),
            required_message: "Complete this field.".to_string(),
            required: false,
            record_type: None,
            multi_select: false,
            show_pills: false,
            search_fields: DEFAULT_DISPLAY_FIELD.to_string(),
            additional_fields: String::new(),
        }
    }
}

/// Accepts real booleans and the legacy string forms `"true"` / `"false"`.
/// Anything else normalizes to `false`; only a real `bool` leaves this
/// boundary.
fn flex_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flex {
        Bool(bool),
        Text(String),
    }

    Ok(match Flex::deserialize(deserializer)? {
        Flex::Bool(b) => b,
        Flex::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}

fn split_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

impl LookupConfig {
    /// A minimal valid config for the given object type.
    pub fn for_object(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.object_name.trim().is_empty() {
            return Err(LookupError::Config("object_name is required".to_string()));
        }
        Ok(())
    }

    /// Search fields as a trimmed list, falling back to `Name` when unset.
    pub fn search_field_list(&self) -> Vec<String> {
        let fields = split_fields(&self.search_fields);
        if fields.is_empty() {
            vec![DEFAULT_DISPLAY_FIELD.to_string()]
        } else {
            fields
        }
    }

    /// Additional display fields as a trimmed list; empty when unset.
    pub fn additional_field_list(&self) -> Vec<String> {
        split_fields(&self.additional_fields)
    }

    // ─── Deprecated accessors ──────────────────────────────
    // Old attribute names forward to the canonical fields; there is no
    // second copy of the value.

    #[deprecated(note = "use the `display_field` field")]
    pub fn field_name(&self) -> &str {
        &self.display_field
    }

    #[deprecated(note = "use the `display_field` field")]
    pub fn set_field_name(&mut self, value: impl Into<String>) {
        self.display_field = value.into();
    }

    #[deprecated(note = "use the `additional_fields` field")]
    pub fn field_names(&self) -> &str {
        &self.additional_fields
    }

    #[deprecated(note = "use the `additional_fields` field")]
    pub fn set_field_names(&mut self, value: impl Into<String>) {
        self.additional_fields = value.into();
    }

    // ─── Load / Save ───────────────────────────────────────

    /// Standard config file path: `~/.config/lookup/config.toml`
    pub fn config_path() -> PathBuf {
        // Allow override via env var
        if let Ok(path) = std::env::var("LOOKUP_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("lookup")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the standard path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let cfg = LookupConfig::default();
        assert_eq!(cfg.display_field, "Name");
        assert_eq!(cfg.search_fields, "Name");
        assert!(!cfg.multi_select);
        assert!(cfg.validate().is_err());
        assert!(LookupConfig::for_object("Account").validate().is_ok());
    }

    #[test]
    fn test_string_booleans_normalize() {
        let cfg: LookupConfig = toml::from_str(
            r#"
            object_name = "Account"
            required = "true"
            multi_select = "FALSE"
            show_pills = true
            "#,
        )
        .unwrap();
        assert!(cfg.required);
        assert!(!cfg.multi_select);
        assert!(cfg.show_pills);
    }

    #[test]
    fn test_deprecated_aliases_land_in_canonical_fields() {
        let cfg: LookupConfig = toml::from_str(
            r#"
            object_name = "Contact"
            field_name = "Email"
            field_names = "Phone, Title"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.display_field, "Email");
        assert_eq!(cfg.additional_fields, "Phone, Title");

        #[allow(deprecated)]
        {
            let mut cfg = cfg;
            assert_eq!(cfg.field_name(), "Email");
            cfg.set_field_name("Name");
            assert_eq!(cfg.display_field, "Name");
        }
    }

    #[test]
    fn test_field_lists_trim_and_default() {
        let mut cfg = LookupConfig::for_object("Account");
        cfg.search_fields = " Name , Email ,,".to_string();
        assert_eq!(cfg.search_field_list(), vec!["Name", "Email"]);

        cfg.search_fields = "  ".to_string();
        assert_eq!(cfg.search_field_list(), vec!["Name"]);

        assert!(cfg.additional_field_list().is_empty());
        cfg.additional_fields = "Industry,Rating".to_string();
        assert_eq!(cfg.additional_field_list(), vec!["Industry", "Rating"]);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = LookupConfig::for_object("Account");
        cfg.multi_select = true;
        cfg.record_type = Some("Customer".to_string());
        cfg.save_to(&path).unwrap();

        let loaded = LookupConfig::load_from(&path).unwrap();
        assert_eq!(loaded.object_name, "Account");
        assert!(loaded.multi_select);
        assert_eq!(loaded.record_type.as_deref(), Some("Customer"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let cfg = LookupConfig::load_from(Path::new("/tmp/nonexistent_lookup_config.toml")).unwrap();
        assert_eq!(cfg.display_field, "Name");
    }
}
