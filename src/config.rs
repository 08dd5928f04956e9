//! Engine configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are the base layer; a user file only needs the keys it changes.
//!
//! ## Config File Location
//!
//! `config.toml` is read from the directory passed with `--config` (the
//! current directory by default):
//!
//! ```text
//! frames/
//! ├── config.toml      # Overrides stock defaults
//! └── assets/
//!     └── brands/
//!         ├── sony.png
//!         └── sony_white.png
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [adaptation]
//! dark_luma = 0.5           # Two-line text turns light below this luma
//! bright_luma = 0.7         # Bottom mark turns dark above this luma
//! busy_variance = 2000.0    # Panel behind two-line text above this variance
//! compact_margin = 100.0    # Two-line adapts only below this bottom margin
//! sample_band = 0.15        # Share of the photo height sampled at the bottom
//!
//! [fonts]
//! brand = "Arial"           # Letter-spaced brand fallback
//! caption = "Arial"         # Parameter line under the photo
//! signature = "Bahnschrift" # Two-line layout
//!
//! [assets]
//! root = "assets"           # Brand marks, relative to the config directory
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Engine configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Thresholds for smart adaptation.
    pub adaptation: AdaptationConfig,
    /// Font families written into text layers.
    pub fonts: FontConfig,
    /// Where brand marks are looked up.
    pub assets: AssetsConfig,
}

/// Thresholds the compositor compares scene stats against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdaptationConfig {
    /// Average luma (0-1) below which two-line text turns light.
    pub dark_luma: f64,
    /// Average luma (0-1) above which the bottom mark turns dark.
    pub bright_luma: f64,
    /// Luma variance above which two-line text gets a panel.
    pub busy_variance: f64,
    /// Two-line text adapts only when the bottom margin is below this.
    pub compact_margin: f64,
    /// Height share of the source sampled at the bottom.
    pub sample_band: f64,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            dark_luma: 0.5,
            bright_luma: 0.7,
            busy_variance: 2000.0,
            compact_margin: 100.0,
            sample_band: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub brand: String,
    pub caption: String,
    pub signature: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            brand: "Arial".to_string(),
            caption: "Arial".to_string(),
            signature: "Bahnschrift".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Asset directory. Relative paths resolve against the config directory.
    pub root: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: "assets".to_string(),
        }
    }
}

impl AssetsConfig {
    pub fn resolve_root(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.root)
    }
}

impl EngineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.adaptation;
        for (name, value) in [
            ("adaptation.dark_luma", a.dark_luma),
            ("adaptation.bright_luma", a.bright_luma),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!("{name} must be 0-1")));
            }
        }
        for (name, value) in [
            ("adaptation.busy_variance", a.busy_variance),
            ("adaptation.compact_margin", a.compact_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        if !(a.sample_band > 0.0 && a.sample_band <= 1.0) {
            return Err(ConfigError::Validation(
                "adaptation.sample_band must be above 0 and at most 1".into(),
            ));
        }
        let f = &self.fonts;
        if [&f.brand, &f.caption, &f.signature]
            .iter()
            .any(|family| family.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "fonts entries must not be empty".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(EngineConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<EngineConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: EngineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<EngineConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Frame Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Smart adaptation
# ---------------------------------------------------------------------------
# Templates with smart adaptation sample the bottom of the photo and adjust
# text color, mark variant and legibility panels to what is there.
[adaptation]
# Average luma (0 = black, 1 = white) below which two-line text turns light.
dark_luma = 0.5

# Average luma above which the bottom-centred mark switches to its dark variant.
bright_luma = 0.7

# Luma variance (0-65025) above which two-line text gets a translucent panel.
busy_variance = 2000.0

# Two-line text only adapts when the bottom margin is thinner than this
# (pixels). Wide margins are plain white and need no help.
compact_margin = 100.0

# Share of the photo height sampled at the bottom edge.
sample_band = 0.15

# ---------------------------------------------------------------------------
# Fonts
# ---------------------------------------------------------------------------
# Family names are passed to the rasterizer unchanged.
[fonts]
# Letter-spaced brand name, when no mark image is available.
brand = "Arial"

# Focal length / aperture / shutter / ISO line under the photo.
caption = "Arial"

# Two-line layout (brand + model, lens + exposure).
signature = "Bahnschrift"

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# Directory holding brand marks (brands/sony.png, brands/sony_white.png, ...).
# Relative to the directory containing this file.
root = "assets"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_adaptation_thresholds() {
        let config = EngineConfig::default();
        assert_eq!(config.adaptation.dark_luma, 0.5);
        assert_eq!(config.adaptation.bright_luma, 0.7);
        assert_eq!(config.adaptation.busy_variance, 2000.0);
        assert_eq!(config.adaptation.compact_margin, 100.0);
        assert_eq!(config.adaptation.sample_band, 0.15);
    }

    #[test]
    fn default_config_has_fonts_and_assets() {
        let config = EngineConfig::default();
        assert_eq!(config.fonts.brand, "Arial");
        assert_eq!(config.fonts.signature, "Bahnschrift");
        assert_eq!(config.assets.root, "assets");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[adaptation]
bright_luma = 0.8
"#;
        let config: EngineConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.adaptation.bright_luma, 0.8);
        // Default values preserved
        assert_eq!(config.adaptation.dark_luma, 0.5);
        assert_eq!(config.fonts.caption, "Arial");
    }

    #[test]
    fn assets_root_resolves_against_config_dir() {
        let assets = AssetsConfig::default();
        assert_eq!(
            assets.resolve_root(Path::new("/frames")),
            PathBuf::from("/frames/assets")
        );
        let absolute = AssetsConfig {
            root: "/opt/marks".into(),
        };
        assert_eq!(
            absolute.resolve_root(Path::new("/frames")),
            PathBuf::from("/opt/marks")
        );
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[fonts]
signature = "Inter"

[assets]
root = "marks"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.fonts.signature, "Inter");
        assert_eq!(config.assets.root, "marks");
        // Unspecified values should be defaults
        assert_eq!(config.fonts.brand, "Arial");
        assert_eq!(config.adaptation.busy_variance, 2000.0);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"dark_luma = 0.5"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"dark_luma = 0.4"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("dark_luma").unwrap().as_float(), Some(0.4));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[fonts]
brand = "Arial"
caption = "Arial"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[fonts]
caption = "Futura"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let fonts = merged.get("fonts").unwrap();
        assert_eq!(fonts.get("caption").unwrap().as_str(), Some("Futura"));
        // brand preserved from base
        assert_eq!(fonts.get("brand").unwrap().as_str(), Some("Arial"));
    }

    #[test]
    fn merge_toml_overlay_adds_new_keys() {
        let base: toml::Value = toml::from_str(r#"a = 1"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"b = 2"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[adaptation]
dark_lumen = 0.5
"#;
        let result: Result<EngineConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r##"
[colours]
text = "#000"
"##;
        let result: Result<EngineConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[fonts]
title = "Arial"
"#,
        )
        .unwrap();

        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_luma_range() {
        let mut config = EngineConfig::default();
        config.adaptation.dark_luma = 1.0;
        assert!(config.validate().is_ok());

        config.adaptation.bright_luma = 1.2;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bright_luma"));
    }

    #[test]
    fn validate_negative_variance() {
        let mut config = EngineConfig::default();
        config.adaptation.busy_variance = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_sample_band() {
        let mut config = EngineConfig::default();
        config.adaptation.sample_band = 0.0;
        assert!(config.validate().is_err());
        config.adaptation.sample_band = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_blank_font() {
        let mut config = EngineConfig::default();
        config.fonts.caption = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[adaptation]
dark_luma = 3.0
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[adaptation]
compact_margin = 150.0
"#,
        )
        .unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.adaptation.compact_margin, 150.0);
        // Other fields preserved from defaults
        assert_eq!(config.adaptation.sample_band, 0.15);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str(
            r#"
[adaptation]
sample_band = 2.0
"#,
        )
        .unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: EngineConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[adaptation]"));
        assert!(content.contains("[fonts]"));
        assert!(content.contains("[assets]"));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("adaptation").is_some());
        assert!(val.get("fonts").is_some());
        assert!(val.get("assets").is_some());
    }
}
