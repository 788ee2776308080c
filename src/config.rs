//! Widget configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the timings and measurements of the storefront page; a `config.toml` in the
//! source directory overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [carousel]
//! interval_ms = 4000        # Time each slide stays up before auto-advance
//! cooldown_ms = 3000        # Pause after manual navigation before auto-advance resumes
//!
//! [strip]
//! boundary_epsilon = 10.0   # Sub-pixel tolerance at the right edge
//! compact_increment = 250.0 # Scroll-by amount below the tablet breakpoint
//! wide_increment = 320.0    # Scroll-by amount at tablet width and above
//!
//! [breakpoints]
//! tablet = 768              # min-width (px) of the tablet layout
//! desktop = 1200            # min-width (px) of the desktop layout
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [carousel]
//! interval_ms = 6000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
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

/// Widget configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    /// Auto-advance and cooldown timing of the slider.
    pub carousel: CarouselConfig,
    /// Boundary tolerance and scroll increments of the gallery strip.
    pub strip: StripConfig,
    /// Viewport widths separating mobile, tablet and desktop layouts.
    pub breakpoints: BreakpointsConfig,
}

impl WidgetConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be greater than 0".into(),
            ));
        }
        let epsilon = self.strip.boundary_epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ConfigError::Validation(
                "strip.boundary_epsilon must be a finite number >= 0".into(),
            ));
        }
        for (key, value) in [
            ("strip.compact_increment", self.strip.compact_increment),
            ("strip.wide_increment", self.strip.wide_increment),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a finite number > 0"
                )));
            }
        }
        if self.breakpoints.tablet == 0 || self.breakpoints.tablet >= self.breakpoints.desktop {
            return Err(ConfigError::Validation(
                "breakpoints must satisfy 0 < tablet < desktop".into(),
            ));
        }
        Ok(())
    }
}

/// Slider timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Milliseconds between automatic advances.
    pub interval_ms: u64,
    /// Milliseconds auto-advance stays off after the last manual navigation.
    pub cooldown_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: 4000,
            cooldown_ms: 3000,
        }
    }
}

/// Gallery strip measurements, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripConfig {
    /// Tolerance subtracted from the scrollable range before reporting the
    /// right edge as reached.
    pub boundary_epsilon: f64,
    /// Scroll-by amount for compact (mobile) viewports.
    pub compact_increment: f64,
    /// Scroll-by amount for tablet and desktop viewports.
    pub wide_increment: f64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            boundary_epsilon: 10.0,
            compact_increment: 250.0,
            wide_increment: 320.0,
        }
    }
}

/// Responsive breakpoints as `min-width` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakpointsConfig {
    pub tablet: u32,
    pub desktop: u32,
}

impl Default for BreakpointsConfig {
    fn default() -> Self {
        Self {
            tablet: 768,
            desktop: 1200,
        }
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
    toml::Value::try_from(WidgetConfig::default()).expect("default config must serialize")
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
) -> Result<WidgetConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: WidgetConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<WidgetConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each file only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image slider
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds each slide stays up before advancing on its own.
interval_ms = 4000

# Milliseconds auto-advance stays paused after the visitor clicks an arrow or
# an indicator. Clicking again restarts the pause.
cooldown_ms = 3000

# ---------------------------------------------------------------------------
# Gallery strip
# ---------------------------------------------------------------------------
[strip]
# Tolerance (px) before the right edge counts as reached. Absorbs sub-pixel
# rounding of scroll offsets.
boundary_epsilon = 10.0

# Scroll-by amount (px) per arrow click below the tablet breakpoint.
compact_increment = 250.0

# Scroll-by amount (px) per arrow click at tablet width and above.
wide_increment = 320.0

# ---------------------------------------------------------------------------
# Breakpoints (min-width, px)
# ---------------------------------------------------------------------------
[breakpoints]
tablet = 768
desktop = 1200
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_storefront_timings() {
        let config = WidgetConfig::default();
        assert_eq!(config.carousel.interval_ms, 4000);
        assert_eq!(config.carousel.cooldown_ms, 3000);
        assert_eq!(config.strip.boundary_epsilon, 10.0);
        assert_eq!(config.strip.compact_increment, 250.0);
        assert_eq!(config.strip.wide_increment, 320.0);
        assert_eq!(config.breakpoints.tablet, 768);
        assert_eq!(config.breakpoints.desktop, 1200);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[carousel]
interval_ms = 6000
"#;
        let config: WidgetConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.carousel.interval_ms, 6000);
        // Unspecified values fall back to defaults
        assert_eq!(config.carousel.cooldown_ms, 3000);
        assert_eq!(config.strip.wide_increment, 320.0);
    }

    #[test]
    fn integer_epsilon_is_accepted() {
        let toml = r#"
[strip]
boundary_epsilon = 4
"#;
        let config: WidgetConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.strip.boundary_epsilon, 4.0);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[carousel]
cooldown_ms = 1500

[breakpoints]
desktop = 1440
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.carousel.cooldown_ms, 1500);
        assert_eq!(config.carousel.interval_ms, 4000);
        assert_eq!(config.breakpoints.desktop, 1440);
        assert_eq!(config.breakpoints.tablet, 768);
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
        let base: toml::Value = toml::from_str(r#"interval_ms = 4000"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"interval_ms = 2500"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("interval_ms").unwrap().as_integer(), Some(2500));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[strip]
compact_increment = 250.0
wide_increment = 320.0
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[strip]
wide_increment = 400.0
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let strip = merged.get("strip").unwrap();
        assert_eq!(strip.get("wide_increment").unwrap().as_float(), Some(400.0));
        // compact preserved from base
        assert_eq!(strip.get("compact_increment").unwrap().as_float(), Some(250.0));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
a = 1
b = 2
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 10"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[carousel]
intervall_ms = 4000
"#;
        let result: Result<WidgetConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[slider]
interval_ms = 4000
"#;
        let result: Result<WidgetConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[strip]
epsilon = 3
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
        assert!(WidgetConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_interval() {
        let mut config = WidgetConfig::default();
        config.carousel.interval_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("interval_ms"));
    }

    #[test]
    fn validate_zero_cooldown_is_allowed() {
        let mut config = WidgetConfig::default();
        config.carousel.cooldown_ms = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_negative_epsilon() {
        let mut config = WidgetConfig::default();
        config.strip.boundary_epsilon = -1.0;
        assert!(config.validate().is_err());

        config.strip.boundary_epsilon = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_increments_positive() {
        let mut config = WidgetConfig::default();
        config.strip.compact_increment = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("compact_increment"));

        let mut config = WidgetConfig::default();
        config.strip.wide_increment = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_breakpoint_order() {
        let mut config = WidgetConfig::default();
        config.breakpoints.tablet = 1200;
        assert!(config.validate().is_err());

        config.breakpoints.tablet = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[carousel]
interval_ms = 0
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
        let overlay: toml::Value = toml::from_str(
            r#"
[strip]
compact_increment = 200.0
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.strip.compact_increment, 200.0);
        assert_eq!(config.strip.boundary_epsilon, 10.0);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str(
            r#"
[breakpoints]
tablet = 2000
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
        let config: WidgetConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[carousel]"));
        assert!(content.contains("[strip]"));
        assert!(content.contains("[breakpoints]"));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("carousel").is_some());
        assert!(val.get("strip").is_some());
        assert!(val.get("breakpoints").is_some());
    }
}
