//! Site configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. Stock defaults
//! are serialized to a TOML table, the user file is merged on top, and the
//! merged table is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [locale]
//! default = "en"            # Fallback when a translation is missing
//! active = "en"             # Locale rendered by `generate`
//!
//! [assets]
//! # project_id = "abc123"   # Content store project (required for managed images)
//! dataset = "production"
//! cdn_base = "https://cdn.sanity.io"
//!
//! [enquiry]
//! # event_name = "add-to-enquiry"   # Omit to disable enquiry notifications
//!
//! [routing]
//! # products_section_id = "products"
//!
//! [validation]
//! mode = "warn"             # "warn" logs shape mismatches, "off" skips checks
//!
//! [poster]
//! default_alt = "Promotional poster"
//!
//! [labels]
//! add_to_enquiry = "Add to Enquiry"
//! view_details = "View Details"
//! close = "Close"
//!
//! [colors]
//! background = "#f5f1e8"
//! background_dark = "#5d4037"
//! backdrop = "#3b2f2f"
//! text = "#3e2723"
//! text_light = "#f5f1e8"
//! accent = "#b8875a"
//! accent_light = "#e0c895"
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

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Active and fallback locales.
    pub locale: LocaleConfig,
    /// Managed-asset URL building.
    pub assets: AssetsConfig,
    /// "Add to enquiry" notification settings.
    pub enquiry: EnquiryConfig,
    /// Anchor ids for page sections.
    pub routing: RoutingConfig,
    /// Content validation behaviour.
    pub validation: ValidationConfig,
    /// Poster banner defaults.
    pub poster: PosterConfig,
    /// Fixed interface strings.
    pub labels: LabelsConfig,
    /// Palette emitted as CSS custom properties.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locale.default.trim().is_empty() || self.locale.active.trim().is_empty() {
            return Err(ConfigError::Validation(
                "locale.default and locale.active must not be empty".into(),
            ));
        }
        if self.assets.dataset.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets.dataset must not be empty".into(),
            ));
        }
        if url::Url::parse(&self.assets.cdn_base).is_err() {
            return Err(ConfigError::Validation(format!(
                "assets.cdn_base is not a valid URL: {}",
                self.assets.cdn_base
            )));
        }
        if self
            .enquiry
            .event_name
            .as_deref()
            .is_some_and(|n| n.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "enquiry.event_name must not be empty when set".into(),
            ));
        }
        Ok(())
    }
}

/// Locale settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// Locale used when the active locale has no translation.
    pub default: String,
    /// Locale rendered when none is given on the command line.
    pub active: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: crate::locale::DEFAULT_LOCALE.to_string(),
            active: crate::locale::DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Content store coordinates for managed image assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Project id. Managed images resolve to nothing while this is unset.
    pub project_id: Option<String>,
    /// Dataset name.
    pub dataset: String,
    /// Image CDN origin.
    pub cdn_base: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: "production".to_string(),
            cdn_base: "https://cdn.sanity.io".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnquiryConfig {
    /// Channel name for "add to enquiry" notifications.
    pub event_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    /// `id` attribute of the product showcase section.
    pub products_section_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Validate every section and log mismatches.
    #[default]
    Warn,
    /// Skip validation entirely.
    Off,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub mode: ValidationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterConfig {
    /// Alt text used when a poster has none.
    pub default_alt: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            default_alt: "Promotional poster".to_string(),
        }
    }
}

/// Interface strings that do not come from content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    pub add_to_enquiry: String,
    pub view_details: String,
    pub close: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            add_to_enquiry: "Add to Enquiry".to_string(),
            view_details: "View Details".to_string(),
            close: "Close".to_string(),
        }
    }
}

/// Site palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light-theme section background.
    pub background: String,
    /// Dark-theme section background.
    pub background_dark: String,
    /// Fill behind background images while they load.
    pub backdrop: String,
    /// Dark text on light backgrounds.
    pub text: String,
    /// Light text on dark backgrounds and images.
    pub text_light: String,
    /// Accent for dividers, highlights and feature bullets.
    pub accent: String,
    /// Eyebrow color on dark backgrounds.
    pub accent_light: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#f5f1e8".to_string(),
            background_dark: "#5d4037".to_string(),
            backdrop: "#3b2f2f".to_string(),
            text: "#3e2723".to_string(),
            text_light: "#f5f1e8".to_string(),
            accent: "#b8875a".to_string(),
            accent_light: "#e0c895".to_string(),
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
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given `config.toml` path.
///
/// A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# section-press configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
[locale]
# Used when a field has no translation for the active locale.
default = "en"
# Locale rendered by `generate` (override per run with --locale).
active = "en"

# ---------------------------------------------------------------------------
# Managed image assets
# ---------------------------------------------------------------------------
[assets]
# Content store project id. Without it, uploaded images are skipped and only
# direct image URLs render.
# project_id = "abc123"
dataset = "production"
cdn_base = "https://cdn.sanity.io"

# ---------------------------------------------------------------------------
# Enquiry notifications
# ---------------------------------------------------------------------------
[enquiry]
# Channel name published when a visitor adds a product to their enquiry.
# Omit to render product cards without the enquiry hook.
# event_name = "add-to-enquiry"

# ---------------------------------------------------------------------------
# Routing
# ---------------------------------------------------------------------------
[routing]
# id attribute of the product showcase, for in-page anchors.
# products_section_id = "products"

# ---------------------------------------------------------------------------
# Content validation
# ---------------------------------------------------------------------------
[validation]
# "warn" logs shape mismatches and keeps rendering; "off" skips validation.
mode = "warn"

# ---------------------------------------------------------------------------
# Poster banners
# ---------------------------------------------------------------------------
[poster]
default_alt = "Promotional poster"

# ---------------------------------------------------------------------------
# Interface labels
# ---------------------------------------------------------------------------
[labels]
add_to_enquiry = "Add to Enquiry"
view_details = "View Details"
close = "Close"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#f5f1e8"        # light-theme sections
background_dark = "#5d4037"   # dark-theme sections
backdrop = "#3b2f2f"          # behind background images
text = "#3e2723"
text_light = "#f5f1e8"        # dark themes and image backdrops
accent = "#b8875a"            # dividers, highlights, feature bullets
accent_light = "#e0c895"      # eyebrows on dark backgrounds
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-bg-dark: {background_dark};
    --color-backdrop: {backdrop};
    --color-text: {text};
    --color-text-light: {text_light};
    --color-accent: {accent};
    --color-accent-light: {accent_light};
}}"#,
        background = colors.background,
        background_dark = colors.background_dark,
        backdrop = colors.backdrop,
        text = colors.text,
        text_light = colors.text_light,
        accent = colors.accent,
        accent_light = colors.accent_light,
    )
}
