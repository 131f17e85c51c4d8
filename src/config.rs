//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The user file in
//! the site source directory is sparse: it is merged over the stock defaults,
//! then deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://queenchufe.com"  # Canonical origin, no trailing slash
//! locale = "es"                         # Picks data/names.<locale>.json
//! dataset = "data/countries.json"       # Relative to the source directory
//! assets_dir = "assets"                 # Copied verbatim to the output root
//!
//! [sitemap]
//! origins = ["es", "mx", "ar", "cl", "co", "pe", "us"]
//! destinations = ["us", "es", "fr", "it", "de", "gb", "jp", "cn", "th", "br", "ar"]
//! changefreq = "weekly"
//! home_priority = "1.0"
//! pair_priority = "0.7"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#5f6368"
//! border = "#e0e0e0"
//! accent = "#1a73e8"
//! success = "#1e8e3e"
//! danger = "#d93025"
//!
//! [colors.dark]
//! background = "#121212"
//! text = "#eeeeee"
//! text_muted = "#9aa0a6"
//! border = "#333333"
//! accent = "#8ab4f8"
//! success = "#81c995"
//! danger = "#f28b82"
//!
//! [processing]
//! max_processes = 4         # Max parallel render workers (omit for auto = CPU cores)
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
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Canonical origin every generated URL starts with.
    pub base_url: String,
    /// Locale used to pick the country name table.
    pub locale: String,
    /// Dataset path relative to the source directory.
    pub dataset: String,
    /// Static asset directory relative to the source directory.
    pub assets_dir: String,
    /// Sitemap seeding lists and metadata.
    pub sitemap: SitemapConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://queenchufe.com".to_string(),
            locale: "es".to_string(),
            dataset: "data/countries.json".to_string(),
            assets_dir: "assets".to_string(),
            sitemap: SitemapConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

const CHANGEFREQS: &[&str] = &[
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if !is_two_letters(&self.locale) {
            return Err(ConfigError::Validation(
                "locale must be a two-letter language code".into(),
            ));
        }
        for code in self.sitemap.origins.iter().chain(&self.sitemap.destinations) {
            if !is_two_letters(code) {
                return Err(ConfigError::Validation(format!(
                    "sitemap country code {code:?} must be two ASCII letters"
                )));
            }
        }
        if !CHANGEFREQS.contains(&self.sitemap.changefreq.as_str()) {
            return Err(ConfigError::Validation(format!(
                "sitemap.changefreq must be one of {}",
                CHANGEFREQS.join(", ")
            )));
        }
        for (key, value) in [
            ("home_priority", &self.sitemap.home_priority),
            ("pair_priority", &self.sitemap.pair_priority),
        ] {
            match value.parse::<f32>() {
                Ok(p) if (0.0..=1.0).contains(&p) => {}
                _ => {
                    return Err(ConfigError::Validation(format!(
                        "sitemap.{key} must be a number between 0.0 and 1.0"
                    )));
                }
            }
        }
        Ok(())
    }

    /// `base_url` without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn is_two_letters(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Sitemap seeding lists and per-URL metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Priority origin codes, any case.
    pub origins: Vec<String>,
    /// Priority destination codes, any case.
    pub destinations: Vec<String>,
    pub changefreq: String,
    pub home_priority: String,
    pub pair_priority: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        let codes = |list: &[&str]| list.iter().map(|c| c.to_string()).collect();
        Self {
            origins: codes(&["es", "mx", "ar", "cl", "co", "pe", "us"]),
            destinations: codes(&[
                "us", "es", "fr", "it", "de", "gb", "jp", "cn", "th", "br", "ar",
            ]),
            changefreq: "weekly".to_string(),
            home_priority: "1.0".to_string(),
            pair_priority: "0.7".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Subtitles, breadcrumbs, FAQ answers.
    pub text_muted: String,
    pub border: String,
    /// Links and the search button.
    pub accent: String,
    /// "No adapter needed" verdict.
    pub success: String,
    /// "Adapter needed" verdict.
    pub danger: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#5f6368".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#1a73e8".to_string(),
            success: "#1e8e3e".to_string(),
            danger: "#d93025".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#9aa0a6".to_string(),
            border: "#333333".to_string(),
            accent: "#8ab4f8".to_string(),
            success: "#81c995".to_string(),
            danger: "#f28b82".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
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
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the site source directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# QueEnchufe Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Canonical origin for every generated URL (canonical links, sitemap, JSON-LD).
base_url = "https://queenchufe.com"

# Site locale. When data/names.<locale>.json exists and names every country
# in the dataset, those names are used everywhere; otherwise the dataset's
# own "name" fields are.
locale = "es"

# Country dataset, relative to the source directory.
dataset = "data/countries.json"

# Static assets (plug images, favicon), copied to the output root.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
# Every origin x destination combination is listed, except self-pairs and
# codes missing from the dataset.
origins = ["es", "mx", "ar", "cl", "co", "pe", "us"]
destinations = ["us", "es", "fr", "it", "de", "gb", "jp", "cn", "th", "br", "ar"]
changefreq = "weekly"
home_priority = "1.0"
pair_priority = "0.7"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#5f6368"
border = "#e0e0e0"
accent = "#1a73e8"
success = "#1e8e3e"
danger = "#d93025"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
text = "#eeeeee"
text_muted = "#9aa0a6"
border = "#333333"
accent = "#8ab4f8"
success = "#81c995"
danger = "#f28b82"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page-rendering workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_variables(&colors.light, "    "),
        dark = scheme_variables(&colors.dark, "        "),
    )
}

fn scheme_variables(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("accent", &scheme.accent),
        ("success", &scheme.success),
        ("danger", &scheme.danger),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
