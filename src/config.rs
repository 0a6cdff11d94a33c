//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` in the content directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! # title = "Jane Doe"       # Page title (defaults to the profile name)
//! assets_dir = "assets"     # Copied verbatim to the output root
//! resume = "resume.pdf"     # Download link target, relative to the output root
//! avatar = "profile.jpg"    # Header avatar, relative to the output root
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#0f172a"
//! text_muted = "#64748b"
//! border = "#e2e8f0"
//! primary = "#0284c7"
//! surface = "#f8fafc"
//!
//! [colors.dark]
//! background = "#0b1120"
//! text = "#e2e8f0"
//! text_muted = "#94a3b8"
//! border = "#1e293b"
//! primary = "#38bdf8"
//! surface = "#111827"
//!
//! [mail]
//! endpoint = "https://api.emailjs.com/api/v1.0/email/send"
//! # service_id = "service_xxx"   # or FOLIO_MAIL_SERVICE_ID
//! # template_id = "template_xxx" # or FOLIO_MAIL_TEMPLATE_ID
//! # token = "public-key"         # or FOLIO_MAIL_TOKEN
//! timeout_secs = 15      # 1 to 300
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
    /// Page-level settings (title, static assets).
    pub site: SiteSection,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Contact-form relay settings.
    pub mail: MailConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mail.timeout_secs == 0 || self.mail.timeout_secs > MAX_MAIL_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "mail.timeout_secs must be between 1 and {MAX_MAIL_TIMEOUT_SECS}"
            )));
        }
        if !(self.mail.endpoint.starts_with("https://") || self.mail.endpoint.starts_with("http://"))
        {
            return Err(ConfigError::Validation(
                "mail.endpoint must be an http(s) URL".into(),
            ));
        }
        if self.site.assets_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.assets_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Page-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Document title. Falls back to the profile name when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Directory inside the content root copied verbatim to the output root.
    pub assets_dir: String,
    /// Resume file offered as a direct download.
    pub resume: String,
    /// Avatar image shown in the header.
    pub avatar: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: None,
            assets_dir: "assets".to_string(),
            resume: "resume.pdf".to_string(),
            avatar: "profile.jpg".to_string(),
        }
    }
}

/// Outbound mail relay settings.
///
/// The identifiers and token are optional here; the environment overrides
/// them at build time (see [`crate::gateway::MailCredentials`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MailConfig {
    /// Relay endpoint accepting the JSON send request.
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Public key / access token presented to the relay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Client-side timeout for one send, in seconds.
    pub timeout_secs: u64,
}

pub const DEFAULT_MAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Upper bound for `mail.timeout_secs`.
pub const MAX_MAIL_TIMEOUT_SECS: u64 = 300;

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_MAIL_ENDPOINT.to_string(),
            service_id: None,
            template_id: None,
            token: None,
            timeout_secs: 15,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
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
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (nav links, card subtitles, footer).
    pub text_muted: String,
    /// Card and separator borders.
    pub border: String,
    /// Accent for headings, icons and buttons.
    pub primary: String,
    /// Card and code-block background.
    pub surface: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            primary: "#0284c7".to_string(),
            surface: "#f8fafc".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b1120".to_string(),
            text: "#e2e8f0".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#1e293b".to_string(),
            primary: "#38bdf8".to_string(),
            surface: "#111827".to_string(),
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
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file next to data.json.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Document title. Defaults to personalInfo.name from data.json.
# title = "Jane Doe"

# Directory (inside the content root) copied verbatim to the output root.
assets_dir = "assets"

# Resume offered by the "Download Resume" button, relative to the output root.
resume = "resume.pdf"

# Header avatar, relative to the output root.
avatar = "profile.jpg"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#0f172a"
text_muted = "#64748b"
border = "#e2e8f0"
primary = "#0284c7"
surface = "#f8fafc"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark, or the theme toggle)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b1120"
text = "#e2e8f0"
text_muted = "#94a3b8"
border = "#1e293b"
primary = "#38bdf8"
surface = "#111827"

# ---------------------------------------------------------------------------
# Contact form relay
# ---------------------------------------------------------------------------
[mail]
endpoint = "https://api.emailjs.com/api/v1.0/email/send"

# Relay identifiers. Prefer the environment so they stay out of the repo:
#   FOLIO_MAIL_SERVICE_ID, FOLIO_MAIL_TEMPLATE_ID, FOLIO_MAIL_TOKEN
# service_id = "service_xxxxxxx"
# template_id = "template_xxxxxxx"
# token = "public-key"

# Give up on a send after this many seconds (1 to 300).
timeout_secs = 15
"##
}

/// Generate CSS custom properties from color config.
///
/// Dark values apply under `prefers-color-scheme: dark` unless the visitor
/// picked a theme with the toggle, which sets `data-theme` on `<html>`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |s: &ColorScheme| {
        format!(
            "--color-bg: {}; --color-text: {}; --color-text-muted: {}; --color-border: {}; --color-primary: {}; --color-surface: {};",
            s.background, s.text, s.text_muted, s.border, s.primary, s.surface
        )
    };
    format!(
        r#":root {{ {light} }}
@media (prefers-color-scheme: dark) {{
    :root:not([data-theme="light"]) {{ {dark} }}
}}
:root[data-theme="dark"] {{ {dark} }}"#,
        light = vars(&colors.light),
        dark = vars(&colors.dark),
    )
}
