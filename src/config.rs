//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is sparse: stock defaults are the base layer and the
//! user file overrides only what it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! hostname = "https://voracious.dev"  # Prefix for sitemap URLs
//! label = "voracious.dev"             # Site name drawn on OG images
//!
//! # Known series, in lookup order. Posts name one with `series = "<slug>"`.
//! # [[series]]
//! # slug = "web-crypto"
//! # name = "Web Crypto"
//!
//! [og]
//! logo = "logo-light-192x192.png"     # Relative to the public directory
//! logo_size = 60                      # Logo is cropped and resized to this square
//! font_family = "Inter"
//! fonts = []                          # Extra font files, relative to public/
//! system_fonts = true                 # Also search installed fonts
//! background = [23, 23, 23]
//! title_color = "#dddddd"
//! label_color = "#aaaaaa"
//! output_dir = "og/content"           # Relative to the public directory
//!
//! [sitemap]
//! series_changefreq = "daily"
//! post_changefreq = "weekly"
//! pages = [{ url = "/", changefreq = "daily" }, ...]
//!
//! [subscribe]
//! # api_url = "https://api.example.com/v1/subscribers/"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Arrays (`series`, `fonts`, `sitemap.pages`) replace the default wholesale.
//! Unknown keys are rejected to catch typos early.

use crate::sitemap::ChangeFreq;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
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

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteInfo,
    /// Known series, in lookup order.
    pub series: Vec<SeriesDefinition>,
    pub og: OgConfig,
    pub sitemap: SitemapConfig,
    pub subscribe: SubscribeConfig,
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hostname = &self.site.hostname;
        if !(hostname.starts_with("http://") || hostname.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "site.hostname must start with http:// or https://, got {hostname:?}"
            )));
        }

        let mut slugs = HashSet::new();
        for series in &self.series {
            if series.slug.trim().is_empty() || series.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "series entries need a non-empty slug and name".into(),
                ));
            }
            if series.slug.contains(['/', ':']) {
                return Err(ConfigError::Validation(format!(
                    "series slug {:?} must not contain '/' or ':'",
                    series.slug
                )));
            }
            if !slugs.insert(series.slug.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate series slug {:?}",
                    series.slug
                )));
            }
        }

        if self.og.logo_size == 0 {
            return Err(ConfigError::Validation(
                "og.logo_size must be non-zero".into(),
            ));
        }
        for (key, color) in [
            ("og.title_color", &self.og.title_color),
            ("og.label_color", &self.og.label_color),
        ] {
            if !is_hex_color(color) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a #rgb or #rrggbb color, got {color:?}"
                )));
            }
        }

        for page in &self.sitemap.pages {
            if !page.url.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "sitemap page {:?} must start with '/'",
                    page.url
                )));
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Scheme + host used to build absolute sitemap URLs.
    pub hostname: String,
    /// Site name drawn along the bottom of every OG image.
    pub label: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            hostname: "https://voracious.dev".to_string(),
            label: "voracious.dev".to_string(),
        }
    }
}

/// One known series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesDefinition {
    pub slug: String,
    pub name: String,
}

/// Open Graph image settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OgConfig {
    /// Logo image, relative to the public directory.
    pub logo: String,
    /// Edge length the logo is resized to, in pixels.
    pub logo_size: u32,
    /// Font family named in the SVG text layers.
    pub font_family: String,
    /// Font files to load, relative to the public directory.
    pub fonts: Vec<String>,
    /// Whether installed system fonts are searched as well.
    pub system_fonts: bool,
    /// Canvas background as `[r, g, b]`.
    pub background: [u8; 3],
    pub title_color: String,
    pub label_color: String,
    /// Where images are written, relative to the public directory.
    pub output_dir: String,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            logo: "logo-light-192x192.png".to_string(),
            logo_size: 60,
            font_family: "Inter".to_string(),
            fonts: Vec::new(),
            system_fonts: true,
            background: [23, 23, 23],
            title_color: "#dddddd".to_string(),
            label_color: "#aaaaaa".to_string(),
            output_dir: "og/content".to_string(),
        }
    }
}

impl OgConfig {
    pub fn logo_path(&self, public_dir: &Path) -> PathBuf {
        public_dir.join(&self.logo)
    }

    pub fn font_paths(&self, public_dir: &Path) -> Vec<PathBuf> {
        self.fonts.iter().map(|f| public_dir.join(f)).collect()
    }

    pub fn output_path(&self, public_dir: &Path) -> PathBuf {
        public_dir.join(&self.output_dir)
    }
}

/// A fixed page listed in the sitemap ahead of series and posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitemapPage {
    pub url: String,
    pub changefreq: ChangeFreq,
}

/// Sitemap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    pub pages: Vec<SitemapPage>,
    pub series_changefreq: ChangeFreq,
    pub post_changefreq: ChangeFreq,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        let page = |url: &str, changefreq| SitemapPage {
            url: url.to_string(),
            changefreq,
        };
        Self {
            pages: vec![
                page("/", ChangeFreq::Daily),
                page("/blog", ChangeFreq::Daily),
                page("/sheets", ChangeFreq::Monthly),
            ],
            series_changefreq: ChangeFreq::Daily,
            post_changefreq: ChangeFreq::Weekly,
        }
    }
}

/// Mailing-list settings. The API token is never read from this file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubscribeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never below one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
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
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command. Parses to the same values as
/// [`SiteConfig::default`].
pub fn stock_config_toml() -> &'static str {
    r##"# voracious configuration
# =======================
# Place this file in the content root. All settings are optional; values
# shown are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Scheme + host prefixed to every sitemap URL.
hostname = "https://voracious.dev"

# Site name drawn along the bottom of every Open Graph image.
label = "voracious.dev"

# ---------------------------------------------------------------------------
# Series
# ---------------------------------------------------------------------------
# Posts join a series with `series = "<slug>"` in their front matter.
# Unknown slugs are left as-is and the post gets no series image.
#
# [[series]]
# slug = "web-crypto"
# name = "Web Crypto"

# ---------------------------------------------------------------------------
# Open Graph images
# ---------------------------------------------------------------------------
[og]
# Logo pasted above the title, relative to the public directory.
logo = "logo-light-192x192.png"
logo_size = 60

# Font family used for the title and site label, plus font files to load
# (relative to the public directory). The build fails when no loaded font
# belongs to the family.
font_family = "Inter"
fonts = []
system_fonts = true

background = [23, 23, 23]
title_color = "#dddddd"
label_color = "#aaaaaa"

# Images are written here, relative to the public directory. Existing
# images are never overwritten unless `build --force` is used.
output_dir = "og/content"

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
# One of: always, hourly, daily, weekly, monthly, yearly, never
series_changefreq = "daily"
post_changefreq = "weekly"

# Fixed pages, listed before series and posts.
[[sitemap.pages]]
url = "/"
changefreq = "daily"

[[sitemap.pages]]
url = "/blog"
changefreq = "daily"

[[sitemap.pages]]
url = "/sheets"
changefreq = "monthly"

# ---------------------------------------------------------------------------
# Mailing list
# ---------------------------------------------------------------------------
[subscribe]
# Subscriber endpoint. The token comes from VORACIOUS_EMAIL_API_TOKEN.
# api_url = "https://api.example.com/v1/subscribers/"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for the enrich stage.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
