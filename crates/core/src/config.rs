use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.inkpilots.com/api/v1";
pub const DEFAULT_API_KEY_ENV: &str = "INKPILOTS_API_KEY";
pub const DEFAULT_SITE_URL: &str = "https://example.com";
pub const DEFAULT_LOCALE: &str = "en";

/// Environment variable that overrides `site.url`
pub const SITE_URL_ENV: &str = "INKPRESS_SITE_URL";

const SUPPORTED_LOCALES: &[&str] = &["en", "de", "tr"];

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    site: RawSite,
    inkpilots: RawInkPilots,
}

#[derive(Debug, Default, Deserialize)]
struct RawSite {
    url: Option<String>,
    locale: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawInkPilots {
    workspace_id: String,
    api_base: Option<String>,
    api_key_env: Option<String>,
}

/// Complete site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteSettings,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Fallback origin used when the workspace has no website of its own
    pub url: String,
    pub locale: String,
}

/// Where and how to reach the InkPilots API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub workspace_id: String,
    pub api_base: String,
    pub api_key_env: String,
}

impl SiteConfig {
    /// Apply `INKPRESS_SITE_URL` when set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(SITE_URL_ENV)
            && !url.trim().is_empty()
        {
            self.site.url = url.trim().trim_end_matches('/').to_string();
        }
        self
    }
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let workspace_id = raw.inkpilots.workspace_id.trim().to_string();
    if workspace_id.is_empty() {
        return Err(Error::ConfigParse(
            "Empty value in 'inkpilots.workspace_id' field".to_string(),
        ));
    }

    let api_base = validate_url(
        raw.inkpilots.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
        "inkpilots.api_base",
    )?;

    let url = validate_url(
        raw.site.url.as_deref().unwrap_or(DEFAULT_SITE_URL),
        "site.url",
    )?;

    let locale = raw
        .site
        .locale
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    if !SUPPORTED_LOCALES.contains(&locale.as_str()) {
        return Err(Error::ConfigParse(format!(
            "Unsupported locale '{}' in 'site.locale', expected one of: {}",
            locale,
            SUPPORTED_LOCALES.join(", ")
        )));
    }

    let api_key_env = raw
        .inkpilots
        .api_key_env
        .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());

    Ok(SiteConfig {
        site: SiteSettings { url, locale },
        api: ApiConfig {
            workspace_id,
            api_base,
            api_key_env,
        },
    })
}

/// Resolve the page locale: the workspace language when it is one we ship
/// strings for, otherwise the configured locale.
///
/// Language tags match on their primary subtag, case-insensitively, so
/// `"DE"` and `"de-AT"` both resolve to `"de"`.
pub fn resolve_locale<'a>(workspace_lang: Option<&str>, configured: &'a str) -> &'a str {
    workspace_lang
        .and_then(supported_locale)
        .unwrap_or(configured)
}

fn supported_locale(tag: &str) -> Option<&'static str> {
    let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|locale| locale.eq_ignore_ascii_case(primary))
}

/// Validate an absolute http(s) URL and strip its trailing slashes
fn validate_url(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| {
        Error::ConfigParse(format!("Invalid URL in '{}': '{}' ({})", field_name, value, e))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::ConfigParse(format!(
            "URL in '{}' must use http or https: '{}'",
            field_name, value
        )));
    }

    Ok(trimmed.to_string())
}
