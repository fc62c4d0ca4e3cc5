pub mod articles;
pub mod build;
pub mod init;
pub mod paths;
pub mod serve;
pub mod sitemap;
pub mod validate;

use anyhow::{Context, Result};
use inkpress_client::{InkPilotsClient, SnapshotSource, WorkspaceSource};
use inkpress_core::{SiteConfig, parse_site_toml};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SITE_TOML: &str = "site.toml";

/// Load and validate site.toml from a site directory
pub fn load_site_config(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        anyhow::bail!("Site directory does not exist: {}", path.display());
    }

    let site_toml_path = path.join(SITE_TOML);
    if !site_toml_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'inkpress init {}' first",
            SITE_TOML,
            path.display(),
            path.display()
        );
    }

    let config = parse_site_toml(&site_toml_path)
        .with_context(|| format!("Failed to parse {}", SITE_TOML))?;
    Ok(config.with_env_overrides())
}

/// Workspace source: a JSON snapshot when given, otherwise the live API
pub fn workspace_source(
    config: &SiteConfig,
    from_json: Option<PathBuf>,
) -> Result<Arc<dyn WorkspaceSource>> {
    match from_json {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Snapshot file does not exist: {}", path.display());
            }
            Ok(Arc::new(SnapshotSource::new(path)))
        }
        None => {
            let client = InkPilotsClient::from_env(&config.api)
                .context("Failed to create InkPilots client")?;
            Ok(Arc::new(client))
        }
    }
}
