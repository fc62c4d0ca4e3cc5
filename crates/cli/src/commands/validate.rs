use anyhow::{Context, Result};
use inkpress_client::{SnapshotSource, WorkspaceSource};
use inkpress_core::{SiteConfig, enumerate_paths};
use std::path::PathBuf;

use super::{SITE_TOML, load_site_config};

pub async fn run(path: PathBuf, from_json: Option<PathBuf>) -> Result<()> {
    println!("Validating site at: {}", path.display());

    let config = load_site_config(&path)?;
    println!("✓ {} valid", SITE_TOML);
    for line in describe_config(&config) {
        println!("  {}", line);
    }

    match std::env::var(&config.api.api_key_env) {
        Ok(key) if !key.trim().is_empty() => {
            println!("✓ API key found in ${}", config.api.api_key_env)
        }
        _ => println!(
            "⚠ ${} is not set; requests will be sent without credentials",
            config.api.api_key_env
        ),
    }

    if let Some(snapshot) = from_json {
        let data = SnapshotSource::new(&snapshot)
            .fetch_workspace()
            .await
            .with_context(|| format!("Invalid snapshot {}", snapshot.display()))?;
        println!("✓ Snapshot valid: {}", snapshot.display());
        println!("  Workspace: {}", data.workspace.name);
        println!("  Agents:    {}", data.agents.len());
        println!("  Articles:  {}", data.article_count());
        println!("  Routes:    {}", enumerate_paths(Some(&data)).len());
    }

    Ok(())
}

fn describe_config(config: &SiteConfig) -> Vec<String> {
    vec![
        format!("Workspace: {}", config.api.workspace_id),
        format!("API:       {}", config.api.api_base),
        format!("Site URL:  {}", config.site.url),
        format!("Locale:    {}", config.site.locale),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_describe_config() {
        let config = inkpress_core::config::parse_site_toml_str(
            "[site]\nurl = \"https://news.test\"\nlocale = \"tr\"\n[inkpilots]\nworkspace_id = \"ws\"\n",
        )
        .unwrap();

        let lines = describe_config(&config);
        assert_eq!(lines[0], "Workspace: ws");
        assert!(lines[3].ends_with("tr"));
    }

    #[tokio::test]
    async fn test_run_rejects_bad_snapshot() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SITE_TOML),
            "[inkpilots]\nworkspace_id = \"ws\"\n",
        )
        .unwrap();
        let snapshot = dir.path().join("workspace.json");
        fs::write(&snapshot, "{ not json").unwrap();

        assert!(run(dir.path().to_path_buf(), Some(snapshot)).await.is_err());
    }

    #[tokio::test]
    async fn test_run_missing_site_toml() {
        let dir = TempDir::new().unwrap();
        let err = run(dir.path().to_path_buf(), None).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
