use anyhow::Result;
use inkpress_client::{WorkspaceSource, load_workspace};
use inkpress_core::enumerate_paths;
use serde::Serialize;
use std::path::PathBuf;

use super::{load_site_config, workspace_source};

/// One prerenderable route, as catch-all route parameters
#[derive(Debug, Serialize)]
pub struct PathParams {
    pub slug: Vec<String>,
}

/// Print every route the site serves as JSON
pub async fn run(path: PathBuf, from_json: Option<PathBuf>) -> Result<()> {
    let config = load_site_config(&path)?;
    let source = workspace_source(&config, from_json)?;

    let params = collect_paths(source.as_ref()).await;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

pub async fn collect_paths(source: &dyn WorkspaceSource) -> Vec<PathParams> {
    let data = load_workspace(source).await;
    enumerate_paths(data.as_ref())
        .into_iter()
        .map(|slug| PathParams { slug })
        .collect()
}
