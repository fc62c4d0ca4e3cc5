use anyhow::Result;
use chrono::Utc;
use inkpress_client::load_workspace;
use inkpress_core::build_sitemap;
use inkpress_generator::render_sitemap_xml;
use std::path::PathBuf;

use super::{load_site_config, workspace_source};

/// Print sitemap entries as JSON, or as sitemap XML with `xml`
pub async fn run(path: PathBuf, from_json: Option<PathBuf>, xml: bool) -> Result<()> {
    let config = load_site_config(&path)?;
    let source = workspace_source(&config, from_json)?;

    let data = load_workspace(source.as_ref()).await;
    let entries = build_sitemap(data.as_ref(), &config.site.url, Utc::now());

    if xml {
        print!("{}", render_sitemap_xml(&entries));
    } else {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }
    Ok(())
}
