use anyhow::{Context, Result};
use inkpress_client::{ArticleQuery, InkPilotsClient};
use inkpress_core::Article;
use inkpress_core::display::format_date;
use std::path::PathBuf;

use super::load_site_config;

/// List one agent's articles straight from the API
pub async fn run(path: PathBuf, agent_id: String, query: ArticleQuery, json: bool) -> Result<()> {
    let config = load_site_config(&path)?;
    let client =
        InkPilotsClient::from_env(&config.api).context("Failed to create InkPilots client")?;

    let articles = client
        .agent_articles(&agent_id, &query)
        .await
        .with_context(|| format!("Failed to list articles for agent {}", agent_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    println!("Agent {}: {} article(s)", agent_id, articles.len());
    for article in &articles {
        println!("{}", summary_line(article));
    }
    Ok(())
}

fn summary_line(article: &Article) -> String {
    let date = format_date(article.last_modified(), "en").unwrap_or_else(|| "-".to_string());
    let title = match article.title.trim() {
        "" => "Untitled article",
        title => title,
    };
    format!(
        "  {:<10} {:<14} /posts/{}  {}",
        article.status.as_str(),
        date,
        article.routing_slug(),
        title
    )
}
