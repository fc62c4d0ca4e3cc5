use crate::pagination::total_pages;
use crate::routes::normalize_path;
use crate::types::WorkspaceData;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// One `<url>` of the sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
}

/// Strip trailing slashes from a base URL
pub fn sanitize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

/// Collects sitemap entries keyed by normalized path.
///
/// Registering a path twice keeps the later of the two timestamps; entries
/// keep their first-registration position.
#[derive(Debug)]
pub struct SitemapRegistry {
    base_url: String,
    now: DateTime<Utc>,
    index: HashMap<String, usize>,
    entries: Vec<SitemapEntry>,
}

impl SitemapRegistry {
    pub fn new(base_url: &str, now: DateTime<Utc>) -> Self {
        Self {
            base_url: sanitize_base_url(base_url),
            now,
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Absolute URL for a path; the root maps to the bare base URL
    pub fn url_for(&self, path: &str) -> String {
        let normalized = normalize_path(path);
        if normalized == "/" {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url, normalized)
        }
    }

    /// Register a path. A missing timestamp falls back to `now`.
    pub fn register(&mut self, path: &str, last_modified: Option<DateTime<Utc>>) {
        let normalized = normalize_path(path);
        let timestamp = last_modified.unwrap_or(self.now);

        if let Some(&slot) = self.index.get(&normalized) {
            let existing = &mut self.entries[slot];
            if existing.last_modified < timestamp {
                existing.last_modified = timestamp;
            }
            return;
        }

        let url = self.url_for(&normalized);
        self.index.insert(normalized, self.entries.len());
        self.entries.push(SitemapEntry {
            url,
            last_modified: timestamp,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<SitemapEntry> {
        self.entries
    }
}

/// Build the sitemap for a workspace.
///
/// The base URL is the workspace's contact website when set, otherwise
/// `fallback_base_url`. When the workspace could not be loaded, only the
/// root is emitted, stamped with `now`.
pub fn build_sitemap(
    data: Option<&WorkspaceData>,
    fallback_base_url: &str,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let base_url = data
        .and_then(|d| d.workspace.website())
        .unwrap_or(fallback_base_url);
    let mut registry = SitemapRegistry::new(base_url, now);

    let Some(data) = data else {
        registry.register("/", Some(now));
        return registry.into_entries();
    };

    registry.register("/", data.workspace.last_modified());

    for agent in &data.agents {
        let agent_last_modified = agent.latest_article_timestamp();
        for page in 1..=total_pages(agent.articles.len()) {
            registry.register(&format!("/agents/{}/{}", agent.id, page), agent_last_modified);
        }

        for article in &agent.articles {
            let slug = article.routing_slug();
            if slug.is_empty() {
                continue;
            }
            registry.register(&format!("/posts/{}", slug), article.last_modified());
        }
    }

    registry.into_entries()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Agent, Article, ArticleStatus, Workspace, WorkspaceHeader};
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
    }

    fn article(id: &str, slug: &str, updated: Option<&str>, created: Option<&str>) -> Article {
        Article {
            id: id.to_string(),
            slug: Some(slug.to_string()),
            title: id.to_string(),
            status: ArticleStatus::Published,
            language: "en".to_string(),
            model: "gpt".to_string(),
            content: vec![],
            tags: vec![],
            meta: None,
            cover_image: None,
            total_tokens: None,
            created_at: created.map(String::from),
            published_at: None,
            updated_at: updated.map(String::from),
        }
    }

    fn workspace(website: Option<&str>, agents: Vec<Agent>) -> WorkspaceData {
        WorkspaceData {
            workspace: Workspace {
                id: "ws".to_string(),
                slug: "ws".to_string(),
                name: "Workspace".to_string(),
                visibility: true,
                lang: None,
                created_at: Some("2024-12-01T00:00:00Z".to_string()),
                updated_at: None,
                header: website.map(|w| WorkspaceHeader {
                    website: Some(w.to_string()),
                    ..Default::default()
                }),
            },
            agents,
        }
    }

    fn agent(id: &str, articles: Vec<Article>) -> Agent {
        Agent {
            id: id.to_string(),
            name: None,
            headline: None,
            persona: None,
            bio: None,
            articles,
        }
    }

    #[test]
    fn test_register_keeps_latest_timestamp() {
        let mut registry = SitemapRegistry::new("https://a.test", ts(30));
        registry.register("/posts/x", Some(ts(1)));
        registry.register("posts//x/", Some(ts(5)));
        registry.register("/posts/x", Some(ts(3)));

        let entries = registry.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://a.test/posts/x");
        assert_eq!(entries[0].last_modified, ts(5));
    }

    #[test]
    fn test_register_missing_timestamp_uses_now() {
        let mut registry = SitemapRegistry::new("https://a.test/", ts(30));
        registry.register("/", None);
        let entries = registry.into_entries();
        assert_eq!(entries[0].url, "https://a.test");
        assert_eq!(entries[0].last_modified, ts(30));
    }

    #[test]
    fn test_missing_workspace_emits_root_only() {
        let entries = build_sitemap(None, "https://fallback.test//", ts(9));
        assert_eq!(
            entries,
            vec![SitemapEntry {
                url: "https://fallback.test".to_string(),
                last_modified: ts(9),
            }]
        );
    }

    #[test]
    fn test_build_sitemap_order_and_timestamps() {
        let data = workspace(
            Some("https://news.test/"),
            vec![
                agent(
                    "a1",
                    vec![
                        article("p1", "one", Some("2025-01-04T00:00:00Z"), None),
                        article("p2", "two", None, Some("2025-01-02T00:00:00Z")),
                    ],
                ),
                agent("a2", vec![]),
            ],
        );

        let entries = build_sitemap(Some(&data), "https://fallback.test", ts(20));
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://news.test",
                "https://news.test/agents/a1/1",
                "https://news.test/posts/one",
                "https://news.test/posts/two",
                "https://news.test/agents/a2/1",
            ]
        );

        assert_eq!(entries[0].last_modified, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(entries[1].last_modified, ts(4));
        assert_eq!(entries[2].last_modified, ts(4));
        assert_eq!(entries[3].last_modified, ts(2));
        // agent without articles falls back to now
        assert_eq!(entries[4].last_modified, ts(20));
    }

    #[test]
    fn test_all_listing_pages_share_agent_timestamp() {
        let articles = (0..13)
            .map(|i| {
                article(
                    &format!("p{}", i),
                    &format!("post-{}", i),
                    Some(&format!("2025-01-{:02}T00:00:00Z", i + 1)),
                    None,
                )
            })
            .collect();
        let data = workspace(None, vec![agent("a1", articles)]);

        let entries = build_sitemap(Some(&data), "https://fallback.test", ts(30));
        let pages: Vec<&SitemapEntry> = entries
            .iter()
            .filter(|e| e.url.contains("/agents/"))
            .collect();
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|e| e.last_modified == ts(13)));
        assert!(entries[0].url.starts_with("https://fallback.test"));
    }

    #[test]
    fn test_duplicate_slug_keeps_later_timestamp() {
        let data = workspace(
            None,
            vec![
                agent("a1", vec![article("p1", "same", Some("2025-01-08T00:00:00Z"), None)]),
                agent("a2", vec![article("p2", "same", Some("2025-01-03T00:00:00Z"), None)]),
            ],
        );
        let entries = build_sitemap(Some(&data), "https://f.test", ts(30));
        let post: Vec<&SitemapEntry> = entries.iter().filter(|e| e.url.ends_with("/posts/same")).collect();
        assert_eq!(post.len(), 1);
        assert_eq!(post[0].last_modified, ts(8));
    }
}
