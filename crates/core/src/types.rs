use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete workspace payload as returned by the InkPilots API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceData {
    pub workspace: Workspace,
    #[serde(default)]
    pub agents: Vec<Agent>,
}

impl WorkspaceData {
    /// Total number of articles across all agents
    pub fn article_count(&self) -> usize {
        self.agents.iter().map(|a| a.articles.len()).sum()
    }

    pub fn find_agent(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    /// Locate an article by its routing slug, scanning agents in order
    pub fn find_article(&self, slug: &str) -> Option<(&Agent, &Article)> {
        self.agents.iter().find_map(|agent| {
            agent
                .articles
                .iter()
                .find(|article| article.routing_slug() == slug)
                .map(|article| (agent, article))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub visibility: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<WorkspaceHeader>,
}

impl Workspace {
    /// Updated time, falling back to creation time
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        first_timestamp(&[self.updated_at.as_deref(), self.created_at.as_deref()])
    }

    /// Contact website, if one is set
    pub fn website(&self) -> Option<&str> {
        self.header.as_ref().and_then(|h| read_string(h.website.as_deref()))
    }
}

/// Public-facing workspace header (contact and social details)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
    #[serde(default)]
    pub social_accounts: BTreeMap<String, Option<String>>,
}

/// Content-producing agent within a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Agent {
    /// Most recent article timestamp, used as the "last modified" of the
    /// agent's listing pages. Articles without a usable timestamp are skipped.
    pub fn latest_article_timestamp(&self) -> Option<DateTime<Utc>> {
        self.articles
            .iter()
            .filter_map(Article::last_modified)
            .max()
    }

    /// Most recent updated-or-created time, as shown on the listing header
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.articles
            .iter()
            .filter_map(|a| first_timestamp(&[a.updated_at.as_deref(), a.created_at.as_deref()]))
            .max()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
            ArticleStatus::Archived => "archived",
            ArticleStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SEO metadata attached to an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A single article owned by an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "status_or_unknown")]
    pub status: ArticleStatus,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ArticleMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Article {
    /// Routing slug: the trimmed slug when non-empty, otherwise the id
    pub fn routing_slug(&self) -> String {
        read_string(self.slug.as_deref())
            .unwrap_or(&self.id)
            .to_string()
    }

    /// Updated, else published, else created
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        first_timestamp(&[
            self.updated_at.as_deref(),
            self.published_at.as_deref(),
            self.created_at.as_deref(),
        ])
    }

    /// Published time, falling back to creation time
    pub fn published(&self) -> Option<DateTime<Utc>> {
        first_timestamp(&[self.published_at.as_deref(), self.created_at.as_deref()])
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }

    pub fn description(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .and_then(|m| read_string(m.description.as_deref()))
    }

    /// Tags, else meta tags, else meta keywords
    pub fn collect_tags(&self) -> &[String] {
        if !self.tags.is_empty() {
            return &self.tags;
        }
        match &self.meta {
            Some(meta) if !meta.tags.is_empty() => meta.tags.as_slice(),
            Some(meta) => meta.keywords.as_slice(),
            None => &[],
        }
    }
}

/// Structured article body block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Header {
        #[serde(default)]
        text: String,
    },
    Paragraph {
        #[serde(default)]
        text: String,
    },
    Quote {
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
    List {
        #[serde(default)]
        items: Vec<String>,
        #[serde(default)]
        ordered: bool,
    },
    Image {
        #[serde(default)]
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Code {
        #[serde(default)]
        text: String,
    },
    Divider,
    #[serde(other)]
    Unsupported,
}

/// A null status reads as `Unknown`, same as a missing one
fn status_or_unknown<'de, D>(deserializer: D) -> Result<ArticleStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ArticleStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trimmed value when the string has visible content
pub fn read_string(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse an API timestamp. Accepts RFC 3339 as well as naive date-times
/// and bare dates (read as UTC). Anything else is treated as absent.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Pick the first non-empty candidate and parse it. A present but
/// unparsable first candidate yields `None`; later candidates are not consulted.
fn first_timestamp(candidates: &[Option<&str>]) -> Option<DateTime<Utc>> {
    candidates
        .iter()
        .flatten()
        .find(|raw| !raw.is_empty())
        .and_then(|raw| parse_timestamp(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_without_status_keeps_workspace_loadable() {
        let data: WorkspaceData = serde_json::from_value(serde_json::json!({
            "workspace": { "id": "ws", "slug": "ws", "name": "WS" },
            "agents": [{
                "id": "a1",
                "articles": [
                    { "_id": "p1", "slug": "one", "status": "published" },
                    { "_id": "p2", "slug": "two" },
                    { "_id": "p3", "slug": "three", "status": null }
                ]
            }]
        }))
        .unwrap();

        let statuses: Vec<ArticleStatus> =
            data.agents[0].articles.iter().map(|a| a.status).collect();
        assert_eq!(
            statuses,
            vec![
                ArticleStatus::Published,
                ArticleStatus::Unknown,
                ArticleStatus::Unknown
            ]
        );
        assert!(data.find_article("two").is_some());
    }

    fn article(id: &str, slug: Option<&str>) -> Article {
        Article {
            id: id.to_string(),
            slug: slug.map(String::from),
            title: "Title".to_string(),
            status: ArticleStatus::Published,
            language: "en".to_string(),
            model: "gpt".to_string(),
            content: vec![],
            tags: vec![],
            meta: None,
            cover_image: None,
            total_tokens: None,
            created_at: None,
            published_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_slug_falls_back_to_id() {
        assert_eq!(article("a1", Some("  ")).routing_slug(), "a1");
        assert_eq!(article("a1", None).routing_slug(), "a1");
        assert_eq!(article("a1", Some(" hello-world ")).routing_slug(), "hello-world");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2025-03-01T10:00:00Z").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2025-03-01T10:00:00+00:00");

        let millis = parse_timestamp("2025-03-01T10:00:00.123Z").unwrap();
        assert_eq!(millis.timestamp(), rfc.timestamp());

        let naive = parse_timestamp("2025-03-01T10:00:00").unwrap();
        assert_eq!(naive, rfc);

        let date = parse_timestamp("2025-03-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-03-01T00:00:00+00:00");

        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_last_modified_prefers_updated() {
        let mut a = article("a1", None);
        a.created_at = Some("2025-01-01T00:00:00Z".into());
        assert_eq!(a.last_modified(), parse_timestamp("2025-01-01T00:00:00Z"));

        a.published_at = Some("2025-02-01T00:00:00Z".into());
        assert_eq!(a.last_modified(), parse_timestamp("2025-02-01T00:00:00Z"));

        a.updated_at = Some("2025-01-15T00:00:00Z".into());
        assert_eq!(a.last_modified(), parse_timestamp("2025-01-15T00:00:00Z"));
    }

    #[test]
    fn test_collect_tags_fallbacks() {
        let mut a = article("a1", None);
        assert!(a.collect_tags().is_empty());

        a.meta = Some(ArticleMeta {
            description: None,
            tags: vec![],
            keywords: vec!["rust".into()],
        });
        assert_eq!(a.collect_tags(), ["rust".to_string()]);

        a.tags = vec!["systems".into()];
        assert_eq!(a.collect_tags(), ["systems".to_string()]);
    }

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "workspace": {
                "_id": "ws1",
                "slug": "newsroom",
                "name": "Newsroom",
                "visibility": true,
                "createdAt": "2024-06-01T00:00:00Z",
                "header": {
                    "website": "https://news.example.com/",
                    "socialAccounts": { "x": "https://x.com/news", "github": null }
                }
            },
            "agents": [{
                "id": "agent-1",
                "name": "Scribe",
                "articles": [{
                    "_id": "art-1",
                    "slug": "first-post",
                    "title": "First",
                    "status": "published",
                    "language": "en",
                    "model": "gpt-4o",
                    "content": [
                        { "type": "header", "text": "Intro" },
                        { "type": "list", "items": ["a", "b"], "ordered": true },
                        { "type": "divider" },
                        { "type": "embed", "html": "<iframe>" }
                    ],
                    "updatedAt": "2025-01-02T03:04:05Z"
                }]
            }]
        }"#;

        let data: WorkspaceData = serde_json::from_str(json).unwrap();
        assert_eq!(data.workspace.id, "ws1");
        assert_eq!(data.workspace.website(), Some("https://news.example.com/"));
        assert_eq!(data.article_count(), 1);

        let article = &data.agents[0].articles[0];
        assert_eq!(article.status, ArticleStatus::Published);
        assert_eq!(article.content.len(), 4);
        assert_eq!(article.content[2], ContentBlock::Divider);
        assert_eq!(article.content[3], ContentBlock::Unsupported);

        let (agent, found) = data.find_article("first-post").unwrap();
        assert_eq!(agent.id, "agent-1");
        assert_eq!(found.id, "art-1");
    }
}
