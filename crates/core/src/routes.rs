use crate::pagination::total_pages;
use crate::types::WorkspaceData;
use std::collections::HashMap;

/// Dedup key reserved for the root path (no segments)
pub const HOME_KEY: &str = "__home__";

/// Normalize a URL path: leading slash, collapsed slashes, no trailing
/// slash except for the root itself.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Split a request path into its non-empty, percent-decoded segments.
/// A segment that does not decode to UTF-8 is kept as sent.
pub fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| match urlencoding::decode(s) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => s.to_string(),
        })
        .collect()
}

/// Percent-encode one path segment for use in a link
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// A page the catch-all route knows how to serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Paginated article listing for one agent. The page token is kept raw
    /// and resolved against the article count at render time.
    AgentListing { agent_id: String, page: String },
    Article { slug: String },
    NotFound,
}

impl Route {
    pub fn parse<S: AsRef<str>>(segments: &[S]) -> Self {
        let parts: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
        match parts.as_slice() {
            [] => Route::Home,
            ["agents", agent_id, rest @ ..] if !agent_id.is_empty() => Route::AgentListing {
                agent_id: agent_id.to_string(),
                page: rest.first().copied().unwrap_or("1").to_string(),
            },
            ["posts", slug, ..] if !slug.is_empty() => Route::Article {
                slug: slug.to_string(),
            },
            _ => Route::NotFound,
        }
    }

    pub fn from_path(path: &str) -> Self {
        Route::parse(&path_segments(path))
    }
}

/// Ordered set of path-segment sequences keyed by their joined form
#[derive(Debug, Default)]
struct PathSet {
    index: HashMap<String, usize>,
    paths: Vec<Vec<String>>,
}

impl PathSet {
    fn push(&mut self, segments: Vec<String>) {
        let key = if segments.is_empty() {
            HOME_KEY.to_string()
        } else {
            segments.join("/")
        };

        match self.index.get(&key) {
            Some(&slot) => self.paths[slot] = segments,
            None => {
                self.index.insert(key, self.paths.len());
                self.paths.push(segments);
            }
        }
    }
}

/// Every statically renderable route for a workspace, as segment lists.
///
/// The root comes first, then for each agent its listing pages followed by
/// its article permalinks. A missing workspace yields no paths at all; the
/// server still resolves arbitrary paths at request time.
pub fn enumerate_paths(data: Option<&WorkspaceData>) -> Vec<Vec<String>> {
    let Some(data) = data else {
        return Vec::new();
    };

    let mut set = PathSet::default();
    set.push(Vec::new());

    for agent in &data.agents {
        for page in 1..=total_pages(agent.articles.len()) {
            set.push(vec!["agents".to_string(), agent.id.clone(), page.to_string()]);
        }

        for article in &agent.articles {
            let slug = article.routing_slug();
            if !slug.is_empty() {
                set.push(vec!["posts".to_string(), slug]);
            }
        }
    }

    set.paths
}

/// Join a segment list back into a normalized URL path
pub fn segments_to_path(segments: &[String]) -> String {
    normalize_path(&segments.join("/"))
}
