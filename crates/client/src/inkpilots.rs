use crate::{FetchError, WorkspaceSource};
use async_trait::async_trait;
use inkpress_core::{ApiConfig, Article, ArticleStatus, WorkspaceData};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Filters for listing one agent's articles
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
    pub status: Option<ArticleStatus>,
    pub slug: Option<String>,
}

impl ArticleQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(slug) = &self.slug {
            pairs.push(("slug", slug.clone()));
        }
        pairs
    }
}

/// Error body returned by the API on failure
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// The articles endpoint answers with either a bare list or a wrapper
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArticleListResponse {
    List(Vec<Article>),
    Wrapped { articles: Vec<Article> },
    Data { data: Vec<Article> },
}

impl ArticleListResponse {
    fn into_articles(self) -> Vec<Article> {
        match self {
            ArticleListResponse::List(articles)
            | ArticleListResponse::Wrapped { articles }
            | ArticleListResponse::Data { data: articles } => articles,
        }
    }
}

/// InkPilots API client
pub struct InkPilotsClient {
    client: reqwest::Client,
    api_base: String,
    workspace_id: String,
}

impl InkPilotsClient {
    /// Create new InkPilots API client. An empty key sends no credentials.
    pub fn new(config: &ApiConfig, api_key: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        if !api_key.trim().is_empty() {
            let value = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
                .map_err(|e| FetchError::Unknown(format!("Invalid API key: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("inkpress/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            workspace_id: config.workspace_id.clone(),
        })
    }

    /// Create a client reading the API key from the configured environment variable
    pub fn from_env(config: &ApiConfig) -> Result<Self, FetchError> {
        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        if api_key.trim().is_empty() {
            tracing::warn!(
                env = %config.api_key_env,
                "API key not set, requests will be unauthenticated"
            );
        }
        Self::new(config, &api_key)
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// Get the workspace with all agents and their articles
    pub async fn workspace(&self) -> Result<WorkspaceData, FetchError> {
        let url = format!("{}/workspaces/{}", self.api_base, self.workspace_id);
        self.get_json(&url, &[]).await
    }

    /// List one agent's articles
    pub async fn agent_articles(
        &self,
        agent_id: &str,
        query: &ArticleQuery,
    ) -> Result<Vec<Article>, FetchError> {
        let url = format!("{}/agents/{}/articles", self.api_base, agent_id);
        let response: ArticleListResponse = self.get_json(&url, &query.to_pairs()).await?;
        Ok(response.into_articles())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, FetchError> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Unknown(format!("Failed to decode response from {}: {}", url, e)))
    }
}

#[async_trait]
impl WorkspaceSource for InkPilotsClient {
    async fn fetch_workspace(&self) -> Result<WorkspaceData, FetchError> {
        self.workspace().await
    }
}

/// Map a non-success response to a tagged error
fn classify_error(status: StatusCode, body: &str) -> FetchError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    if status == StatusCode::PAYMENT_REQUIRED {
        return FetchError::QuotaExceeded { message };
    }

    FetchError::Api {
        status: status.as_u16(),
        code: parsed.code.unwrap_or_else(|| "unknown".to_string()),
        message,
    }
}
