use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use super::types::{GraphQlResponse, RepoResponse, RepoSlug};

/// REST API base for anonymous repository lookups
const GITHUB_REST_BASE: &str = "https://api.github.com/repos";

/// GraphQL API endpoint for authenticated disk usage queries
const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// GitHub rejects anonymous API requests without a user agent
const REPO_SIZE_USER_AGENT: &str = "repo-size/0.1";

/// Resolves the on-disk size of a repository in kilobytes
///
/// Public repositories are read anonymously through the REST API; with a
/// stored token the GraphQL API is queried instead, which also covers
/// private repositories. Endpoints are injectable so tests can point the
/// provider at a local mock server.
pub struct SizeProvider {
    client: reqwest::Client,
    rest_base: String,
    graphql_url: String,
}

impl Default for SizeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SizeProvider {
    pub fn new() -> Self {
        Self::with_endpoints(GITHUB_REST_BASE, GITHUB_GRAPHQL_URL)
    }

    pub fn with_endpoints(rest_base: &str, graphql_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            rest_base: rest_base.to_string(),
            graphql_url: graphql_url.to_string(),
        }
    }

    /// Resolve the repository size in kilobytes
    ///
    /// Any failure (non-2xx status, transport error, unusable body) is
    /// logged and collapsed to `None`; callers treat "no size" as "stop
    /// silently", never as retryable.
    pub async fn resolve_size(&self, slug: &RepoSlug, token: Option<&str>) -> Option<u64> {
        let result = match token {
            Some(token) => self.fetch_size_authed(slug, token).await,
            None => self.fetch_size_anon(slug).await,
        };

        match result {
            Ok(kilobytes) => Some(kilobytes),
            Err(e) => {
                log::error!(
                    "Failed to resolve size for {}/{}: {e}",
                    slug.owner,
                    slug.name
                );
                None
            }
        }
    }

    /// Anonymous lookup through the REST repository endpoint
    async fn fetch_size_anon(&self, slug: &RepoSlug) -> Result<u64, String> {
        let url = format!("{}/{}/{}", self.rest_base, slug.owner, slug.name);
        log::trace!("Fetching repository size from {url}");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, HeaderValue::from_static(REPO_SIZE_USER_AGENT))
            .send()
            .await
            .map_err(|e| format!("Failed to fetch repository data: {e}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("API error {status}: {body}"));
        }

        let repo: RepoResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse repository response: {e}"))?;

        Ok(repo.size)
    }

    /// Authenticated disk usage query through the GraphQL endpoint
    async fn fetch_size_authed(&self, slug: &RepoSlug, token: &str) -> Result<u64, String> {
        log::trace!(
            "Querying disk usage for {}/{} with stored token",
            slug.owner,
            slug.name
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| format!("Invalid token format: {e}"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(REPO_SIZE_USER_AGENT));

        let query = format!(
            "query {{ repository(owner: \"{}\", name: \"{}\") {{ diskUsage }} }}",
            slug.owner, slug.name
        );
        let body = serde_json::json!({ "query": query });

        let response = self
            .client
            .post(&self.graphql_url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Failed to query disk usage: {e}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("API error {status}: {body}"));
        }

        let graphql: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse disk usage response: {e}"))?;

        graphql
            .disk_usage()
            .ok_or_else(|| "No disk usage in response".to_string())
    }
}
