use serde::Deserialize;

/// The `owner/name` pair identifying the viewed repository
///
/// Derived once per pipeline invocation from the page path; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

/// REST repository response (only the field we read)
///
/// `size` is the on-disk size in kilobytes as reported by
/// `GET /repos/{owner}/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoResponse {
    pub size: u64,
}

/// GraphQL response envelope for the disk usage query
///
/// A 2xx response can still carry a null `data` or `repository` when the
/// query failed at the GraphQL level; both read as "no size".
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<GraphQlData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    /// On-disk size in kilobytes
    pub disk_usage: u64,
}

impl GraphQlResponse {
    /// Extract the disk usage in kilobytes, if the query resolved
    pub fn disk_usage(&self) -> Option<u64> {
        self.data
            .as_ref()
            .and_then(|d| d.repository.as_ref())
            .map(|r| r.disk_usage)
    }
}
