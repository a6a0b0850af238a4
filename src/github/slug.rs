//! Repository slug parsing from the page location path

use crate::github::types::RepoSlug;

impl RepoSlug {
    /// Derive the `owner/name` slug from a location path (leading slash
    /// already stripped)
    ///
    /// Returns `None` when the path does not identify a repository; not
    /// every page is a repository page. Segments past the first two
    /// (tree views, blob paths, etc.) are ignored.
    pub fn from_path(path: &str) -> Option<RepoSlug> {
        let mut segments = path.split('/');

        let owner = segments.next()?;
        let name = segments.next()?;

        if owner.is_empty() || name.is_empty() {
            return None;
        }

        Some(RepoSlug {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}
