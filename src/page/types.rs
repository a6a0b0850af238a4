use crate::format::HumanSize;

/// Class of the stats list in the legacy repository layout
pub const LEGACY_STATS_CLASS: &str = "numbers-summary";

/// Selector for the stats list in the refreshed repository layout
pub const REFRESHED_STATS_SELECTOR: &str = ".repository-content .Box .Details ul";

/// Page-level class marking a private repository
pub const PRIVATE_CLASS: &str = "private";

/// Id carried by the injected stat node; its presence means this page
/// view is already resolved
pub const MARKER_ID: &str = "repo-size-stat";

/// Selector form of [`MARKER_ID`]
pub const MARKER_SELECTOR: &str = "#repo-size-stat";

/// Id of the credential prompt dialog in the host markup
pub const TOKEN_PROMPT_ID: &str = "repo-size-token-prompt";

/// Id of the token input field inside the prompt dialog
pub const TOKEN_INPUT_ID: &str = "repo-size-token-input";

/// Where the stat node is appended, resolved once per pipeline entry
///
/// Adding support for a third layout means adding a variant here and a
/// probe in `detect_anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsAnchor {
    /// The legacy stats list
    LegacyList,
    /// The refreshed layout's detail list
    RefreshedList,
}

/// Content of the injected stat node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatContent {
    /// The resolved, human-formatted repository size
    Size(HumanSize),
    /// Placeholder shown on private repositories with no stored token
    MissingToken,
}
