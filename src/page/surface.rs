use super::types::{
    StatContent, StatsAnchor, LEGACY_STATS_CLASS, MARKER_SELECTOR, PRIVATE_CLASS,
    REFRESHED_STATS_SELECTOR,
};

/// The page the pipeline reads and mutates
///
/// A real host backs this with DOM bindings; tests use an in-memory
/// fake. The controller is the only writer. Appending a stat must make
/// the marker id visible to subsequent [`query_exists`] probes; the
/// marker's presence is the authoritative "already resolved" signal for
/// a page view.
///
/// [`query_exists`]: PageSurface::query_exists
pub trait PageSurface {
    /// Location path with the leading slash stripped
    fn path(&self) -> String;

    /// Whether any element on the page carries the class
    fn class_exists(&self, class: &str) -> bool;

    /// Whether the selector matches any element
    fn query_exists(&self, selector: &str) -> bool;

    /// Append the stat node (tagged with the marker id) under the anchor
    fn append_stat(&mut self, anchor: StatsAnchor, content: StatContent);

    /// Toggle the credential prompt dialog's presence attribute
    fn set_prompt_open(&mut self, open: bool);

    /// Current value of the prompt's token input
    fn prompt_input(&self) -> String;

    /// Page-level private repository marker
    fn is_private(&self) -> bool {
        self.class_exists(PRIVATE_CLASS)
    }

    /// Marker node left by a prior resolution of this page view
    fn has_marker(&self) -> bool {
        self.query_exists(MARKER_SELECTOR)
    }
}

/// Resolve which layout anchors the stat node, legacy probed first
///
/// `None` means the page layout is unknown and nothing can be injected.
pub fn detect_anchor<P: PageSurface + ?Sized>(page: &P) -> Option<StatsAnchor> {
    if page.class_exists(LEGACY_STATS_CLASS) {
        Some(StatsAnchor::LegacyList)
    } else if page.query_exists(REFRESHED_STATS_SELECTOR) {
        Some(StatsAnchor::RefreshedList)
    } else {
        None
    }
}
