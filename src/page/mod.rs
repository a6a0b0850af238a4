//! Page module
//!
//! The page-surface port the pipeline mutates, the dual-layout anchor
//! strategy, and the selector constants a real DOM host binds to.

pub mod surface;
pub mod types;

pub use surface::{detect_anchor, PageSurface};
pub use types::{StatContent, StatsAnchor};
