//! GitHub module
//!
//! Identifies the viewed repository from the page path and resolves its
//! on-disk size through the GitHub REST API (anonymous) or the GraphQL
//! API (token-authenticated).

pub mod api;
pub mod slug;
pub mod types;
