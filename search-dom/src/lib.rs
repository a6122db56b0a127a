//! # search-dom
//!
//! The live page model that SimpleSearch mounts into when it runs outside a
//! browser.
//!
//! ## Design
//!
//! - The page is a `scraper::Html`; its `ego_tree` is mutated in place and
//!   nodes are addressed by [`NodeId`]
//! - Malformed markup is repaired by html5ever exactly as a browser would
//! - Queries use `scraper::Selector`, so the live page accepts the same
//!   selector grammar as any page parsed with `scraper`
//! - Cleared nodes are recycled, so repeated re-rendering stays bounded
//! - A vertical viewport: per-element offsets, scroll position and a log of
//!   scroll requests, standing in for layout

pub mod document;
pub mod error;
pub mod html;

pub use document::{Document, ScrollBehavior, ScrollRequest};
pub use ego_tree::NodeId;
pub use error::{DomError, Result};

/// Collapse whitespace runs to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_trims_and_joins() {
        assert_eq!(collapse_whitespace("  Apple\n\t Pie  "), "Apple Pie");
    }

    #[test]
    fn collapse_whitespace_empty() {
        assert_eq!(collapse_whitespace(" \n "), "");
    }
}
