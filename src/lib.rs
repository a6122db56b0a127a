//! SimpleSearch: a live-filter search widget for an input field.
//!
//! The widget wraps an input in a container, loads a source page once, and
//! lists the source elements whose text contains what the user typed. Each
//! result links back to the source page with a `?title=` deep link, which the
//! widget itself honours by highlighting and scrolling to the matching
//! element.
//!
//! # Architecture
//!
//! - **Config**: [`Settings`], merged over defaults from JSON or TOML
//! - **Fetch**: one `reqwest` GET per widget, parsed with `scraper`
//! - **Filter**: case-insensitive substring match, source order preserved
//! - **Render**: the asymmetric result policy, written into the live page
//! - **Scroll**: the `?title=` deep link on the page the widget lives in
//! - **Widget**: [`SimpleSearch`], which ties the above to host events
//!
//! The live page is abstracted by [`Page`]; [`HostPage`] implements it over
//! the in-memory document from the `search-dom` crate.

pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod page;
pub mod render;
pub mod scroll;
pub mod types;
pub mod widget;

pub use config::Settings;
pub use error::{Result, SearchError};
pub use fetch::{FetchedPage, HttpSource, PageSource};
pub use page::{HostPage, Page};
pub use types::{CandidateItem, RenderedList, ResultEntry};
pub use widget::{SimpleSearch, WidgetEvent, WidgetState};

/// Component name used in diagnostics and the `User-Agent` header.
pub const NAME: &str = "SimpleSearch";

/// Component version, reported in every diagnostic line.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
