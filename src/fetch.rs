//! Loading the source page: one GET, parsed once, candidates extracted.
//!
//! [`PageSource`] is the network seam. [`HttpSource`] is the `reqwest`
//! implementation; tests substitute their own sources or point it at a mock
//! server.

use std::future::Future;

use reqwest::header::CACHE_CONTROL;
use scraper::{Html, Selector};
use url::Url;

use crate::config::Settings;
use crate::error::{Result, SearchError};
use crate::types::CandidateItem;
use crate::{NAME, VERSION};

/// Something that can return the HTML of the source page.
///
/// All implementations must be `Send + Sync` so a widget can be initialised
/// from any task.
pub trait PageSource: Send + Sync {
    /// Fetch `url` and return the response body as text.
    ///
    /// `max_age` is the freshness window, in seconds, to request from caches.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the request fails, the server answers
    /// with an error status, or the body cannot be read.
    fn fetch_html(&self, url: &Url, max_age: u64) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches the source page over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Build a source with the default client from [`build_client`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the client cannot be constructed.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(build_client()?))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Build the [`reqwest::Client`] used for the page fetch.
///
/// The client identifies itself as `SimpleSearch/<version>`, follows up to
/// ten redirects and decompresses gzip and brotli bodies. No request timeout
/// is configured.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!("{NAME}/{VERSION}"))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Value of the `Cache-Control` request header for a freshness window.
pub fn cache_control(max_age: u64) -> String {
    format!("max-age={max_age}")
}

impl PageSource for HttpSource {
    async fn fetch_html(&self, url: &Url, max_age: u64) -> Result<String> {
        tracing::debug!(%url, max_age, "fetching source page");

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, cache_control(max_age))
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("request to {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("{url} answered with an error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("reading {url} failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "source page received");
        Ok(html)
    }
}

/// Resolve the configured `page` against the address of the live page.
///
/// Absolute URLs are returned unchanged; paths are resolved the way a
/// browser resolves a relative `fetch`.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the result is not a valid URL.
pub fn resolve_page_url(location: &Url, page: &str) -> Result<Url> {
    location
        .join(page)
        .map_err(|e| SearchError::Parse(format!("invalid page URL {page:?}: {e}")))
}

/// The parsed source page, reduced to what the widget keeps.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was fetched.
    pub url: Url,
    /// The page `<title>`, empty when missing.
    pub title: String,
    /// Every node matching the `elements` selector, in document order. The
    /// text is the node's raw text content: the fetched page is never
    /// rendered, so its whitespace is kept as written.
    pub candidates: Vec<CandidateItem>,
}

impl FetchedPage {
    /// Parse `html` and extract the nodes matching `elements`.
    ///
    /// A selector matching nothing yields an empty candidate list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Selector`] if `elements` is not a valid CSS selector.
    pub fn parse(url: Url, html: &str, elements: &str) -> Result<Self> {
        let selector = Selector::parse(elements)
            .map_err(|e| SearchError::Selector(format!("{elements:?}: {e:?}")))?;
        let document = Html::parse_document(html);

        let candidates: Vec<CandidateItem> = document
            .select(&selector)
            .map(|el| CandidateItem::new(el.text().collect::<String>()))
            .collect();

        let title = extract_title(&document);
        tracing::debug!(%url, title = %title, candidates = candidates.len(), "source page parsed");

        Ok(Self {
            url,
            title,
            candidates,
        })
    }
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_owned()
}

/// Resolve, fetch and parse the source page configured in `settings`.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `page` or `elements` is unset, and
/// otherwise any error from [`resolve_page_url`], the source, or
/// [`FetchedPage::parse`].
pub async fn load_source<S: PageSource>(
    source: &S,
    location: &Url,
    settings: &Settings,
) -> Result<FetchedPage> {
    settings.validate()?;
    let (Some(page), Some(elements)) = (settings.page(), settings.elements()) else {
        return Err(SearchError::Config("page and elements are required".into()));
    };
    let url = resolve_page_url(location, page)?;
    let html = source.fetch_html(&url, settings.cache_max_age).await?;
    FetchedPage::parse(url, &html, elements)
}
