//! Error types for the SimpleSearch widget.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling.

/// Errors that can occur while configuring, loading or driving the widget.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid or incomplete widget settings.
    #[error("config error: {0}")]
    Config(String),

    /// The search input selector matched no element on the live page.
    #[error("input not found: {0}")]
    InputNotFound(String),

    /// Fetching the source page failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The fetched page or a configured URL could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// A CSS selector for the fetched page is invalid.
    #[error("selector error: {0}")]
    Selector(String),

    /// The live page rejected a query or mutation.
    #[error("page error: {0}")]
    Dom(#[from] search_dom::DomError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for SimpleSearch results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = SearchError::Config("page is missing".into());
        assert_eq!(err.to_string(), "config error: page is missing");
    }

    #[test]
    fn display_input_not_found() {
        let err = SearchError::InputNotFound("#search".into());
        assert_eq!(err.to_string(), "input not found: #search");
    }

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("relative URL without a base".into());
        assert_eq!(err.to_string(), "parse error: relative URL without a base");
    }

    #[test]
    fn display_selector() {
        let err = SearchError::Selector("li[".into());
        assert_eq!(err.to_string(), "selector error: li[");
    }

    #[test]
    fn dom_error_converts() {
        let err: SearchError =
            search_dom::DomError::Hierarchy("text nodes cannot have children".into()).into();
        assert!(err.to_string().starts_with("page error: "));
        assert!(matches!(err, SearchError::Dom(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
