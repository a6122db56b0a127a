//! Core types: searchable candidates and the rendered result list.

use serde::{Deserialize, Serialize};

/// A searchable item extracted from the fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Visible text of the node, whitespace collapsed.
    pub text: String,
    /// Identifying title used for deep links. Same as `text` for scraped nodes.
    pub title: String,
}

impl CandidateItem {
    /// Build a candidate whose title is its display text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            title: text.clone(),
            text,
        }
    }
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultEntry {
    /// A matching item, rendered as a deep link back into the source page.
    Candidate(CandidateItem),
    /// Literal fallback markup, rendered verbatim.
    Message(String),
}

/// The contents of the result list after the most recent filter pass.
///
/// Always either empty or exactly the entries of the last render; it is
/// replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedList {
    entries: Vec<ResultEntry>,
}

impl RenderedList {
    pub fn new(entries: Vec<ResultEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_title_defaults_to_text() {
        let item = CandidateItem::new("Banana Bread");
        assert_eq!(item.text, "Banana Bread");
        assert_eq!(item.title, "Banana Bread");
    }

    #[test]
    fn rendered_list_clear() {
        let mut list = RenderedList::new(vec![
            ResultEntry::Candidate(CandidateItem::new("Apple Pie")),
            ResultEntry::Message("No results found!".into()),
        ]);
        assert_eq!(list.len(), 2);
        list.clear();
        assert!(list.is_empty());
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn result_entry_serde_is_tagged() {
        let entry = ResultEntry::Message("none".into());
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(json, r#"{"Message":"none"}"#);
        let decoded: ResultEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, entry);
    }
}
