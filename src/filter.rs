//! Case-insensitive substring filter over the cached candidates.

use crate::types::CandidateItem;

/// Return the candidates whose text contains `term`, ignoring case.
///
/// Stable: matches keep their original relative order. The empty term
/// matches everything. The term is used as-is (no trimming or tokenizing).
pub fn search_results<'a>(term: &str, candidates: &'a [CandidateItem]) -> Vec<&'a CandidateItem> {
    let needle = term.to_lowercase();
    candidates
        .iter()
        .filter(|item| item.text.to_lowercase().contains(&needle))
        .collect()
}

/// Length of a search term as compared against `stringLength`, in characters.
pub fn term_length(term: &str) -> usize {
    term.chars().count()
}
