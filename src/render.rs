//! Filter-to-render policy and list rendering.

use crate::config::Settings;
use crate::error::Result;
use crate::filter::{search_results, term_length};
use crate::page::Page;
use crate::types::{CandidateItem, RenderedList, ResultEntry};

/// Decide what the result list shows for `term`.
///
/// - matches and `term` at least `string_length` characters: one entry per match
/// - no matches, whatever the term length: the `no_results` message
/// - matches but `term` too short: nothing
pub fn plan(term: &str, candidates: &[CandidateItem], settings: &Settings) -> RenderedList {
    let matches = search_results(term, candidates);

    if !matches.is_empty() && term_length(term) >= settings.string_length {
        RenderedList::new(
            matches
                .into_iter()
                .cloned()
                .map(ResultEntry::Candidate)
                .collect(),
        )
    } else if matches.is_empty() {
        RenderedList::new(vec![ResultEntry::Message(settings.no_results.clone())])
    } else {
        RenderedList::default()
    }
}

/// Deep link to an item: `<page>?title=<text>`, concatenated as-is.
pub fn result_href(page: &str, text: &str) -> String {
    format!("{page}?title={text}")
}

/// Replace the children of `list` with one `<li>` per entry.
pub fn render_list<P: Page>(
    page: &mut P,
    list: P::Node,
    rendered: &RenderedList,
    source_page: &str,
) -> Result<()> {
    page.clear_children(list)?;
    for entry in rendered.entries() {
        render_entry(page, list, entry, source_page)?;
    }
    Ok(())
}

fn render_entry<P: Page>(
    page: &mut P,
    list: P::Node,
    entry: &ResultEntry,
    source_page: &str,
) -> Result<P::Node> {
    let item = page.create_element("li");
    match entry {
        ResultEntry::Candidate(candidate) => {
            let link = page.create_element("a");
            page.set_attribute(link, "title", &candidate.text)?;
            page.set_attribute(link, "href", &result_href(source_page, &candidate.title))?;
            page.set_text(link, &candidate.text)?;
            page.append_child(item, link)?;
        }
        ResultEntry::Message(markup) => page.set_inner_html(item, markup)?,
    }
    page.append_child(list, item)?;
    Ok(item)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::page::HostPage;
    use url::Url;

    fn candidates() -> Vec<CandidateItem> {
        vec![
            CandidateItem::new("Apple Pie"),
            CandidateItem::new("Banana Bread"),
        ]
    }

    fn settings() -> Settings {
        Settings {
            page: Some("/recipes.html".into()),
            elements: Some("h3".into()),
            ..Default::default()
        }
    }

    fn rendered_texts(list: &RenderedList) -> Vec<String> {
        list.entries()
            .iter()
            .map(|e| match e {
                ResultEntry::Candidate(c) => c.text.clone(),
                ResultEntry::Message(m) => format!("message: {m}"),
            })
            .collect()
    }

    #[test]
    fn long_enough_term_renders_matches() {
        let list = plan("an", &candidates(), &settings());
        assert_eq!(rendered_texts(&list), vec!["Banana Bread"]);
    }

    #[test]
    fn no_match_renders_fallback() {
        let list = plan("z", &candidates(), &settings());
        assert_eq!(rendered_texts(&list), vec!["message: No results found!"]);
    }

    #[test]
    fn short_term_with_matches_renders_nothing() {
        let list = plan("a", &candidates(), &settings());
        assert!(list.is_empty());
    }

    #[test]
    fn empty_term_renders_nothing_under_default_threshold() {
        assert!(plan("", &candidates(), &settings()).is_empty());
    }

    #[test]
    fn zero_threshold_renders_everything_for_empty_term() {
        let settings = Settings {
            string_length: 0,
            ..settings()
        };
        assert_eq!(plan("", &candidates(), &settings).len(), 2);
    }

    #[test]
    fn empty_candidate_set_always_renders_fallback() {
        let list = plan("", &[], &settings());
        assert_eq!(rendered_texts(&list), vec!["message: No results found!"]);
    }

    #[test]
    fn plan_is_a_pure_function_of_inputs() {
        let first = plan("e", &candidates(), &Settings { string_length: 1, ..settings() });
        let second = plan("e", &candidates(), &Settings { string_length: 1, ..settings() });
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn href_is_raw_concatenation() {
        assert_eq!(
            result_href("/recipes.html", "Banana Bread"),
            "/recipes.html?title=Banana Bread"
        );
    }

    #[test]
    fn href_keeps_source_whitespace() {
        assert_eq!(
            result_href("/recipes.html", "Apple\n   Pie"),
            "/recipes.html?title=Apple\n   Pie"
        );
    }

    fn host() -> (HostPage, search_dom::NodeId) {
        let page = HostPage::parse(
            "<ul id='results'><li>stale</li></ul>",
            Url::parse("https://example.com/").unwrap(),
        );
        let list = page.document().select_first("#results").unwrap().unwrap();
        (page, list)
    }

    #[test]
    fn candidate_renders_as_link() {
        let (mut page, list) = host();
        let rendered = RenderedList::new(vec![ResultEntry::Candidate(CandidateItem::new(
            "Banana Bread",
        ))]);
        render_list(&mut page, list, &rendered, "/recipes.html").unwrap();
        assert_eq!(
            page.document().inner_html(list),
            r#"<li><a title="Banana Bread" href="/recipes.html?title=Banana Bread">Banana Bread</a></li>"#
        );
    }

    #[test]
    fn candidate_text_is_not_parsed_as_markup() {
        let (mut page, list) = host();
        let rendered =
            RenderedList::new(vec![ResultEntry::Candidate(CandidateItem::new("a <b> c"))]);
        render_list(&mut page, list, &rendered, "/p").unwrap();
        assert!(page.document().select("#results b").unwrap().is_empty());
        assert_eq!(page.document().inner_text(list), "a <b> c");
    }

    #[test]
    fn message_renders_markup_verbatim() {
        let (mut page, list) = host();
        let rendered = RenderedList::new(vec![ResultEntry::Message(
            "<strong>Nothing</strong> here".into(),
        )]);
        render_list(&mut page, list, &rendered, "/p").unwrap();
        assert_eq!(
            page.document().inner_html(list),
            "<li><strong>Nothing</strong> here</li>"
        );
    }

    #[test]
    fn empty_render_clears_stale_items() {
        let (mut page, list) = host();
        render_list(&mut page, list, &RenderedList::default(), "/p").unwrap();
        assert_eq!(page.document().inner_html(list), "");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let (mut page, list) = host();
        let rendered = plan("an", &candidates(), &settings());
        render_list(&mut page, list, &rendered, "/recipes.html").unwrap();
        let once = page.document().inner_html(list);
        render_list(&mut page, list, &rendered, "/recipes.html").unwrap();
        assert_eq!(page.document().inner_html(list), once);
    }
}
