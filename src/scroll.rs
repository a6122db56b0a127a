//! Deep-link scrolling: highlight and scroll to the item named in `?title=`.

use search_dom::ScrollBehavior;
use url::Url;

use crate::config::Settings;
use crate::error::Result;
use crate::page::Page;

/// Query parameter carrying the deep-link target.
pub const TITLE_PARAM: &str = "title";

/// Class added to every element matched by a deep link.
pub const ACTIVE_CLASS: &str = "active";

/// The percent-decoded `title` parameter of `location`, if present and non-empty.
pub fn deep_link_title(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == TITLE_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Mark and scroll to the live-page elements whose text contains `title`.
///
/// Every element matching `elements` whose text contains `title`
/// (case-sensitive) gets [`ACTIVE_CLASS`] and a smooth scroll to
/// `bounding_top + page_y_offset + calc_scroll_top`. All matches are visited,
/// so the viewport ends on the last one. Returns the final scroll target.
pub fn scroll_to_element<P: Page>(
    page: &mut P,
    elements: &str,
    title: &str,
    calc_scroll_top: f64,
) -> Result<Option<f64>> {
    let mut target = None;
    for node in page.query_selector_all(elements)? {
        if !page.inner_text(node).contains(title) {
            continue;
        }
        page.add_class(node, ACTIVE_CLASS)?;
        let top = page.bounding_top(node) + page.page_y_offset() + calc_scroll_top;
        tracing::debug!(?node, top, "deep link target");
        page.scroll_to(top, ScrollBehavior::Smooth);
        target = Some(top);
    }
    Ok(target)
}

/// Run the deep link for the current address if scrolling is enabled.
pub fn apply_deep_link<P: Page>(page: &mut P, settings: &Settings) -> Result<Option<f64>> {
    if !settings.scroll {
        return Ok(None);
    }
    let (Some(title), Some(elements)) = (deep_link_title(page.location()), settings.elements())
    else {
        return Ok(None);
    };
    scroll_to_element(page, elements, &title, settings.calc_scroll_top)
}
