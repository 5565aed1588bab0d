//! Extraction of the hydration data a server-rendered page embeds for its
//! client-side framework.

use scraper::{Html, Selector};

/// The element carrying the page's hydration JSON.
const HYDRATION_SELECTOR: &str = "script#__NEXT_DATA__";

/// Returns the text content of the first hydration data element in `html`.
///
/// Returns `None` when the element is absent or contains only whitespace.
#[must_use]
pub fn extract_hydration_data(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(HYDRATION_SELECTOR).ok()?;
    let text: String = document.select(&selector).next()?.text().collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
