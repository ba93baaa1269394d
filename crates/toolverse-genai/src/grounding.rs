//! Positional pairing of extracted titles with grounding references.
//!
//! Titles are filtered before the zip, so the i-th surviving title takes the
//! i-th reference. The pairing is best-effort: the service does not promise
//! that reference order follows title order.

use crate::types::{GroundingReference, HeadlineItem};

/// Titles must be longer than this many characters.
pub const MIN_TITLE_CHARS: usize = 5;
/// Maximum number of headlines surfaced.
pub const MAX_HEADLINES: usize = 4;
/// Link used once references run out.
pub const FALLBACK_URL: &str = "https://news.google.com/";

pub fn is_valid_title(title: &str) -> bool {
    title.trim().chars().count() > MIN_TITLE_CHARS
}

/// Filter short titles, zip with references, cap at [`MAX_HEADLINES`].
pub fn correlate(titles: &[String], references: &[GroundingReference]) -> Vec<HeadlineItem> {
    titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| is_valid_title(t))
        .enumerate()
        .map(|(i, title)| HeadlineItem {
            title: title.to_string(),
            url: references
                .get(i)
                .map(|r| r.uri.clone())
                .unwrap_or_else(|| FALLBACK_URL.to_string()),
        })
        .take(MAX_HEADLINES)
        .collect()
}
