//! Chapter search.
//!
//! Plain case-insensitive substring matching over english names and chapter
//! numbers. There is no ranking: matches keep canonical chapter order.

use crate::alquran::types::Chapter;

/// Filter chapters by name or number.
///
/// Returns `None` when the query is blank (no filter applied, show
/// everything) and `Some` with the possibly empty match set otherwise.
pub fn filter_chapters<'a>(chapters: &'a [Chapter], query: &str) -> Option<Vec<&'a Chapter>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    Some(
        chapters
            .iter()
            .filter(|c| {
                c.english_name.to_lowercase().contains(&query)
                    || c.number.to_string().contains(&query)
            })
            .collect(),
    )
}
