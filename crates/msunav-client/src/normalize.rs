//! Normalization of raw search hits into display-ready [`SearchRecord`]s.

use crate::types::{RawSearchRecord, SearchRecord};

/// Converts one raw search hit into a [`SearchRecord`].
///
/// Returns `None` when the hit has no `plainItem`, or when its item ID or
/// item name is missing or blank.
#[must_use]
pub fn normalize_search_record(raw: RawSearchRecord) -> Option<SearchRecord> {
    let plain = raw.plain_item?;
    let item_id = plain.item_id.filter(|id| !id.is_empty())?;
    let item_name = plain.item_name.filter(|name| !name.trim().is_empty())?;

    Some(SearchRecord {
        item_id,
        item_name,
        image_url: raw.image_url,
        category: plain.category,
        token_type: plain.token_type,
    })
}

/// Normalizes a page of raw search hits, dropping incomplete ones.
///
/// Input order is preserved.
#[must_use]
pub fn normalize_search_records(raw: Vec<RawSearchRecord>) -> Vec<SearchRecord> {
    let total = raw.len();
    let records: Vec<SearchRecord> = raw
        .into_iter()
        .filter_map(normalize_search_record)
        .collect();

    let dropped = total - records.len();
    if dropped > 0 {
        tracing::debug!(total, dropped, "dropped search records without id or name");
    }
    records
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
