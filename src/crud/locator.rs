//! Record lookup by identifier
//!
//! Identifiers arrive as path segments and are stored as numbers, so the
//! comparison is on textual form: a stored `7` and a stored `"7"` both match
//! the segment `7`. The first match wins.

use std::borrow::Cow;

use crate::storage::Record;

fn id_text(record: &Record) -> Cow<'_, str> {
    record
        .id()
        .map(|id| id.as_text())
        .unwrap_or(Cow::Borrowed(""))
}

/// Find the record whose id renders as `id`
pub fn find_by_id<'a>(records: &'a [Record], id: &str) -> Option<&'a Record> {
    records.iter().find(|record| id_text(record) == id)
}

/// Position of the record whose id renders as `id`
pub fn find_index_by_id(records: &[Record], id: &str) -> Option<usize> {
    records.iter().position(|record| id_text(record) == id)
}
