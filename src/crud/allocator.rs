//! Identifier allocation

use crate::storage::Record;

/// Next identifier for a collection: one past the largest existing id.
///
/// Ids are read leniently (see `FieldValue::as_integer`); records without an
/// id count as 0. Ids freed below the maximum are never handed out again.
/// The result is only as fresh as the snapshot it was computed from.
///
/// Returns `None` once the largest id is `i64::MAX`.
pub fn next_id(records: &[Record]) -> Option<i64> {
    records
        .iter()
        .filter_map(Record::id)
        .map(|id| id.as_integer())
        .fold(0, i64::max)
        .checked_add(1)
}
