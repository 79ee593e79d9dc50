//! CRUD Property Tests
//!
//! Behaviour of the generic resource engine over an in-memory store:
//! - Created records round-trip through get
//! - Ids are max + 1 and keep increasing across deletions
//! - Partial updates touch only mentioned fields
//! - Identifiers compare on their text form

use std::sync::Arc;

use axum::http::Method;
use opencrm::api::CrmError;
use opencrm::crud::{parse_payload, CrudDispatcher, Payload};
use opencrm::storage::{Dataset, FieldValue, MemoryStore, Record, StorageAccessor};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn seeded() -> CrudDispatcher {
    CrudDispatcher::with_builtin_schemas(StorageAccessor::in_memory())
}

fn over(dataset: &Dataset) -> CrudDispatcher {
    let store = MemoryStore::with_dataset(dataset).unwrap();
    CrudDispatcher::with_builtin_schemas(StorageAccessor::new(Arc::new(store)))
}

fn payload(value: Value) -> Payload {
    parse_payload(&serde_json::to_vec(&value).unwrap())
}

fn id_of(record: &Record) -> String {
    record.id().unwrap().as_text().into_owned()
}

// =============================================================================
// Create / Get Tests
// =============================================================================

/// A created record reads back with exactly the declared fields sent.
#[test]
fn test_create_then_get_round_trips_declared_fields() {
    let d = seeded();
    let created = d
        .create(
            "contacts",
            payload(json!({
                "first_name": "Анна",
                "last_name": "Петрова",
                "email": "anna@example.com",
                "phone": null,
                "notes": "dropped"
            })),
        )
        .unwrap();

    let fetched = d.get("contacts", &id_of(&created)).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(
        Value::from(fetched),
        json!({
            "id": 1,
            "first_name": "Анна",
            "last_name": "Петрова",
            "email": "anna@example.com",
            "phone": null
        })
    );
}

/// New ids are one above the current maximum.
#[test]
fn test_id_is_previous_max_plus_one() {
    let mut dataset = Dataset::new();
    dataset.insert_collection(
        "deals",
        vec![
            Record::with_id(10).field("title", "a"),
            Record::with_id(4).field("title", "b"),
        ],
    );
    let d = over(&dataset);

    let created = d.create("deals", payload(json!({"title": "c"}))).unwrap();
    assert_eq!(created.id(), Some(&FieldValue::integer(11)));
}

/// Missing required fields are all named, in declaration order.
#[test]
fn test_missing_required_fields_reported() {
    let err = seeded()
        .create("users", payload(json!({"name": "A"})))
        .unwrap_err();
    assert!(matches!(err, CrmError::BadRequest(_)));
    assert_eq!(err.to_string(), "Missing required fields: email, role");
}

/// Null satisfies a required field.
#[test]
fn test_null_counts_as_present() {
    let created = seeded()
        .create("deal-statuses", payload(json!({"name": null})))
        .unwrap();
    assert_eq!(created.get("name"), Some(&FieldValue::Null));
}

// =============================================================================
// Update Tests
// =============================================================================

/// Fields not mentioned in an update keep their values.
#[test]
fn test_partial_update_keeps_unmentioned_fields() {
    let d = seeded();
    let updated = d
        .update("deals", "2", payload(json!({"value": 50_000_000})))
        .unwrap();

    assert_eq!(updated.get("value"), Some(&FieldValue::integer(50_000_000)));
    assert_eq!(
        updated.get("title"),
        Some(&FieldValue::text("Продажа земельного участка"))
    );
    assert_eq!(d.get("deals", "2").unwrap(), updated);
}

/// An empty update payload leaves the record as it was.
#[test]
fn test_empty_update_is_noop() {
    let d = seeded();
    let before = d.get("contracts", "1").unwrap();
    let after = d.update("contracts", "1", Payload::new()).unwrap();
    assert_eq!(before, after);
}

/// Updating a missing record fails without writing.
#[test]
fn test_update_missing_record() {
    let err = seeded()
        .update("users", "77", payload(json!({"name": "x"})))
        .unwrap_err();
    assert_eq!(err.to_string(), "Record not found");
}

// =============================================================================
// Delete Tests
// =============================================================================

/// A deleted record can no longer be fetched.
#[test]
fn test_delete_then_get_is_not_found() {
    let d = seeded();
    d.delete("contractors", "1").unwrap();

    let err = d.get("contractors", "1").unwrap_err();
    assert!(matches!(err, CrmError::NotFound(_)));
    assert_eq!(d.list("contractors").unwrap().len(), 1);
}

/// Successive creates keep increasing even after an intervening delete.
#[test]
fn test_ids_increase_across_deletion() {
    let d = seeded();
    let first = d.create("deals", payload(json!({"title": "x"}))).unwrap();
    d.delete("deals", "1").unwrap();
    let second = d.create("deals", payload(json!({"title": "y"}))).unwrap();

    assert!(second.id().unwrap().as_integer() > first.id().unwrap().as_integer());
}

/// Deleting the highest id lets the next create reuse it.
#[test]
fn test_deleting_max_id_allows_reuse() {
    let d = seeded();
    d.delete("deal-statuses", "3").unwrap();
    let created = d
        .create("deal-statuses", payload(json!({"name": "Отменена"})))
        .unwrap();
    assert_eq!(created.id(), Some(&FieldValue::integer(3)));
}

// =============================================================================
// Identifier Comparison Tests
// =============================================================================

/// String ids stored in the document match the path segment.
#[test]
fn test_string_ids_match_path_segment() {
    let mut dataset = Dataset::new();
    dataset.insert_collection(
        "companies",
        vec![Record::default().field("id", "7").field("name", "Acme")],
    );
    let d = over(&dataset);

    assert!(d.get("companies", "7").is_ok());
    assert!(d.get("companies", "07").is_err());
}

/// The dispatcher checks the resource before the method.
#[test]
fn test_unknown_resource_before_method() {
    let err = seeded()
        .dispatch(&Method::PUT, "invoices", None, b"")
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown resource");
}
