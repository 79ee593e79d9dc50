//! CRUD dispatcher
//!
//! Routes (method, resource, optional id) to list/get/create/update/delete:
//!
//! | Method      | id      | Operation |
//! |-------------|---------|-----------|
//! | GET         | absent  | list      |
//! | GET         | present | get       |
//! | POST        | any     | create    |
//! | PUT / PATCH | present | update    |
//! | DELETE      | present | delete    |
//!
//! Anything else is `MethodNotAllowed`. Each operation loads the full dataset
//! and mutating operations save it back before replying.

use axum::http::Method;
use serde_json::{Map, Value};

use crate::api::{CrmError, CrmResult, Reply, StatusBody};
use crate::schema::{ResourceSchema, SchemaRegistry};
use crate::storage::{FieldValue, Record, StorageAccessor};

use super::allocator::next_id;
use super::locator::{find_by_id, find_index_by_id};

/// Request body as a free-form field map
pub type Payload = Map<String, Value>;

/// Decode a request body leniently.
///
/// Anything that is not a JSON object (empty body, malformed JSON, arrays,
/// scalars) becomes an empty payload.
pub fn parse_payload(body: &[u8]) -> Payload {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Payload::new(),
    }
}

fn scalar(field: &str, value: Value) -> CrmResult<FieldValue> {
    FieldValue::try_from(value).map_err(|_| CrmError::non_scalar_field(field))
}

/// Generic resource CRUD engine
#[derive(Debug, Clone)]
pub struct CrudDispatcher {
    storage: StorageAccessor,
    registry: SchemaRegistry,
}

impl CrudDispatcher {
    pub fn new(storage: StorageAccessor, registry: SchemaRegistry) -> Self {
        Self { storage, registry }
    }

    /// Dispatcher over the built-in resources
    pub fn with_builtin_schemas(storage: StorageAccessor) -> Self {
        Self::new(storage, SchemaRegistry::builtin())
    }

    /// Route one request to the matching operation
    pub fn dispatch(
        &self,
        method: &Method,
        resource: &str,
        id: Option<&str>,
        body: &[u8],
    ) -> CrmResult<Reply> {
        let schema = self.schema(resource)?;

        match (method, id) {
            (&Method::GET, None) => {
                let records = self.list_records(schema)?;
                Ok(Reply::ok(records))
            }
            (&Method::GET, Some(id)) => Ok(Reply::ok(self.get_record(schema, id)?)),
            (&Method::POST, _) => {
                let record = self.create_record(schema, parse_payload(body))?;
                Ok(Reply::created(record))
            }
            (&Method::PUT | &Method::PATCH, Some(id)) => {
                let record = self.update_record(schema, id, parse_payload(body))?;
                Ok(Reply::ok(record))
            }
            (&Method::DELETE, Some(id)) => {
                self.delete_record(schema, id)?;
                Ok(Reply::ok(StatusBody::deleted()))
            }
            _ => Err(CrmError::MethodNotAllowed),
        }
    }

    /// All records of `resource` in insertion order
    pub fn list(&self, resource: &str) -> CrmResult<Vec<Record>> {
        self.list_records(self.schema(resource)?)
    }

    /// The record of `resource` whose id renders as `id`
    pub fn get(&self, resource: &str, id: &str) -> CrmResult<Record> {
        self.get_record(self.schema(resource)?, id)
    }

    /// Create a record from the schema-declared fields of `payload`
    pub fn create(&self, resource: &str, payload: Payload) -> CrmResult<Record> {
        self.create_record(self.schema(resource)?, payload)
    }

    /// Merge the schema-declared fields of `payload` into an existing record
    pub fn update(&self, resource: &str, id: &str, payload: Payload) -> CrmResult<Record> {
        self.update_record(self.schema(resource)?, id, payload)
    }

    /// Remove a record
    pub fn delete(&self, resource: &str, id: &str) -> CrmResult<()> {
        self.delete_record(self.schema(resource)?, id)
    }

    fn schema(&self, resource: &str) -> CrmResult<&'static ResourceSchema> {
        self.registry
            .lookup(resource)
            .ok_or_else(CrmError::unknown_resource)
    }

    fn list_records(&self, schema: &ResourceSchema) -> CrmResult<Vec<Record>> {
        let dataset = self.storage.load()?;
        Ok(dataset.collection(schema.name).to_vec())
    }

    fn get_record(&self, schema: &ResourceSchema, id: &str) -> CrmResult<Record> {
        let dataset = self.storage.load()?;
        find_by_id(dataset.collection(schema.name), id)
            .cloned()
            .ok_or_else(CrmError::record_not_found)
    }

    fn create_record(&self, schema: &ResourceSchema, mut payload: Payload) -> CrmResult<Record> {
        let missing = schema.missing_required(&payload);
        if !missing.is_empty() {
            return Err(CrmError::missing_fields(&missing));
        }

        let mut dataset = self.storage.load()?;
        let records = dataset.collection_mut(schema.name);

        let id = next_id(records).ok_or_else(CrmError::id_space_exhausted)?;
        let mut record = Record::with_id(id);
        for field in schema.declared_fields() {
            if let Some(value) = payload.remove(field) {
                record.set(field, scalar(field, value)?);
            }
        }

        records.push(record.clone());
        self.storage.save(&dataset)?;

        tracing::info!(resource = schema.name, id = ?record.id(), "record created");
        Ok(record)
    }

    fn update_record(
        &self,
        schema: &ResourceSchema,
        id: &str,
        mut payload: Payload,
    ) -> CrmResult<Record> {
        let mut dataset = self.storage.load()?;
        let records = dataset.collection_mut(schema.name);
        let index = find_index_by_id(records, id).ok_or_else(CrmError::record_not_found)?;

        let record = &mut records[index];
        for field in schema.declared_fields() {
            if let Some(value) = payload.remove(field) {
                record.set(field, scalar(field, value)?);
            }
        }
        let updated = record.clone();

        self.storage.save(&dataset)?;

        tracing::info!(resource = schema.name, id, "record updated");
        Ok(updated)
    }

    fn delete_record(&self, schema: &ResourceSchema, id: &str) -> CrmResult<()> {
        let mut dataset = self.storage.load()?;
        let records = dataset.collection_mut(schema.name);
        let index = find_index_by_id(records, id).ok_or_else(CrmError::record_not_found)?;

        records.remove(index);
        self.storage.save(&dataset)?;

        tracing::info!(resource = schema.name, id, "record deleted");
        Ok(())
    }
}
