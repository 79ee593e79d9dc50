//! Resource schema definition
//!
//! A schema only declares field names. `required` fields must be present in a
//! create payload; `optional` fields are copied when present. Values are
//! never type checked.

use serde_json::{Map, Value};

/// Field declaration for one resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Resource name as it appears in the URL path
    pub name: &'static str,
    /// Fields that must be present on create
    pub required: &'static [&'static str],
    /// Fields copied only when present
    pub optional: &'static [&'static str],
}

impl ResourceSchema {
    pub const fn new(
        name: &'static str,
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            required,
            optional,
        }
    }

    /// Required fields followed by optional fields, in declaration order
    pub fn declared_fields(&self) -> impl Iterator<Item = &'static str> {
        self.required.iter().chain(self.optional.iter()).copied()
    }

    /// Whether `field` is declared by this schema
    pub fn declares(&self, field: &str) -> bool {
        self.declared_fields().any(|f| f == field)
    }

    /// Required fields absent from `payload`, in declaration order.
    ///
    /// Presence is key presence: a field sent as `null` counts as present.
    pub fn missing_required(&self, payload: &Map<String, Value>) -> Vec<&'static str> {
        self.required
            .iter()
            .copied()
            .filter(|field| !payload.contains_key(*field))
            .collect()
    }
}
