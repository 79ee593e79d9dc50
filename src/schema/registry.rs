//! Static resource schema registry

use super::types::ResourceSchema;

/// Every resource served by the CRUD engine
pub const BUILTIN_RESOURCES: &[ResourceSchema] = &[
    ResourceSchema::new("users", &["name", "email", "role"], &["phone"]),
    ResourceSchema::new("company-groups", &["name"], &["description"]),
    ResourceSchema::new("contractors", &["name"], &["company_group_id", "type"]),
    ResourceSchema::new("contracts", &["title"], &["contractor_id", "value"]),
    ResourceSchema::new("deals", &["title"], &["status_id", "value"]),
    ResourceSchema::new("deal-statuses", &["name"], &["color"]),
    ResourceSchema::new("companies", &["name"], &["website", "industry", "size"]),
    ResourceSchema::new(
        "contacts",
        &["first_name", "last_name", "email"],
        &["phone", "company_id"],
    ),
];

/// Read-only mapping from resource name to schema
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry {
    schemas: &'static [ResourceSchema],
}

impl SchemaRegistry {
    /// Registry over an explicit schema table
    pub const fn new(schemas: &'static [ResourceSchema]) -> Self {
        Self { schemas }
    }

    /// Registry of the built-in CRM resources
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_RESOURCES)
    }

    /// Schema for `resource`, or `None` if the resource is unknown
    pub fn lookup(&self, resource: &str) -> Option<&'static ResourceSchema> {
        self.schemas.iter().find(|schema| schema.name == resource)
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &'static str> {
        self.schemas.iter().map(|schema| schema.name)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_resources() {
        let registry = SchemaRegistry::builtin();
        let deals = registry.lookup("deals").unwrap();
        assert_eq!(deals.required, &["title"]);
        assert_eq!(deals.optional, &["status_id", "value"]);

        let contacts = registry.lookup("contacts").unwrap();
        assert_eq!(contacts.required, &["first_name", "last_name", "email"]);
    }

    #[test]
    fn test_lookup_unknown_resource() {
        let registry = SchemaRegistry::builtin();
        assert!(registry.lookup("invoices").is_none());
        assert!(registry.lookup("Users").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_resource_names_unique() {
        let mut names: Vec<_> = SchemaRegistry::builtin().resource_names().collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
