//! Resource schema registry
//!
//! Maps each resource name to the fields a record of that resource may
//! carry. The table is compiled in and never changes at runtime.
//!
//! # Rules
//!
//! - Required fields must be present on create
//! - Optional fields are copied only when present
//! - Undeclared fields are dropped on create and ignored on update
//! - `id` is never declared, so clients cannot set or change it

mod registry;
mod types;

pub use registry::{SchemaRegistry, BUILTIN_RESOURCES};
pub use types::ResourceSchema;
