//! Generic resource CRUD engine
//!
//! One engine serves every resource in the schema registry. Control flow
//! per request:
//!
//! 1. Resolve the resource schema (unknown → 404)
//! 2. Load the full dataset through the storage accessor
//! 3. Allocate an id (create) or locate the record (read/update/delete)
//! 4. Mutate in memory, then save the full dataset
//! 5. Hand the result to the response emitter

mod allocator;
mod dispatcher;
mod locator;

pub use allocator::next_id;
pub use dispatcher::{parse_payload, CrudDispatcher, Payload};
pub use locator::{find_by_id, find_index_by_id};
