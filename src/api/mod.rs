//! API wire contract
//!
//! Error taxonomy and response emission shared by every route. Handlers
//! return `CrmResult<Reply>`; both arms render through `respond`/`fail`.

mod errors;
mod response;

pub use errors::{CrmError, CrmResult};
pub use response::{fail, respond, ErrorBody, Reply, StatusBody, JSON_UTF8};
