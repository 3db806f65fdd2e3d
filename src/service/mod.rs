//! Record service: create/read/update/delete/sort orchestration over the
//! store, validated by the schema.

mod errors;
mod students;

pub use errors::{ServiceError, ServiceResult};
pub use students::StudentService;
