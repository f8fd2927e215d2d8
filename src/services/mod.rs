pub mod errors;
pub mod inventory;

pub use errors::{ServiceError, ServiceResult};
