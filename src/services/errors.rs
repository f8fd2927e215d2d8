use thiserror::Error;

/// Methods the inventory gateway answers to, in `Allow` header order.
pub const ALLOWED_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// A required request parameter is missing or unusable.
    #[error("{0}")]
    Validation(String),
    /// Storage failed, the body could not be stored or the addressed record
    /// does not exist.
    #[error("{0}")]
    Persistence(String),
    /// The HTTP method has no matching operation.
    #[error("Method {0} Not Allowed")]
    UnsupportedMethod(String),
}

impl ServiceError {
    /// HTTP status code that represents this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Persistence(_) => 500,
            Self::UnsupportedMethod(_) => 405,
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
