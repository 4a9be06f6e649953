use tracker_query::InvalidFilterError;
use tracker_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("corrupt entity: {0}")]
    Corrupt(String),
}

impl RunError {
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            RunError::InvalidFilter(_) | RunError::BadRequest(_) => http::StatusCode::BAD_REQUEST,
            RunError::Store(_) => http::StatusCode::SERVICE_UNAVAILABLE,
            RunError::Corrupt(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
