use rst_common::with_errors::thiserror::{self, Error};

use prople_orgagent_core::trust::presentation::PresentationError;

#[derive(Debug, PartialEq, Error)]
pub enum CommonError {
    #[error("valdation error: {0}")]
    ValidationError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("store error: {0}")]
    StoreError(String),

    #[error("domain error: {0}")]
    DomainError(String),
}

impl From<PresentationError> for CommonError {
    fn from(err: PresentationError) -> Self {
        CommonError::DomainError(err.to_string())
    }
}

pub trait ToValidate {
    fn validate(&self) -> Result<(), CommonError>;
}
