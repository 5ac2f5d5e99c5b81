use thiserror::Error;

use crate::domain::category::CategoryId;
use crate::domain::product::ProductId;
use crate::store::StoreError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("category `{category_id}` does not exist")]
    CategoryNotExists { category_id: CategoryId },
    #[error("product `{product_id}` not found")]
    ProductNotFound { product_id: ProductId },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("unprocessable entity: {message}")]
    UnprocessableEntity { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("deadline exceeded: {message}")]
    Timeout { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl From<StoreError> for ApplicationError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => {
                Self::Domain(DomainError::ProductNotFound { product_id: ProductId(id) })
            }
            StoreError::Database(message) | StoreError::Decode(message) => {
                Self::Persistence(message)
            }
        }
    }
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::UnprocessableEntity { .. } => "The referenced category does not exist.",
            Self::NotFound { .. } => "The requested product was not found.",
            Self::ServiceUnavailable { .. } => {
                "The service is temporarily unavailable. Please retry shortly."
            }
            Self::Timeout { .. } => "The request did not complete in time. Please retry.",
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "REQUEST-400",
            Self::UnprocessableEntity { .. } => "PRODUCT-001",
            Self::NotFound { .. } => "PRODUCT-002",
            Self::ServiceUnavailable { .. } => "STORE-503",
            Self::Timeout { .. } => "TIMEOUT-504",
            Self::Internal { .. } => "INTERNAL-500",
        }
    }

    /// Client-correctable errors expose their message; server-side faults
    /// keep it in the logs only.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::BadRequest { message, .. }
            | Self::UnprocessableEntity { message, .. }
            | Self::NotFound { message, .. } => Some(message),
            Self::ServiceUnavailable { .. } | Self::Timeout { .. } | Self::Internal { .. } => None,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::UnprocessableEntity { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Timeout { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest { .. } | Self::UnprocessableEntity { .. } | Self::NotFound { .. }
        )
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::UnprocessableEntity { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Timeout { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let correlation_id = "unassigned".to_owned();
        match value {
            ApplicationError::Domain(error @ DomainError::CategoryNotExists { .. }) => {
                Self::UnprocessableEntity { message: error.to_string(), correlation_id }
            }
            ApplicationError::Domain(error @ DomainError::ProductNotFound { .. }) => {
                Self::NotFound { message: error.to_string(), correlation_id }
            }
            ApplicationError::Domain(DomainError::InvariantViolation(message)) => {
                Self::BadRequest { message, correlation_id }
            }
            ApplicationError::Persistence(message) => {
                Self::ServiceUnavailable { message, correlation_id }
            }
            ApplicationError::Configuration(message) => Self::Internal { message, correlation_id },
        }
    }
}
