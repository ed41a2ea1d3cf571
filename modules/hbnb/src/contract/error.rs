use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::EntityKind;

/// Errors that are safe to expose to callers of the facade
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HbnbError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The entity is still referenced and cannot be removed yet.
    #[error("In use: {message}")]
    InUse { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Internal error")]
    Internal,
}

impl HbnbError {
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn in_use(message: impl Into<String>) -> Self {
        Self::InUse {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }

    /// HTTP status class an outer transport should answer with.
    pub fn status_class(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } | Self::Validation { .. } => 400,
            Self::Forbidden { .. } => 403,
            Self::InUse { .. } => 409,
            Self::Internal => 500,
        }
    }
}

impl From<crate::domain::error::DomainError> for HbnbError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            NotFound { kind, id } | UnknownReference { kind, id } => Self::not_found(kind, id),
            e @ (DuplicateEmail { .. } | DuplicateName { .. }) => Self::conflict(e.to_string()),
            e @ HasDependents { .. } => Self::in_use(e.to_string()),
            e @ (InvalidField { .. } | AlreadyReviewed { .. }) => Self::validation(e.to_string()),
            e @ (OwnReview { .. } | Forbidden { .. }) => Self::forbidden(e.to_string()),
            // storage details stay in the logs
            Storage { .. } => Self::internal(),
        }
    }
}
