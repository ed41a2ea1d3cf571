use std::fmt::Display;

use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::EntityKind;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("User with email '{email}' already exists")]
    DuplicateEmail { email: String },

    #[error("Amenity with name '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Referenced {kind} does not exist: {id}")]
    UnknownReference { kind: EntityKind, id: Uuid },

    #[error("User {user_id} has already reviewed place {place_id}")]
    AlreadyReviewed { user_id: Uuid, place_id: Uuid },

    #[error("Owners cannot review their own place {place_id}")]
    OwnReview { place_id: Uuid },

    #[error("User {id} still owns {places} place(s) and {reviews} review(s)")]
    HasDependents { id: Uuid, places: usize, reviews: usize },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unknown_reference(kind: EntityKind, id: Uuid) -> Self {
        Self::UnknownReference { kind, id }
    }

    pub fn already_reviewed(user_id: Uuid, place_id: Uuid) -> Self {
        Self::AlreadyReviewed { user_id, place_id }
    }

    pub fn own_review(place_id: Uuid) -> Self {
        Self::OwnReview { place_id }
    }

    pub fn has_dependents(id: Uuid, places: usize, reviews: usize) -> Self {
        Self::HasDependents {
            id,
            places,
            reviews,
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn storage(err: impl Display) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }

    /// Re-qualify a not-found on a foreign id as a dangling reference.
    pub fn into_reference(self) -> Self {
        match self {
            Self::NotFound { kind, id } => Self::UnknownReference { kind, id },
            other => other,
        }
    }
}
