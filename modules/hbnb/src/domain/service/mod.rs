//! Domain services: validation and cross-entity rules layered on the
//! repository ports. Each service validates fully before touching storage.

pub mod amenities;
pub mod places;
pub mod reviews;
pub mod users;

pub use amenities::AmenityService;
pub use places::PlaceService;
pub use reviews::ReviewService;
pub use users::UserService;

use crate::domain::error::DomainError;

/// Configuration for the domain services
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub max_title_length: usize,
    pub max_review_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 50,
            max_title_length: 100,
            max_review_length: 1000,
        }
    }
}

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

// --- validation helpers shared by the services ---

/// Non-blank and at most `max` characters.
pub(crate) fn validate_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_field(field, "cannot be empty"));
    }
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::invalid_field(
            field,
            format!("too long: {} characters (max: {})", len, max),
        ));
    }
    Ok(())
}

pub(crate) fn validate_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), DomainError> {
    // NaN fails both comparisons, so check containment positively
    if !(min..=max).contains(&value) {
        return Err(DomainError::invalid_field(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub(crate) fn validate_price(price: f64) -> Result<(), DomainError> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::invalid_field("price", "must be a non-negative number"));
    }
    Ok(())
}

pub(crate) fn validate_rating(rating: i32) -> Result<(), DomainError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::invalid_field(
            "rating",
            format!("must be between {} and {}", MIN_RATING, MAX_RATING),
        ));
    }
    Ok(())
}
