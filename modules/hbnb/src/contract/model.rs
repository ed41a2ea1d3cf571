use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of stored record, used to qualify not-found and reference errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Place,
    Review,
    Amenity,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Place => "place",
            Self::Review => "review",
            Self::Amenity => "amenity",
        })
    }
}

/// Already-authenticated caller identity, as decoded by the token layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Actor {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }
}

// ---------------------------------------------------------------- users

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// PHC string produced by the credential hasher. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    /// Owned places, in registration order.
    pub places: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new user
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// Partial update data for a user
#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

// ---------------------------------------------------------------- places

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    pub reviews: Vec<Uuid>,
    pub amenities: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new place
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPlace {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    /// Amenity ids to attach on creation.
    #[serde(default)]
    pub amenities: Vec<Uuid>,
}

/// Partial update data for a place
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner_id: Option<Uuid>,
    /// Replaces the whole amenity list.
    pub amenities: Option<Vec<Uuid>>,
}

/// Search criteria, combined with AND.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub owner_id: Option<Uuid>,
    pub amenity_id: Option<Uuid>,
}

// ---------------------------------------------------------------- reviews

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub place_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new review
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewReview {
    pub text: String,
    pub rating: i32,
    pub place_id: Uuid,
    pub user_id: Uuid,
}

/// Partial update data for a review. A review never moves to another place
/// or author.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub rating: Option<i32>,
}

// ---------------------------------------------------------------- amenities

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update data for an amenity
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmenityPatch {
    pub name: Option<String>,
}
