//! `Entity` implementations and storage-level change sets.
//!
//! Change sets differ from the contract patches where the service layer
//! rewrites fields before storage: users carry a `password_hash` instead of a
//! plaintext password, places carry their back-reference lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{Amenity, AmenityPatch, Place, PlacePatch, Review, ReviewPatch, User};
use crate::domain::repo::{AttrValue, Entity};

fn later_of(at: DateTime<Utc>, created_at: DateTime<Utc>) -> DateTime<Utc> {
    at.max(created_at)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
    pub places: Option<Vec<Uuid>>,
}

impl Entity for User {
    type Changes = UserChanges;

    const ATTRIBUTES: &'static [&'static str] =
        &["id", "email", "first_name", "last_name", "is_admin"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        Some(match name {
            "id" => self.id.into(),
            "email" => self.email.clone().into(),
            "first_name" => self.first_name.clone().into(),
            "last_name" => self.last_name.clone().into(),
            "is_admin" => self.is_admin.into(),
            _ => return None,
        })
    }

    fn apply(&mut self, c: UserChanges) {
        if let Some(email) = c.email {
            self.email = email;
        }
        if let Some(first_name) = c.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = c.last_name {
            self.last_name = last_name;
        }
        if let Some(password_hash) = c.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(is_admin) = c.is_admin {
            self.is_admin = is_admin;
        }
        if let Some(places) = c.places {
            self.places = places;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = later_of(at, self.created_at);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner_id: Option<Uuid>,
    pub amenities: Option<Vec<Uuid>>,
    pub reviews: Option<Vec<Uuid>>,
}

impl From<PlacePatch> for PlaceChanges {
    fn from(p: PlacePatch) -> Self {
        Self {
            title: p.title,
            description: p.description,
            price: p.price,
            latitude: p.latitude,
            longitude: p.longitude,
            owner_id: p.owner_id,
            amenities: p.amenities,
            reviews: None,
        }
    }
}

impl Entity for Place {
    type Changes = PlaceChanges;

    const ATTRIBUTES: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "price",
        "latitude",
        "longitude",
        "owner_id",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        Some(match name {
            "id" => self.id.into(),
            "title" => self.title.clone().into(),
            "description" => self.description.clone().into(),
            "price" => self.price.into(),
            "latitude" => self.latitude.into(),
            "longitude" => self.longitude.into(),
            "owner_id" => self.owner_id.into(),
            _ => return None,
        })
    }

    fn apply(&mut self, c: PlaceChanges) {
        if let Some(title) = c.title {
            self.title = title;
        }
        if let Some(description) = c.description {
            self.description = description;
        }
        if let Some(price) = c.price {
            self.price = price;
        }
        if let Some(latitude) = c.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = c.longitude {
            self.longitude = longitude;
        }
        if let Some(owner_id) = c.owner_id {
            self.owner_id = owner_id;
        }
        if let Some(amenities) = c.amenities {
            self.amenities = amenities;
        }
        if let Some(reviews) = c.reviews {
            self.reviews = reviews;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = later_of(at, self.created_at);
    }
}

impl Entity for Review {
    type Changes = ReviewPatch;

    const ATTRIBUTES: &'static [&'static str] = &["id", "text", "rating", "place_id", "user_id"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        Some(match name {
            "id" => self.id.into(),
            "text" => self.text.clone().into(),
            "rating" => self.rating.into(),
            "place_id" => self.place_id.into(),
            "user_id" => self.user_id.into(),
            _ => return None,
        })
    }

    fn apply(&mut self, c: ReviewPatch) {
        if let Some(text) = c.text {
            self.text = text;
        }
        if let Some(rating) = c.rating {
            self.rating = rating;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = later_of(at, self.created_at);
    }
}

impl Entity for Amenity {
    type Changes = AmenityPatch;

    const ATTRIBUTES: &'static [&'static str] = &["id", "name"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.clone().into()),
            _ => None,
        }
    }

    fn apply(&mut self, c: AmenityPatch) {
        if let Some(name) = c.name {
            self.name = name;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = later_of(at, self.created_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password_hash: "hash".into(),
            is_admin: false,
            places: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn apply_only_touches_named_fields() {
        let mut user = sample_user();
        let before = user.clone();
        user.apply(UserChanges {
            first_name: Some("X".into()),
            ..Default::default()
        });
        assert_eq!(user.first_name, "X");
        assert_eq!(user.email, before.email);
        assert_eq!(user.last_name, before.last_name);
        assert_eq!(user.password_hash, before.password_hash);
        assert_eq!(user.updated_at, before.updated_at);
    }

    #[test]
    fn touch_never_goes_before_creation() {
        let mut user = sample_user();
        user.touch(user.created_at - Duration::seconds(30));
        assert_eq!(user.updated_at, user.created_at);

        let later = user.created_at + Duration::seconds(5);
        user.touch(later);
        assert_eq!(user.updated_at, later);
    }

    #[test]
    fn attributes_cover_declared_names_only() {
        let user = sample_user();
        for name in User::ATTRIBUTES {
            assert!(user.attribute(name).is_some(), "missing {name}");
        }
        assert_eq!(user.attribute("password_hash"), None);
        assert_eq!(user.attribute("places"), None);
        assert_eq!(
            user.attribute("email"),
            Some(AttrValue::Text("a@x.com".into()))
        );
    }

    #[test]
    fn place_patch_never_carries_reviews() {
        let changes = PlaceChanges::from(PlacePatch {
            price: Some(12.5),
            ..Default::default()
        });
        assert_eq!(changes.price, Some(12.5));
        assert!(changes.reviews.is_none());
    }
}
