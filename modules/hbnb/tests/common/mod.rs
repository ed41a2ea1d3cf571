#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

use hbnb::domain::ports::CredentialHasher;
use hbnb::domain::service::ServiceConfig;
use hbnb::gateways::{HbnbFacade, Repositories};
use hbnb::{HbnbApi, NewPlace, NewReview, NewUser, Place, User};

/// Deterministic stand-in for Argon2, fast enough for every test.
pub struct FakeHasher;

impl CredentialHasher for FakeHasher {
    fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
        let mut h = DefaultHasher::new();
        plaintext.hash(&mut h);
        Ok(format!("fake${:016x}", h.finish()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        self.hash(plaintext).map(|h| h == hash).unwrap_or(false)
    }
}

pub fn facade() -> HbnbFacade {
    facade_with(ServiceConfig::default())
}

pub fn facade_with(config: ServiceConfig) -> HbnbFacade {
    HbnbFacade::with_parts(Repositories::in_memory(), Arc::new(FakeHasher), config)
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        password: "s3cret".to_string(),
        is_admin: false,
    }
}

pub fn new_place(owner_id: Uuid) -> NewPlace {
    NewPlace {
        title: "Cozy loft".to_string(),
        description: "Near the river".to_string(),
        price: 100.0,
        latitude: 48.85,
        longitude: 2.35,
        owner_id,
        amenities: vec![],
    }
}

pub fn new_review(place_id: Uuid, user_id: Uuid, rating: i32) -> NewReview {
    NewReview {
        text: "Lovely stay".to_string(),
        rating,
        place_id,
        user_id,
    }
}

pub async fn user(api: &dyn HbnbApi, email: &str) -> User {
    api.create_user(new_user(email))
        .await
        .expect("Failed to create user")
}

pub async fn place(api: &dyn HbnbApi, owner_id: Uuid) -> Place {
    api.create_place(new_place(owner_id))
        .await
        .expect("Failed to create place")
}
