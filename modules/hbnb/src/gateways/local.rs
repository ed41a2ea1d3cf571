use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::HbnbConfig;
use crate::contract::{
    client::HbnbApi,
    error::HbnbError,
    model::{
        Actor, Amenity, AmenityPatch, NewPlace, NewReview, NewUser, Place, PlaceFilter, PlacePatch,
        Review, ReviewPatch, User, UserPatch,
    },
};
use crate::domain::access::AccessPolicy;
use crate::domain::error::DomainError;
use crate::domain::ports::CredentialHasher;
use crate::domain::repo::Repository;
use crate::domain::service::{
    AmenityService, PlaceService, ReviewService, ServiceConfig, UserService,
};
use crate::infra::security::Argon2Hasher;
use crate::infra::storage::InMemoryRepository;

/// One repository per entity kind.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn Repository<User>>,
    pub places: Arc<dyn Repository<Place>>,
    pub reviews: Arc<dyn Repository<Review>>,
    pub amenities: Arc<dyn Repository<Amenity>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::<User>::new()),
            places: Arc::new(InMemoryRepository::<Place>::new()),
            reviews: Arc::new(InMemoryRepository::<Review>::new()),
            amenities: Arc::new(InMemoryRepository::<Amenity>::new()),
        }
    }
}

/// Composition root of the core: wires repositories into services once and
/// implements `HbnbApi` by delegation.
pub struct HbnbFacade {
    users: Arc<UserService>,
    places: Arc<PlaceService>,
    reviews: Arc<ReviewService>,
    amenities: Arc<AmenityService>,
}

impl HbnbFacade {
    /// In-memory storage and Argon2id hashing.
    pub fn new(config: &HbnbConfig) -> Self {
        Self::with_parts(
            Repositories::in_memory(),
            Arc::new(Argon2Hasher::new()),
            ServiceConfig::from(config),
        )
    }

    pub fn with_parts(
        repos: Repositories,
        hasher: Arc<dyn CredentialHasher>,
        config: ServiceConfig,
    ) -> Self {
        let users = Arc::new(UserService::new(
            repos.users.clone(),
            repos.reviews.clone(),
            hasher,
            config.clone(),
        ));
        let amenities = Arc::new(AmenityService::new(
            repos.amenities.clone(),
            repos.places.clone(),
            config.clone(),
        ));
        let places = Arc::new(PlaceService::new(
            repos.places.clone(),
            repos.reviews.clone(),
            users.clone(),
            amenities.clone(),
            config.clone(),
        ));
        let reviews = Arc::new(ReviewService::new(
            repos.reviews,
            users.clone(),
            places.clone(),
            config,
        ));

        Self {
            users,
            places,
            reviews,
            amenities,
        }
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn places(&self) -> &PlaceService {
        &self.places
    }

    pub fn reviews(&self) -> &ReviewService {
        &self.reviews
    }

    pub fn amenities(&self) -> &AmenityService {
        &self.amenities
    }
}

fn allowed(check: Result<(), DomainError>) -> Result<(), HbnbError> {
    check.map_err(HbnbError::from)
}

#[async_trait]
impl HbnbApi for HbnbFacade {
    // --- users ---

    async fn create_user(&self, new_user: NewUser) -> Result<User, HbnbError> {
        self.users
            .create_user(new_user)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, HbnbError> {
        self.users.get_user(id).await.map_err(HbnbError::from)
    }

    async fn get_all_users(&self) -> Result<Vec<User>, HbnbError> {
        self.users.get_all_users().await.map_err(HbnbError::from)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, HbnbError> {
        self.users
            .get_user_by_email(email)
            .await
            .map_err(HbnbError::from)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, HbnbError> {
        self.users
            .update_user(id, patch)
            .await
            .map_err(HbnbError::from)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), HbnbError> {
        self.users.delete_user(id).await.map_err(HbnbError::from)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, HbnbError> {
        self.users
            .authenticate(email, password)
            .await
            .map_err(HbnbError::from)
    }

    async fn add_owned_place(&self, user_id: Uuid, place_id: Uuid) -> Result<bool, HbnbError> {
        self.places
            .register_with_owner(user_id, place_id)
            .await
            .map_err(HbnbError::from)
    }

    async fn remove_owned_place(&self, user_id: Uuid, place_id: Uuid) -> Result<bool, HbnbError> {
        self.users
            .remove_owned_place(user_id, place_id)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_user_places(&self, user_id: Uuid) -> Result<Vec<Uuid>, HbnbError> {
        self.users
            .get_user_places(user_id)
            .await
            .map_err(HbnbError::from)
    }

    // --- places ---

    async fn create_place(&self, new_place: NewPlace) -> Result<Place, HbnbError> {
        self.places
            .create_place(new_place)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_place(&self, id: Uuid) -> Result<Place, HbnbError> {
        self.places.get_place(id).await.map_err(HbnbError::from)
    }

    async fn get_all_places(&self) -> Result<Vec<Place>, HbnbError> {
        self.places.get_all_places().await.map_err(HbnbError::from)
    }

    async fn update_place(&self, id: Uuid, patch: PlacePatch) -> Result<Place, HbnbError> {
        self.places
            .update_place(id, patch)
            .await
            .map_err(HbnbError::from)
    }

    async fn delete_place(&self, id: Uuid) -> Result<(), HbnbError> {
        self.places.delete_place(id).await.map_err(HbnbError::from)
    }

    async fn search_places(&self, filter: PlaceFilter) -> Result<Vec<Place>, HbnbError> {
        self.places
            .search_places(&filter)
            .await
            .map_err(HbnbError::from)
    }

    async fn add_place_amenity(&self, place_id: Uuid, amenity_id: Uuid) -> Result<bool, HbnbError> {
        self.places
            .add_amenity(place_id, amenity_id)
            .await
            .map_err(HbnbError::from)
    }

    async fn remove_place_amenity(
        &self,
        place_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<bool, HbnbError> {
        self.places
            .remove_amenity(place_id, amenity_id)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_place_amenities(&self, place_id: Uuid) -> Result<Vec<Amenity>, HbnbError> {
        self.places
            .get_place_amenities(place_id)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_place_reviews(&self, place_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        self.places
            .get_place_reviews(place_id)
            .await
            .map_err(HbnbError::from)
    }

    // --- reviews ---

    async fn create_review(&self, new_review: NewReview) -> Result<Review, HbnbError> {
        self.reviews
            .create_review(new_review)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_review(&self, id: Uuid) -> Result<Review, HbnbError> {
        self.reviews.get_review(id).await.map_err(HbnbError::from)
    }

    async fn get_all_reviews(&self) -> Result<Vec<Review>, HbnbError> {
        self.reviews.get_all_reviews().await.map_err(HbnbError::from)
    }

    async fn get_reviews_by_place(&self, place_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        self.reviews
            .get_reviews_by_place(place_id)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_reviews_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, HbnbError> {
        self.reviews
            .get_reviews_by_user(user_id)
            .await
            .map_err(HbnbError::from)
    }

    async fn update_review(&self, id: Uuid, patch: ReviewPatch) -> Result<Review, HbnbError> {
        self.reviews
            .update_review(id, patch)
            .await
            .map_err(HbnbError::from)
    }

    async fn delete_review(&self, id: Uuid) -> Result<(), HbnbError> {
        self.reviews.delete_review(id).await.map_err(HbnbError::from)
    }

    // --- amenities ---

    async fn create_amenity(&self, name: &str) -> Result<Amenity, HbnbError> {
        self.amenities
            .create_amenity(name)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_amenity(&self, id: Uuid) -> Result<Amenity, HbnbError> {
        self.amenities.get_amenity(id).await.map_err(HbnbError::from)
    }

    async fn get_amenity_by_name(&self, name: &str) -> Result<Option<Amenity>, HbnbError> {
        self.amenities
            .get_amenity_by_name(name)
            .await
            .map_err(HbnbError::from)
    }

    async fn get_all_amenities(&self) -> Result<Vec<Amenity>, HbnbError> {
        self.amenities
            .get_all_amenities()
            .await
            .map_err(HbnbError::from)
    }

    async fn update_amenity(&self, id: Uuid, patch: AmenityPatch) -> Result<Amenity, HbnbError> {
        self.amenities
            .update_amenity(id, patch)
            .await
            .map_err(HbnbError::from)
    }

    async fn delete_amenity(&self, id: Uuid) -> Result<(), HbnbError> {
        self.amenities
            .delete_amenity(id)
            .await
            .map_err(HbnbError::from)
    }

    // --- policy-checked operations ---

    async fn create_user_as(&self, actor: &Actor, new_user: NewUser) -> Result<User, HbnbError> {
        allowed(AccessPolicy::can_create_user(actor))?;
        self.create_user(new_user).await
    }

    async fn update_user_as(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: UserPatch,
    ) -> Result<User, HbnbError> {
        allowed(AccessPolicy::can_modify_user(actor, id, &patch))?;
        self.update_user(id, patch).await
    }

    async fn delete_user_as(&self, actor: &Actor, id: Uuid) -> Result<(), HbnbError> {
        allowed(AccessPolicy::can_delete_user(actor, id))?;
        self.delete_user(id).await
    }

    async fn create_place_as(
        &self,
        actor: &Actor,
        new_place: NewPlace,
    ) -> Result<Place, HbnbError> {
        allowed(AccessPolicy::can_act_for(actor, new_place.owner_id))?;
        self.create_place(new_place).await
    }

    async fn update_place_as(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: PlacePatch,
    ) -> Result<Place, HbnbError> {
        let place = self.get_place(id).await?;
        allowed(AccessPolicy::can_modify_place(actor, &place))?;
        if let Some(owner_id) = patch.owner_id {
            // handing a place to someone else is an admin operation
            if owner_id != place.owner_id {
                allowed(AccessPolicy::can_act_for(actor, owner_id))?;
            }
        }
        self.update_place(id, patch).await
    }

    async fn delete_place_as(&self, actor: &Actor, id: Uuid) -> Result<(), HbnbError> {
        let place = self.get_place(id).await?;
        allowed(AccessPolicy::can_modify_place(actor, &place))?;
        self.delete_place(id).await
    }

    async fn create_review_as(
        &self,
        actor: &Actor,
        new_review: NewReview,
    ) -> Result<Review, HbnbError> {
        // the own-place rule is enforced by the review service for every caller
        allowed(AccessPolicy::can_act_for(actor, new_review.user_id))?;
        self.create_review(new_review).await
    }

    async fn update_review_as(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: ReviewPatch,
    ) -> Result<Review, HbnbError> {
        let review = self.get_review(id).await?;
        allowed(AccessPolicy::can_modify_review(actor, &review))?;
        self.update_review(id, patch).await
    }

    async fn delete_review_as(&self, actor: &Actor, id: Uuid) -> Result<(), HbnbError> {
        let review = self.get_review(id).await?;
        allowed(AccessPolicy::can_modify_review(actor, &review))?;
        self.delete_review(id).await
    }

    async fn create_amenity_as(&self, actor: &Actor, name: &str) -> Result<Amenity, HbnbError> {
        allowed(AccessPolicy::can_manage_amenities(actor))?;
        self.create_amenity(name).await
    }

    async fn update_amenity_as(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: AmenityPatch,
    ) -> Result<Amenity, HbnbError> {
        allowed(AccessPolicy::can_manage_amenities(actor))?;
        self.update_amenity(id, patch).await
    }

    async fn delete_amenity_as(&self, actor: &Actor, id: Uuid) -> Result<(), HbnbError> {
        allowed(AccessPolicy::can_manage_amenities(actor))?;
        self.delete_amenity(id).await
    }
}
