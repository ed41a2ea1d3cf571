use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::error::HbnbError;
use crate::contract::model::{
    Actor, Amenity, AmenityPatch, NewPlace, NewReview, NewUser, Place, PlaceFilter, PlacePatch,
    Review, ReviewPatch, User, UserPatch,
};

/// Public API of the HBnB core. Transports and tools depend on this trait,
/// never on the services directly.
///
/// The `*_as` operations check the access policy for `actor` before
/// delegating to their unchecked counterpart.
#[async_trait]
pub trait HbnbApi: Send + Sync {
    // --- users ---

    async fn create_user(&self, new_user: NewUser) -> Result<User, HbnbError>;

    async fn get_user(&self, id: Uuid) -> Result<User, HbnbError>;

    async fn get_all_users(&self) -> Result<Vec<User>, HbnbError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, HbnbError>;

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, HbnbError>;

    async fn delete_user(&self, id: Uuid) -> Result<(), HbnbError>;

    /// `None` for an unknown email and a wrong password alike.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, HbnbError>;

    async fn add_owned_place(&self, user_id: Uuid, place_id: Uuid) -> Result<bool, HbnbError>;

    async fn remove_owned_place(&self, user_id: Uuid, place_id: Uuid) -> Result<bool, HbnbError>;

    async fn get_user_places(&self, user_id: Uuid) -> Result<Vec<Uuid>, HbnbError>;

    // --- places ---

    async fn create_place(&self, new_place: NewPlace) -> Result<Place, HbnbError>;

    async fn get_place(&self, id: Uuid) -> Result<Place, HbnbError>;

    async fn get_all_places(&self) -> Result<Vec<Place>, HbnbError>;

    async fn update_place(&self, id: Uuid, patch: PlacePatch) -> Result<Place, HbnbError>;

    async fn delete_place(&self, id: Uuid) -> Result<(), HbnbError>;

    async fn search_places(&self, filter: PlaceFilter) -> Result<Vec<Place>, HbnbError>;

    async fn add_place_amenity(&self, place_id: Uuid, amenity_id: Uuid) -> Result<bool, HbnbError>;

    async fn remove_place_amenity(
        &self,
        place_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<bool, HbnbError>;

    async fn get_place_amenities(&self, place_id: Uuid) -> Result<Vec<Amenity>, HbnbError>;

    async fn get_place_reviews(&self, place_id: Uuid) -> Result<Vec<Review>, HbnbError>;

    // --- reviews ---

    async fn create_review(&self, new_review: NewReview) -> Result<Review, HbnbError>;

    async fn get_review(&self, id: Uuid) -> Result<Review, HbnbError>;

    async fn get_all_reviews(&self) -> Result<Vec<Review>, HbnbError>;

    async fn get_reviews_by_place(&self, place_id: Uuid) -> Result<Vec<Review>, HbnbError>;

    async fn get_reviews_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, HbnbError>;

    async fn update_review(&self, id: Uuid, patch: ReviewPatch) -> Result<Review, HbnbError>;

    async fn delete_review(&self, id: Uuid) -> Result<(), HbnbError>;

    // --- amenities ---

    /// Returns the existing amenity when the name is already taken.
    async fn create_amenity(&self, name: &str) -> Result<Amenity, HbnbError>;

    async fn get_amenity(&self, id: Uuid) -> Result<Amenity, HbnbError>;

    async fn get_amenity_by_name(&self, name: &str) -> Result<Option<Amenity>, HbnbError>;

    async fn get_all_amenities(&self) -> Result<Vec<Amenity>, HbnbError>;

    async fn update_amenity(&self, id: Uuid, patch: AmenityPatch) -> Result<Amenity, HbnbError>;

    async fn delete_amenity(&self, id: Uuid) -> Result<(), HbnbError>;

    // --- policy-checked operations ---

    async fn create_user_as(&self, actor: &Actor, new_user: NewUser) -> Result<User, HbnbError>;

    async fn update_user_as(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: UserPatch,
    ) -> Result<User, HbnbError>;

    async fn delete_user_as(&self, actor: &Actor, id: Uuid) -> Result<(), HbnbError>;

    async fn create_place_as(&self, actor: &Actor, new_place: NewPlace)
        -> Result<Place, HbnbError>;

    async fn update_place_as(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: PlacePatch,
    ) -> Result<Place, HbnbError>;

    async fn delete_place_as(&self, actor: &Actor, id: Uuid) -> Result<(), HbnbError>;

    async fn create_review_as(
        &self,
        actor: &Actor,
        new_review: NewReview,
    ) -> Result<Review, HbnbError>;

    async fn update_review_as(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: ReviewPatch,
    ) -> Result<Review, HbnbError>;

    async fn delete_review_as(&self, actor: &Actor, id: Uuid) -> Result<(), HbnbError>;

    async fn create_amenity_as(&self, actor: &Actor, name: &str) -> Result<Amenity, HbnbError>;

    async fn update_amenity_as(
        &self,
        actor: &Actor,
        id: Uuid,
        patch: AmenityPatch,
    ) -> Result<Amenity, HbnbError>;

    async fn delete_amenity_as(&self, actor: &Actor, id: Uuid) -> Result<(), HbnbError>;
}
