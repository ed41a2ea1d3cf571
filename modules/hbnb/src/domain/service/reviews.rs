use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{Actor, EntityKind, NewReview, Review, ReviewPatch};
use crate::domain::access::AccessPolicy;
use crate::domain::error::DomainError;
use crate::domain::repo::Repository;
use crate::domain::service::{validate_rating, validate_text, PlaceService, ServiceConfig, UserService};

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn Repository<Review>>,
    users: Arc<UserService>,
    places: Arc<PlaceService>,
    config: ServiceConfig,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn Repository<Review>>,
        users: Arc<UserService>,
        places: Arc<PlaceService>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            reviews,
            users,
            places,
            config,
        }
    }

    /// One review per user and place; owners cannot review their own place.
    #[instrument(
        name = "hbnb.reviews.create_review",
        skip(self, new_review),
        fields(place_id = %new_review.place_id, user_id = %new_review.user_id)
    )]
    pub async fn create_review(&self, new_review: NewReview) -> Result<Review, DomainError> {
        info!("Creating new review");

        validate_text("text", &new_review.text, self.config.max_review_length)?;
        validate_rating(new_review.rating)?;

        self.users
            .get_user(new_review.user_id)
            .await
            .map_err(DomainError::into_reference)?;
        let place = self
            .places
            .get_place(new_review.place_id)
            .await
            .map_err(DomainError::into_reference)?;

        AccessPolicy::can_review(&Actor::user(new_review.user_id), &place)?;
        let already = self
            .get_reviews_by_user(new_review.user_id)
            .await?
            .iter()
            .any(|r| r.place_id == place.id);
        if already {
            return Err(DomainError::already_reviewed(new_review.user_id, place.id));
        }

        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4(),
            text: new_review.text,
            rating: new_review.rating,
            place_id: new_review.place_id,
            user_id: new_review.user_id,
            created_at: now,
            updated_at: now,
        };
        let review = self.reviews.add(review).await.map_err(DomainError::storage)?;
        self.places.attach_review(review.place_id, review.id).await?;

        info!("Successfully created review with id={}", review.id);
        Ok(review)
    }

    #[instrument(name = "hbnb.reviews.get_review", skip(self), fields(review_id = %id))]
    pub async fn get_review(&self, id: Uuid) -> Result<Review, DomainError> {
        self.reviews
            .get(id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Review, id))
    }

    #[instrument(name = "hbnb.reviews.get_all_reviews", skip(self))]
    pub async fn get_all_reviews(&self) -> Result<Vec<Review>, DomainError> {
        self.reviews.get_all().await.map_err(DomainError::storage)
    }

    #[instrument(name = "hbnb.reviews.get_reviews_by_place", skip(self))]
    pub async fn get_reviews_by_place(&self, place_id: Uuid) -> Result<Vec<Review>, DomainError> {
        let reviews = self
            .reviews
            .get_by_attribute("place_id", &place_id.into())
            .await
            .map_err(DomainError::storage)?;
        debug!("Found {} review(s)", reviews.len());
        Ok(reviews)
    }

    #[instrument(name = "hbnb.reviews.get_reviews_by_user", skip(self))]
    pub async fn get_reviews_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, DomainError> {
        self.reviews
            .get_by_attribute("user_id", &user_id.into())
            .await
            .map_err(DomainError::storage)
    }

    #[instrument(
        name = "hbnb.reviews.update_review",
        skip(self, patch),
        fields(review_id = %id)
    )]
    pub async fn update_review(&self, id: Uuid, patch: ReviewPatch) -> Result<Review, DomainError> {
        if let Some(ref text) = patch.text {
            validate_text("text", text, self.config.max_review_length)?;
        }
        if let Some(rating) = patch.rating {
            validate_rating(rating)?;
        }

        let updated = self
            .reviews
            .update(id, patch)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Review, id))?;
        info!("Updated review");
        Ok(updated)
    }

    #[instrument(name = "hbnb.reviews.delete_review", skip(self), fields(review_id = %id))]
    pub async fn delete_review(&self, id: Uuid) -> Result<(), DomainError> {
        let review = self.get_review(id).await?;
        if !self.reviews.delete(id).await.map_err(DomainError::storage)? {
            return Err(DomainError::not_found(EntityKind::Review, id));
        }
        if !self.places.detach_review(review.place_id, id).await? {
            warn!("Place {} did not list review {}", review.place_id, id);
        }
        info!("Deleted review");
        Ok(())
    }
}
