use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{Amenity, EntityKind, NewPlace, Place, PlaceFilter, PlacePatch, Review};
use crate::domain::entity::PlaceChanges;
use crate::domain::error::DomainError;
use crate::domain::repo::Repository;
use crate::domain::service::{
    validate_price, validate_range, validate_text, AmenityService, ServiceConfig, UserService,
};

/// Place rules: field ranges, owner and amenity references, and the
/// owner's `places` back-reference.
#[derive(Clone)]
pub struct PlaceService {
    places: Arc<dyn Repository<Place>>,
    reviews: Arc<dyn Repository<Review>>,
    users: Arc<UserService>,
    amenities: Arc<AmenityService>,
    config: ServiceConfig,
}

impl PlaceService {
    pub fn new(
        places: Arc<dyn Repository<Place>>,
        reviews: Arc<dyn Repository<Review>>,
        users: Arc<UserService>,
        amenities: Arc<AmenityService>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            places,
            reviews,
            users,
            amenities,
            config,
        }
    }

    #[instrument(
        name = "hbnb.places.create_place",
        skip(self, new_place),
        fields(owner_id = %new_place.owner_id)
    )]
    pub async fn create_place(&self, new_place: NewPlace) -> Result<Place, DomainError> {
        info!("Creating new place");

        validate_text("title", &new_place.title, self.config.max_title_length)?;
        validate_price(new_place.price)?;
        validate_range("latitude", new_place.latitude, -90.0, 90.0)?;
        validate_range("longitude", new_place.longitude, -180.0, 180.0)?;

        self.users
            .get_user(new_place.owner_id)
            .await
            .map_err(DomainError::into_reference)?;
        let amenities = self.resolve_amenities(new_place.amenities).await?;

        let now = Utc::now();
        let place = Place {
            id: Uuid::new_v4(),
            title: new_place.title,
            description: new_place.description,
            price: new_place.price,
            latitude: new_place.latitude,
            longitude: new_place.longitude,
            owner_id: new_place.owner_id,
            reviews: Vec::new(),
            amenities,
            created_at: now,
            updated_at: now,
        };

        let place = self.places.add(place).await.map_err(DomainError::storage)?;
        self.users.add_owned_place(place.owner_id, place.id).await?;

        info!("Successfully created place with id={}", place.id);
        Ok(place)
    }

    #[instrument(name = "hbnb.places.get_place", skip(self), fields(place_id = %id))]
    pub async fn get_place(&self, id: Uuid) -> Result<Place, DomainError> {
        debug!("Getting place by id");
        self.places
            .get(id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Place, id))
    }

    #[instrument(name = "hbnb.places.get_all_places", skip(self))]
    pub async fn get_all_places(&self) -> Result<Vec<Place>, DomainError> {
        self.places.get_all().await.map_err(DomainError::storage)
    }

    /// Same checks as creation for every field present in `patch`. A new
    /// owner must exist and must not have reviewed the place; the place
    /// moves between the owners' lists.
    #[instrument(
        name = "hbnb.places.update_place",
        skip(self, patch),
        fields(place_id = %id)
    )]
    pub async fn update_place(&self, id: Uuid, patch: PlacePatch) -> Result<Place, DomainError> {
        info!("Updating place");

        self.validate_place_patch(&patch)?;
        let current = self.get_place(id).await?;

        let new_owner = match patch.owner_id {
            Some(owner_id) if owner_id != current.owner_id => {
                self.users
                    .get_user(owner_id)
                    .await
                    .map_err(DomainError::into_reference)?;
                let reviewed = self
                    .reviews
                    .get_by_attribute("user_id", &owner_id.into())
                    .await
                    .map_err(DomainError::storage)?
                    .iter()
                    .any(|r| r.place_id == id);
                if reviewed {
                    return Err(DomainError::own_review(id));
                }
                Some(owner_id)
            }
            _ => None,
        };

        let mut changes = PlaceChanges::from(patch);
        if let Some(ids) = changes.amenities.take() {
            changes.amenities = Some(self.resolve_amenities(ids).await?);
        }

        let updated = self
            .places
            .update(id, changes)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Place, id))?;

        if let Some(owner_id) = new_owner {
            self.users.remove_owned_place(current.owner_id, id).await?;
            self.users.add_owned_place(owner_id, id).await?;
            debug!("Moved place from owner {} to {}", current.owner_id, owner_id);
        }

        info!("Successfully updated place");
        Ok(updated)
    }

    /// Deletes the place together with its reviews and unregisters it from
    /// its owner.
    #[instrument(name = "hbnb.places.delete_place", skip(self), fields(place_id = %id))]
    pub async fn delete_place(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting place");

        let place = self.get_place(id).await?;

        let reviews = self
            .reviews
            .get_by_attribute("place_id", &id.into())
            .await
            .map_err(DomainError::storage)?;
        for review in &reviews {
            self.reviews
                .delete(review.id)
                .await
                .map_err(DomainError::storage)?;
        }

        if !self.places.delete(id).await.map_err(DomainError::storage)? {
            return Err(DomainError::not_found(EntityKind::Place, id));
        }
        if !self.users.remove_owned_place(place.owner_id, id).await? {
            warn!("Owner {} did not list place {}", place.owner_id, id);
        }

        info!("Successfully deleted place and {} review(s)", reviews.len());
        Ok(())
    }

    /// Linear scan; all criteria must hold.
    #[instrument(name = "hbnb.places.search_places", skip(self))]
    pub async fn search_places(&self, filter: &PlaceFilter) -> Result<Vec<Place>, DomainError> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(DomainError::invalid_field(
                    "min_price",
                    format!("{} is greater than max_price {}", min, max),
                ));
            }
        }

        let places = self.places.get_all().await.map_err(DomainError::storage)?;
        let matches: Vec<Place> = places
            .into_iter()
            .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
            .filter(|p| filter.owner_id.map_or(true, |owner| p.owner_id == owner))
            .filter(|p| filter.amenity_id.map_or(true, |a| p.amenities.contains(&a)))
            .collect();

        debug!("Search matched {} place(s)", matches.len());
        Ok(matches)
    }

    /// False when the place already lists the amenity.
    #[instrument(name = "hbnb.places.add_amenity", skip(self))]
    pub async fn add_amenity(&self, place_id: Uuid, amenity_id: Uuid) -> Result<bool, DomainError> {
        let place = self.get_place(place_id).await?;
        self.amenities
            .get_amenity(amenity_id)
            .await
            .map_err(DomainError::into_reference)?;
        if place.amenities.contains(&amenity_id) {
            return Ok(false);
        }

        let mut amenities = place.amenities;
        amenities.push(amenity_id);
        self.set_amenities(place_id, amenities).await
    }

    /// False when the place did not list the amenity.
    #[instrument(name = "hbnb.places.remove_amenity", skip(self))]
    pub async fn remove_amenity(
        &self,
        place_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<bool, DomainError> {
        let place = self.get_place(place_id).await?;
        if !place.amenities.contains(&amenity_id) {
            return Ok(false);
        }

        let amenities = place
            .amenities
            .into_iter()
            .filter(|a| *a != amenity_id)
            .collect();
        self.set_amenities(place_id, amenities).await
    }

    #[instrument(name = "hbnb.places.get_place_amenities", skip(self), fields(place_id = %place_id))]
    pub async fn get_place_amenities(&self, place_id: Uuid) -> Result<Vec<Amenity>, DomainError> {
        let place = self.get_place(place_id).await?;
        let mut out = Vec::with_capacity(place.amenities.len());
        for amenity_id in place.amenities {
            match self.amenities.get_amenity(amenity_id).await {
                Ok(amenity) => out.push(amenity),
                Err(DomainError::NotFound { .. }) => {
                    warn!("Place lists missing amenity {}", amenity_id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    #[instrument(name = "hbnb.places.get_place_reviews", skip(self), fields(place_id = %place_id))]
    pub async fn get_place_reviews(&self, place_id: Uuid) -> Result<Vec<Review>, DomainError> {
        self.get_place(place_id).await?;
        self.reviews
            .get_by_attribute("place_id", &place_id.into())
            .await
            .map_err(DomainError::storage)
    }

    /// Register an existing place in its owner's `places`. The place must
    /// exist and be owned by `user_id`; false when it is already listed.
    #[instrument(name = "hbnb.places.register_with_owner", skip(self))]
    pub async fn register_with_owner(
        &self,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<bool, DomainError> {
        let place = self
            .get_place(place_id)
            .await
            .map_err(DomainError::into_reference)?;
        if place.owner_id != user_id {
            return Err(DomainError::invalid_field(
                "place_id",
                format!("place {} is not owned by user {}", place_id, user_id),
            ));
        }
        self.users.add_owned_place(user_id, place_id).await
    }

    /// Append a review id to the place's list. False if the place is missing
    /// or already lists it.
    pub async fn attach_review(&self, place_id: Uuid, review_id: Uuid) -> Result<bool, DomainError> {
        let Some(place) = self.places.get(place_id).await.map_err(DomainError::storage)? else {
            return Ok(false);
        };
        if place.reviews.contains(&review_id) {
            return Ok(false);
        }
        let mut reviews = place.reviews;
        reviews.push(review_id);
        self.set_reviews(place_id, reviews).await
    }

    pub async fn detach_review(&self, place_id: Uuid, review_id: Uuid) -> Result<bool, DomainError> {
        let Some(place) = self.places.get(place_id).await.map_err(DomainError::storage)? else {
            return Ok(false);
        };
        if !place.reviews.contains(&review_id) {
            return Ok(false);
        }
        let reviews = place.reviews.into_iter().filter(|r| *r != review_id).collect();
        self.set_reviews(place_id, reviews).await
    }

    // --- helpers ---

    /// Every id must resolve; duplicates collapse, first occurrence wins.
    async fn resolve_amenities(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>, DomainError> {
        let mut out: Vec<Uuid> = Vec::with_capacity(ids.len());
        for id in ids {
            if out.contains(&id) {
                continue;
            }
            self.amenities
                .get_amenity(id)
                .await
                .map_err(DomainError::into_reference)?;
            out.push(id);
        }
        Ok(out)
    }

    async fn set_amenities(&self, place_id: Uuid, amenities: Vec<Uuid>) -> Result<bool, DomainError> {
        let changes = PlaceChanges {
            amenities: Some(amenities),
            ..Default::default()
        };
        let updated = self
            .places
            .update(place_id, changes)
            .await
            .map_err(DomainError::storage)?;
        Ok(updated.is_some())
    }

    async fn set_reviews(&self, place_id: Uuid, reviews: Vec<Uuid>) -> Result<bool, DomainError> {
        let changes = PlaceChanges {
            reviews: Some(reviews),
            ..Default::default()
        };
        let updated = self
            .places
            .update(place_id, changes)
            .await
            .map_err(DomainError::storage)?;
        Ok(updated.is_some())
    }

    fn validate_place_patch(&self, patch: &PlacePatch) -> Result<(), DomainError> {
        if let Some(ref title) = patch.title {
            validate_text("title", title, self.config.max_title_length)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        if let Some(latitude) = patch.latitude {
            validate_range("latitude", latitude, -90.0, 90.0)?;
        }
        if let Some(longitude) = patch.longitude {
            validate_range("longitude", longitude, -180.0, 180.0)?;
        }
        Ok(())
    }
}
