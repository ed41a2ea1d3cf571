use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{Amenity, AmenityPatch, EntityKind, Place};
use crate::domain::entity::PlaceChanges;
use crate::domain::error::DomainError;
use crate::domain::repo::Repository;
use crate::domain::service::{validate_text, ServiceConfig};

#[derive(Clone)]
pub struct AmenityService {
    amenities: Arc<dyn Repository<Amenity>>,
    places: Arc<dyn Repository<Place>>,
    config: ServiceConfig,
}

impl AmenityService {
    pub fn new(
        amenities: Arc<dyn Repository<Amenity>>,
        places: Arc<dyn Repository<Place>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            amenities,
            places,
            config,
        }
    }

    /// Idempotent by name: an existing amenity with the same name is
    /// returned as-is.
    #[instrument(name = "hbnb.amenities.create_amenity", skip(self))]
    pub async fn create_amenity(&self, name: &str) -> Result<Amenity, DomainError> {
        validate_text("name", name, self.config.max_name_length)?;

        if let Some(existing) = self.get_amenity_by_name(name).await? {
            debug!("Amenity already exists with id={}", existing.id);
            return Ok(existing);
        }

        let now = Utc::now();
        let amenity = Amenity {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            created_at: now,
            updated_at: now,
        };
        let amenity = self
            .amenities
            .add(amenity)
            .await
            .map_err(DomainError::storage)?;
        info!("Created amenity with id={}", amenity.id);
        Ok(amenity)
    }

    #[instrument(name = "hbnb.amenities.get_amenity", skip(self), fields(amenity_id = %id))]
    pub async fn get_amenity(&self, id: Uuid) -> Result<Amenity, DomainError> {
        self.amenities
            .get(id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Amenity, id))
    }

    #[instrument(name = "hbnb.amenities.get_amenity_by_name", skip(self))]
    pub async fn get_amenity_by_name(&self, name: &str) -> Result<Option<Amenity>, DomainError> {
        let found = self
            .amenities
            .get_by_attribute("name", &name.into())
            .await
            .map_err(DomainError::storage)?;
        Ok(found.into_iter().next())
    }

    #[instrument(name = "hbnb.amenities.get_all_amenities", skip(self))]
    pub async fn get_all_amenities(&self) -> Result<Vec<Amenity>, DomainError> {
        self.amenities.get_all().await.map_err(DomainError::storage)
    }

    #[instrument(
        name = "hbnb.amenities.update_amenity",
        skip(self, patch),
        fields(amenity_id = %id)
    )]
    pub async fn update_amenity(
        &self,
        id: Uuid,
        patch: AmenityPatch,
    ) -> Result<Amenity, DomainError> {
        if let Some(ref name) = patch.name {
            validate_text("name", name, self.config.max_name_length)?;
            if let Some(other) = self.get_amenity_by_name(name).await? {
                if other.id != id {
                    return Err(DomainError::duplicate_name(name.clone()));
                }
            }
        }

        let updated = self
            .amenities
            .update(id, patch)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Amenity, id))?;
        info!("Updated amenity");
        Ok(updated)
    }

    /// Removes the amenity and strips its id from every place listing it.
    #[instrument(name = "hbnb.amenities.delete_amenity", skip(self), fields(amenity_id = %id))]
    pub async fn delete_amenity(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.amenities.delete(id).await.map_err(DomainError::storage)? {
            return Err(DomainError::not_found(EntityKind::Amenity, id));
        }

        let places = self.places.get_all().await.map_err(DomainError::storage)?;
        let mut detached = 0usize;
        for place in places.into_iter().filter(|p| p.amenities.contains(&id)) {
            let amenities = place.amenities.into_iter().filter(|a| *a != id).collect();
            let changes = PlaceChanges {
                amenities: Some(amenities),
                ..Default::default()
            };
            self.places
                .update(place.id, changes)
                .await
                .map_err(DomainError::storage)?;
            detached += 1;
        }

        info!("Deleted amenity, detached from {} place(s)", detached);
        Ok(())
    }
}
