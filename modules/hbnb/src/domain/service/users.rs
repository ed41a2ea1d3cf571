use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{EntityKind, NewUser, Review, User, UserPatch};
use crate::domain::entity::UserChanges;
use crate::domain::error::DomainError;
use crate::domain::ports::CredentialHasher;
use crate::domain::repo::Repository;
use crate::domain::service::{validate_text, ServiceConfig};

/// Domain service with business rules for user accounts.
/// Depends only on the repository and hashing ports, not on infra types.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn Repository<User>>,
    reviews: Arc<dyn Repository<Review>>,
    hasher: Arc<dyn CredentialHasher>,
    config: ServiceConfig,
}

impl UserService {
    pub fn new(
        users: Arc<dyn Repository<User>>,
        reviews: Arc<dyn Repository<Review>>,
        hasher: Arc<dyn CredentialHasher>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            users,
            reviews,
            hasher,
            config,
        }
    }

    #[instrument(
        name = "hbnb.users.create_user",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        self.validate_email(&new_user.email)?;
        validate_text("first_name", &new_user.first_name, self.config.max_name_length)?;
        validate_text("last_name", &new_user.last_name, self.config.max_name_length)?;
        self.validate_password(&new_user.password)?;

        if self.get_user_by_email(&new_user.email).await?.is_some() {
            return Err(DomainError::duplicate_email(new_user.email));
        }

        // the plaintext is dropped with `new_user`; only the hash is stored
        let password_hash = self
            .hasher
            .hash(&new_user.password)
            .map_err(DomainError::storage)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash,
            is_admin: new_user.is_admin,
            places: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let user = self.users.add(user).await.map_err(DomainError::storage)?;
        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "hbnb.users.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");
        self.users
            .get(id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(EntityKind::User, id))
    }

    #[instrument(name = "hbnb.users.get_all_users", skip(self))]
    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.get_all().await.map_err(DomainError::storage)?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "hbnb.users.get_user_by_email", skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let found = self
            .users
            .get_by_attribute("email", &email.into())
            .await
            .map_err(DomainError::storage)?;
        Ok(found.into_iter().next())
    }

    #[instrument(
        name = "hbnb.users.update_user",
        skip(self, patch),
        fields(user_id = %id)
    )]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        self.validate_user_patch(&patch)?;
        let current = self.get_user(id).await?;

        if let Some(ref new_email) = patch.email {
            if new_email != &current.email {
                if let Some(other) = self.get_user_by_email(new_email).await? {
                    if other.id != id {
                        return Err(DomainError::duplicate_email(new_email.clone()));
                    }
                }
            }
        }

        let password_hash = match patch.password {
            Some(ref plain) => Some(self.hasher.hash(plain).map_err(DomainError::storage)?),
            None => None,
        };

        let changes = UserChanges {
            email: patch.email,
            first_name: patch.first_name,
            last_name: patch.last_name,
            password_hash,
            is_admin: patch.is_admin,
            places: None,
        };

        let updated = self
            .users
            .update(id, changes)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(EntityKind::User, id))?;

        info!("Successfully updated user");
        Ok(updated)
    }

    /// Refuses while the user still owns places or authored reviews; those
    /// must be removed first so no reference is left dangling.
    #[instrument(name = "hbnb.users.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting user");

        let user = self.get_user(id).await?;
        let reviews = self
            .reviews
            .get_by_attribute("user_id", &id.into())
            .await
            .map_err(DomainError::storage)?;
        if !user.places.is_empty() || !reviews.is_empty() {
            return Err(DomainError::has_dependents(
                id,
                user.places.len(),
                reviews.len(),
            ));
        }

        let deleted = self.users.delete(id).await.map_err(DomainError::storage)?;
        if !deleted {
            return Err(DomainError::not_found(EntityKind::User, id));
        }

        info!("Successfully deleted user");
        Ok(())
    }

    /// `None` for an unknown email and for a wrong password alike.
    #[instrument(name = "hbnb.users.authenticate", skip(self, password))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.get_user_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("Authentication rejected");
                return Ok(None);
            }
        };
        if self.hasher.verify(password, &user.password_hash) {
            debug!("Authentication succeeded");
            Ok(Some(user))
        } else {
            debug!("Authentication rejected");
            Ok(None)
        }
    }

    /// Append `place_id` to the user's places. False if the user is missing
    /// or already lists it.
    #[instrument(name = "hbnb.users.add_owned_place", skip(self))]
    pub async fn add_owned_place(&self, user_id: Uuid, place_id: Uuid) -> Result<bool, DomainError> {
        let Some(user) = self.users.get(user_id).await.map_err(DomainError::storage)? else {
            return Ok(false);
        };
        if user.places.contains(&place_id) {
            return Ok(false);
        }

        let mut places = user.places;
        places.push(place_id);
        self.set_places(user_id, places).await
    }

    /// Remove `place_id` from the user's places. False if nothing changed.
    #[instrument(name = "hbnb.users.remove_owned_place", skip(self))]
    pub async fn remove_owned_place(
        &self,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<bool, DomainError> {
        let Some(user) = self.users.get(user_id).await.map_err(DomainError::storage)? else {
            return Ok(false);
        };
        if !user.places.contains(&place_id) {
            return Ok(false);
        }

        let places = user.places.into_iter().filter(|p| *p != place_id).collect();
        self.set_places(user_id, places).await
    }

    #[instrument(name = "hbnb.users.get_user_places", skip(self), fields(user_id = %user_id))]
    pub async fn get_user_places(&self, user_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(self.get_user(user_id).await?.places)
    }

    async fn set_places(&self, user_id: Uuid, places: Vec<Uuid>) -> Result<bool, DomainError> {
        let changes = UserChanges {
            places: Some(places),
            ..Default::default()
        };
        let updated = self
            .users
            .update(user_id, changes)
            .await
            .map_err(DomainError::storage)?;
        Ok(updated.is_some())
    }

    // --- validation helpers ---

    fn validate_user_patch(&self, patch: &UserPatch) -> Result<(), DomainError> {
        if let Some(ref email) = patch.email {
            self.validate_email(email)?;
        }
        if let Some(ref first_name) = patch.first_name {
            validate_text("first_name", first_name, self.config.max_name_length)?;
        }
        if let Some(ref last_name) = patch.last_name {
            validate_text("last_name", last_name, self.config.max_name_length)?;
        }
        if let Some(ref password) = patch.password {
            self.validate_password(password)?;
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if email.is_empty() || !email.contains('@') || !email.contains('.') {
            return Err(DomainError::invalid_field(
                "email",
                format!("invalid format: '{}'", email),
            ));
        }
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), DomainError> {
        if password.is_empty() {
            return Err(DomainError::invalid_field("password", "cannot be empty"));
        }
        Ok(())
    }
}
