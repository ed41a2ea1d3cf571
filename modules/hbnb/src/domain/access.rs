//! Who may change what.
//!
//! Every rule lives here once; the facade's `*_as` operations call into it
//! before delegating, and an outer transport can call it directly to decide
//! ahead of time.

use uuid::Uuid;

use crate::contract::model::{Actor, Place, Review, UserPatch};
use crate::domain::error::DomainError;

pub struct AccessPolicy;

impl AccessPolicy {
    /// Only administrators create accounts on behalf of others.
    pub fn can_create_user(actor: &Actor) -> Result<(), DomainError> {
        if actor.is_admin {
            Ok(())
        } else {
            Err(DomainError::forbidden("admin privileges required"))
        }
    }

    /// Self or admin; credentials and the admin flag are admin-only.
    pub fn can_modify_user(
        actor: &Actor,
        target_id: Uuid,
        patch: &UserPatch,
    ) -> Result<(), DomainError> {
        if actor.is_admin {
            return Ok(());
        }
        if actor.user_id != target_id {
            return Err(DomainError::forbidden("unauthorized action"));
        }
        if patch.email.is_some() {
            return Err(DomainError::forbidden("admin privileges required to modify email"));
        }
        if patch.password.is_some() {
            return Err(DomainError::forbidden(
                "admin privileges required to modify password",
            ));
        }
        if patch.is_admin.is_some() {
            return Err(DomainError::forbidden(
                "admin privileges required to modify is_admin",
            ));
        }
        Ok(())
    }

    /// Acting on behalf of `user_id`: self or admin. Covers the owner of a
    /// new place and the author of a new review.
    pub fn can_act_for(actor: &Actor, user_id: Uuid) -> Result<(), DomainError> {
        if actor.is_admin || actor.user_id == user_id {
            Ok(())
        } else {
            Err(DomainError::forbidden("cannot act on behalf of another user"))
        }
    }

    /// Self or admin.
    pub fn can_delete_user(actor: &Actor, target_id: Uuid) -> Result<(), DomainError> {
        if actor.is_admin || actor.user_id == target_id {
            Ok(())
        } else {
            Err(DomainError::forbidden("unauthorized action"))
        }
    }

    /// Owner or admin.
    pub fn can_modify_place(actor: &Actor, place: &Place) -> Result<(), DomainError> {
        if actor.is_admin || place.owner_id == actor.user_id {
            Ok(())
        } else {
            Err(DomainError::forbidden("only the owner may modify this place"))
        }
    }

    /// Author or admin.
    pub fn can_modify_review(actor: &Actor, review: &Review) -> Result<(), DomainError> {
        if actor.is_admin || review.user_id == actor.user_id {
            Ok(())
        } else {
            Err(DomainError::forbidden("only the author may modify this review"))
        }
    }

    /// Anyone but the owner may review a place.
    pub fn can_review(actor: &Actor, place: &Place) -> Result<(), DomainError> {
        if place.owner_id == actor.user_id {
            Err(DomainError::own_review(place.id))
        } else {
            Ok(())
        }
    }

    pub fn can_manage_amenities(actor: &Actor) -> Result<(), DomainError> {
        if actor.is_admin {
            Ok(())
        } else {
            Err(DomainError::forbidden("admin privileges required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn place_owned_by(owner_id: Uuid) -> Place {
        let now = Utc::now();
        Place {
            id: Uuid::new_v4(),
            title: "Loft".into(),
            description: String::new(),
            price: 10.0,
            latitude: 0.0,
            longitude: 0.0,
            owner_id,
            reviews: vec![],
            amenities: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn user_may_edit_own_names_but_not_credentials() {
        let me = Uuid::new_v4();
        let actor = Actor::user(me);

        let names = UserPatch {
            first_name: Some("New".into()),
            ..Default::default()
        };
        assert!(AccessPolicy::can_modify_user(&actor, me, &names).is_ok());

        for patch in [
            UserPatch {
                email: Some("x@y.z".into()),
                ..Default::default()
            },
            UserPatch {
                password: Some("pw".into()),
                ..Default::default()
            },
            UserPatch {
                is_admin: Some(true),
                ..Default::default()
            },
        ] {
            assert!(matches!(
                AccessPolicy::can_modify_user(&actor, me, &patch),
                Err(DomainError::Forbidden { .. })
            ));
        }
    }

    #[test]
    fn user_may_not_edit_someone_else() {
        let actor = Actor::user(Uuid::new_v4());
        let res = AccessPolicy::can_modify_user(&actor, Uuid::new_v4(), &UserPatch::default());
        assert!(matches!(res, Err(DomainError::Forbidden { .. })));
        assert!(AccessPolicy::can_delete_user(&actor, Uuid::new_v4()).is_err());
        assert!(AccessPolicy::can_act_for(&actor, Uuid::new_v4()).is_err());
        assert!(AccessPolicy::can_act_for(&actor, actor.user_id).is_ok());
    }

    #[test]
    fn admin_may_edit_anything() {
        let actor = Actor::admin(Uuid::new_v4());
        let patch = UserPatch {
            email: Some("x@y.z".into()),
            is_admin: Some(true),
            ..Default::default()
        };
        assert!(AccessPolicy::can_modify_user(&actor, Uuid::new_v4(), &patch).is_ok());
        assert!(AccessPolicy::can_create_user(&actor).is_ok());
        assert!(AccessPolicy::can_manage_amenities(&actor).is_ok());
        assert!(AccessPolicy::can_modify_place(&actor, &place_owned_by(Uuid::new_v4())).is_ok());
    }

    #[test]
    fn place_rules_follow_ownership() {
        let owner = Uuid::new_v4();
        let place = place_owned_by(owner);

        assert!(AccessPolicy::can_modify_place(&Actor::user(owner), &place).is_ok());
        assert!(AccessPolicy::can_modify_place(&Actor::user(Uuid::new_v4()), &place).is_err());

        assert!(matches!(
            AccessPolicy::can_review(&Actor::user(owner), &place),
            Err(DomainError::OwnReview { .. })
        ));
        assert!(AccessPolicy::can_review(&Actor::user(Uuid::new_v4()), &place).is_ok());
    }

    #[test]
    fn non_admins_cannot_manage_amenities_or_create_users() {
        let actor = Actor::user(Uuid::new_v4());
        assert!(AccessPolicy::can_manage_amenities(&actor).is_err());
        assert!(AccessPolicy::can_create_user(&actor).is_err());
    }
}
