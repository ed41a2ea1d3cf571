mod common;

use anyhow::Result;
use uuid::Uuid;

use common::{facade, new_review, place, user};
use hbnb::{EntityKind, HbnbApi, HbnbError, ReviewPatch};

#[tokio::test]
async fn create_attaches_review_to_place() -> Result<()> {
    let api = facade();
    let owner = user(&api, "owner@x.com").await;
    let guest = user(&api, "guest@x.com").await;
    let p = place(&api, owner.id).await;

    let r = api.create_review(new_review(p.id, guest.id, 5)).await?;
    assert_eq!(r.rating, 5);
    assert_eq!(r.place_id, p.id);
    assert_eq!(r.user_id, guest.id);

    assert_eq!(api.get_place(p.id).await?.reviews, vec![r.id]);
    assert_eq!(api.get_review(r.id).await?, r);
    assert_eq!(api.get_reviews_by_place(p.id).await?, vec![r.clone()]);
    assert_eq!(api.get_reviews_by_user(guest.id).await?, vec![r.clone()]);
    assert_eq!(api.get_all_reviews().await?, vec![r]);
    Ok(())
}

#[tokio::test]
async fn rating_must_be_within_bounds() -> Result<()> {
    let api = facade();
    let owner = user(&api, "owner@x.com").await;
    let guest = user(&api, "guest@x.com").await;
    let p = place(&api, owner.id).await;

    for rating in [0, 6, -3] {
        let err = api
            .create_review(new_review(p.id, guest.id, rating))
            .await
            .unwrap_err();
        assert!(matches!(err, HbnbError::Validation { .. }), "rating {rating}");
    }
    assert!(api.get_all_reviews().await?.is_empty());
    assert!(api.get_place(p.id).await?.reviews.is_empty());

    let mut blank = new_review(p.id, guest.id, 3);
    blank.text = "   ".into();
    assert!(api.create_review(blank).await.is_err());
    Ok(())
}

#[tokio::test]
async fn references_must_resolve() -> Result<()> {
    let api = facade();
    let owner = user(&api, "owner@x.com").await;
    let guest = user(&api, "guest@x.com").await;
    let p = place(&api, owner.id).await;

    let ghost_place = Uuid::new_v4();
    let err = api
        .create_review(new_review(ghost_place, guest.id, 4))
        .await
        .unwrap_err();
    assert_eq!(err, HbnbError::not_found(EntityKind::Place, ghost_place));

    let ghost_user = Uuid::new_v4();
    let err = api
        .create_review(new_review(p.id, ghost_user, 4))
        .await
        .unwrap_err();
    assert_eq!(err, HbnbError::not_found(EntityKind::User, ghost_user));

    assert!(api.get_all_reviews().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn one_review_per_user_and_place() -> Result<()> {
    let api = facade();
    let owner = user(&api, "owner@x.com").await;
    let guest = user(&api, "guest@x.com").await;
    let p = place(&api, owner.id).await;
    let other = place(&api, owner.id).await;

    api.create_review(new_review(p.id, guest.id, 4)).await?;
    let err = api
        .create_review(new_review(p.id, guest.id, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, HbnbError::Validation { .. }));

    // a different place is fine
    api.create_review(new_review(other.id, guest.id, 2)).await?;
    assert_eq!(api.get_reviews_by_user(guest.id).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn update_revalidates_and_merges() -> Result<()> {
    let api = facade();
    let owner = user(&api, "owner@x.com").await;
    let guest = user(&api, "guest@x.com").await;
    let p = place(&api, owner.id).await;
    let r = api.create_review(new_review(p.id, guest.id, 4)).await?;

    let err = api
        .update_review(
            r.id,
            ReviewPatch {
                rating: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HbnbError::Validation { .. }));
    assert_eq!(api.get_review(r.id).await?, r);

    let updated = api
        .update_review(
            r.id,
            ReviewPatch {
                text: Some("Even better on second thought".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.rating, 4);
    assert_eq!(updated.text, "Even better on second thought");
    assert_eq!(updated.place_id, r.place_id);
    Ok(())
}

#[tokio::test]
async fn delete_detaches_from_place() -> Result<()> {
    let api = facade();
    let owner = user(&api, "owner@x.com").await;
    let guest = user(&api, "guest@x.com").await;
    let p = place(&api, owner.id).await;
    let r = api.create_review(new_review(p.id, guest.id, 4)).await?;

    api.delete_review(r.id).await?;
    assert!(api.get_place(p.id).await?.reviews.is_empty());
    assert_eq!(
        api.get_review(r.id).await.unwrap_err(),
        HbnbError::not_found(EntityKind::Review, r.id)
    );

    // with its review gone the guest may be deleted
    api.delete_user(guest.id).await?;
    Ok(())
}

#[tokio::test]
async fn author_with_reviews_cannot_be_deleted() -> Result<()> {
    let api = facade();
    let owner = user(&api, "owner@x.com").await;
    let guest = user(&api, "guest@x.com").await;
    let p = place(&api, owner.id).await;
    api.create_review(new_review(p.id, guest.id, 4)).await?;

    let err = api.delete_user(guest.id).await.unwrap_err();
    assert!(matches!(err, HbnbError::InUse { .. }));
    assert_eq!(err.status_class(), 409);
    Ok(())
}
