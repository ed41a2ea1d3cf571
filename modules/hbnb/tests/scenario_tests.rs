//! End-to-end flows through the public API.

mod common;

use anyhow::Result;

use common::{facade, new_place, new_review, new_user, place, user};
use hbnb::{HbnbApi, HbnbError, PlacePatch};

#[tokio::test]
async fn owner_lists_new_place() -> Result<()> {
    let api = facade();
    let u1 = api.create_user(new_user("a@x.com")).await?;

    let mut np = new_place(u1.id);
    np.price = 100.0;
    let p1 = api.create_place(np).await?;

    let places = api.get_all_places().await?;
    let found = places.iter().find(|p| p.id == p1.id).expect("place listed");
    assert_eq!(found.owner_id, u1.id);
    Ok(())
}

#[tokio::test]
async fn owner_cannot_review_own_place() -> Result<()> {
    let api = facade();
    let u1 = user(&api, "a@x.com").await;
    let p1 = place(&api, u1.id).await;

    let err = api
        .create_review(new_review(p1.id, u1.id, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, HbnbError::Forbidden { .. }));
    assert_eq!(err.status_class(), 403);
    assert!(api.get_all_reviews().await?.is_empty());
    assert!(api.get_place(p1.id).await?.reviews.is_empty());
    Ok(())
}

#[tokio::test]
async fn repeated_amenity_creation_yields_same_entity() -> Result<()> {
    let api = facade();
    let a = api.create_amenity("WiFi").await?;
    let b = api.create_amenity("WiFi").await?;
    assert_eq!(a.id, b.id);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_leaves_single_user() -> Result<()> {
    let api = facade();
    api.create_user(new_user("dup@x.com")).await?;

    let err = api.create_user(new_user("dup@x.com")).await.unwrap_err();
    assert!(matches!(err, HbnbError::Conflict { .. }));
    assert_eq!(api.get_all_users().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn negative_price_update_keeps_old_price() -> Result<()> {
    let api = facade();
    let owner = user(&api, "a@x.com").await;
    let p1 = place(&api, owner.id).await;

    let err = api
        .update_place(
            p1.id,
            PlacePatch {
                price: Some(-5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HbnbError::Validation { .. }));
    assert_eq!(api.get_place(p1.id).await?.price, p1.price);
    Ok(())
}

#[tokio::test]
async fn full_lifecycle() -> Result<()> {
    let api = facade();
    let host = user(&api, "host@x.com").await;
    let guest = user(&api, "guest@x.com").await;
    let wifi = api.create_amenity("WiFi").await?;

    let mut np = new_place(host.id);
    np.amenities = vec![wifi.id];
    let p = api.create_place(np).await?;
    let r = api.create_review(new_review(p.id, guest.id, 5)).await?;

    assert_eq!(api.get_place_amenities(p.id).await?, vec![wifi]);
    assert_eq!(api.get_place_reviews(p.id).await?, vec![r]);

    // tear down in dependency order
    api.delete_place(p.id).await?;
    api.delete_user(guest.id).await?;
    api.delete_user(host.id).await?;

    assert!(api.get_all_users().await?.is_empty());
    assert!(api.get_all_places().await?.is_empty());
    assert!(api.get_all_reviews().await?.is_empty());
    assert_eq!(api.get_all_amenities().await?.len(), 1);
    Ok(())
}
