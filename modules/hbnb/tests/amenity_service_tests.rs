mod common;

use anyhow::Result;
use uuid::Uuid;

use common::{facade, new_place, user};
use hbnb::{AmenityPatch, EntityKind, HbnbApi, HbnbError};

#[tokio::test]
async fn create_is_idempotent_by_name() -> Result<()> {
    let api = facade();

    let first = api.create_amenity("WiFi").await?;
    let second = api.create_amenity("WiFi").await?;
    assert_eq!(first.id, second.id);
    assert_eq!(api.get_all_amenities().await?.len(), 1);

    // names compare exactly
    let other = api.create_amenity("wifi").await?;
    assert_ne!(other.id, first.id);
    Ok(())
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let api = facade();
    for name in ["", "   "] {
        let err = api.create_amenity(name).await.unwrap_err();
        assert!(matches!(err, HbnbError::Validation { .. }));
    }
    assert!(api.get_all_amenities().await.unwrap().is_empty());
}

#[tokio::test]
async fn lookup_by_id_and_name() -> Result<()> {
    let api = facade();
    let pool = api.create_amenity("Pool").await?;

    assert_eq!(api.get_amenity(pool.id).await?, pool);
    assert_eq!(api.get_amenity_by_name("Pool").await?, Some(pool));
    assert_eq!(api.get_amenity_by_name("Sauna").await?, None);

    let ghost = Uuid::new_v4();
    assert_eq!(
        api.get_amenity(ghost).await.unwrap_err(),
        HbnbError::not_found(EntityKind::Amenity, ghost)
    );
    Ok(())
}

#[tokio::test]
async fn rename_rules() -> Result<()> {
    let api = facade();
    let wifi = api.create_amenity("WiFi").await?;
    let pool = api.create_amenity("Pool").await?;

    let err = api
        .update_amenity(
            pool.id,
            AmenityPatch {
                name: Some("WiFi".into()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HbnbError::Conflict { .. }));

    let err = api
        .update_amenity(
            pool.id,
            AmenityPatch {
                name: Some(String::new()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HbnbError::Validation { .. }));
    assert_eq!(api.get_amenity(pool.id).await?.name, "Pool");

    let renamed = api
        .update_amenity(
            wifi.id,
            AmenityPatch {
                name: Some("Fast WiFi".into()),
            },
        )
        .await?;
    assert_eq!(renamed.name, "Fast WiFi");
    assert_eq!(renamed.created_at, wifi.created_at);
    Ok(())
}

#[tokio::test]
async fn delete_detaches_from_places() -> Result<()> {
    let api = facade();
    let owner = user(&api, "owner@x.com").await;
    let wifi = api.create_amenity("WiFi").await?;
    let pool = api.create_amenity("Pool").await?;

    let mut np = new_place(owner.id);
    np.amenities = vec![wifi.id, pool.id];
    let p = api.create_place(np).await?;

    api.delete_amenity(wifi.id).await?;
    assert_eq!(api.get_place(p.id).await?.amenities, vec![pool.id]);
    assert!(api.get_amenity(wifi.id).await.is_err());

    let err = api.delete_amenity(wifi.id).await.unwrap_err();
    assert_eq!(err.status_class(), 404);
    Ok(())
}
