mod common;

use anyhow::Result;

use common::facade;
use hbnb::bootstrap::{apply_seed, SeedReport};
use hbnb::config::{SeedConfig, SeedUser};
use hbnb::HbnbApi;

fn seed() -> SeedConfig {
    SeedConfig {
        admin: Some(SeedUser {
            email: "admin@hbnb.io".into(),
            first_name: "Admin".into(),
            last_name: "HBnB".into(),
            password: "admin1234".into(),
        }),
        amenities: vec!["WiFi".into(), "Pool".into()],
    }
}

#[tokio::test]
async fn seed_creates_admin_and_amenities() -> Result<()> {
    let api = facade();

    let report = apply_seed(&api, &seed()).await?;
    assert_eq!(
        report,
        SeedReport {
            admin_created: true,
            amenities: 2
        }
    );

    let admin = api
        .authenticate("admin@hbnb.io", "admin1234")
        .await?
        .expect("admin can log in");
    assert!(admin.is_admin);
    assert_eq!(api.get_all_amenities().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn seeding_twice_changes_nothing() -> Result<()> {
    let api = facade();
    apply_seed(&api, &seed()).await?;

    let again = apply_seed(&api, &seed()).await?;
    assert!(!again.admin_created);
    assert_eq!(api.get_all_users().await?.len(), 1);
    assert_eq!(api.get_all_amenities().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn empty_seed_is_a_no_op() -> Result<()> {
    let api = facade();
    let report = apply_seed(&api, &SeedConfig::default()).await?;
    assert_eq!(report, SeedReport::default());
    assert!(api.get_all_users().await?.is_empty());
    Ok(())
}
