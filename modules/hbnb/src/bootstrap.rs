//! Startup seeding of configured data through the public API.

use tracing::{info, instrument};

use crate::config::SeedConfig;
use crate::contract::{client::HbnbApi, error::HbnbError, model::NewUser};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// False when no admin is configured or the email is already taken.
    pub admin_created: bool,
    /// Configured amenity names ensured, whether new or pre-existing.
    pub amenities: usize,
}

/// Applying the same seed twice is a no-op the second time.
#[instrument(name = "hbnb.bootstrap.apply_seed", skip_all)]
pub async fn apply_seed(api: &dyn HbnbApi, seed: &SeedConfig) -> Result<SeedReport, HbnbError> {
    let mut report = SeedReport::default();

    if let Some(admin) = &seed.admin {
        if api.get_user_by_email(&admin.email).await?.is_none() {
            api.create_user(NewUser {
                email: admin.email.clone(),
                first_name: admin.first_name.clone(),
                last_name: admin.last_name.clone(),
                password: admin.password.clone(),
                is_admin: true,
            })
            .await?;
            report.admin_created = true;
            info!(email = %admin.email, "Seeded admin user");
        }
    }

    for name in &seed.amenities {
        api.create_amenity(name).await?;
        report.amenities += 1;
    }

    info!(
        admin_created = report.admin_created,
        amenities = report.amenities,
        "Seed applied"
    );
    Ok(report)
}
