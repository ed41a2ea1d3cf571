use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the hbnb module, read from `modules.hbnb` of the
/// application config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HbnbConfig {
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
    #[serde(default = "default_max_review_length")]
    pub max_review_length: usize,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl Default for HbnbConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
            max_title_length: default_max_title_length(),
            max_review_length: default_max_review_length(),
            seed: SeedConfig::default(),
        }
    }
}

/// Initial data applied by `hbnb-server seed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    #[serde(default)]
    pub admin: Option<SeedUser>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn default_max_name_length() -> usize {
    50
}

fn default_max_title_length() -> usize {
    100
}

fn default_max_review_length() -> usize {
    1000
}

impl From<&HbnbConfig> for ServiceConfig {
    fn from(cfg: &HbnbConfig) -> Self {
        Self {
            max_name_length: cfg.max_name_length,
            max_title_length: cfg.max_title_length,
            max_review_length: cfg.max_review_length,
        }
    }
}
