// === PUBLIC CONTRACT ===
// Callers (HTTP layer, CLI) should only depend on the contract and the facade
pub mod contract;

pub use contract::{client, decode_input, error, model};
pub use contract::{HbnbApi, HbnbError};
pub use contract::model::*;

// === COMPOSITION ROOT ===
pub mod gateways;
pub use gateways::{HbnbFacade, Repositories};

pub mod bootstrap;
pub mod config;
pub use config::HbnbConfig;

// === INTERNAL MODULES ===
// Exposed for tests and alternative storage adapters; prefer `contract` for
// stable APIs.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
