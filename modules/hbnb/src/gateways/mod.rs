pub mod local;

pub use local::{HbnbFacade, Repositories};
