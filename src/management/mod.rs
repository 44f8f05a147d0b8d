mod auth;
mod features;
mod models;

pub use auth::TokenManager;
pub use features::{FeatureCacheError, FeatureCacheManager};
pub use models::{ModelManager, model_path};
