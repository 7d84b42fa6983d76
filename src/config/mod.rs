//! Configuration loading and normalization.

pub mod loader;
pub mod model;

pub use loader::{load, ConfigSource, EnvSource};
pub use model::{normalize_base_url, NotifierConfig};
