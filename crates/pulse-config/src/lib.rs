pub mod global;
pub mod loader;

pub use global::{GlobalConfig, QueryGlobalConfig, StorageGlobalConfig, SystemConfig};
pub use loader::ConfigLoader;
