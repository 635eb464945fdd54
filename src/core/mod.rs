// Core business logic module

pub mod config;
pub mod config_source;
pub mod system_monitor;

// Re-export commonly used items
pub use config::ConfigSnapshot;
pub use config_source::{ConfigSource, FileConfigSource, StaticConfigSource};
