// Platform-specific code module

pub mod system;
