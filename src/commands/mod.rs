// Command handlers module
pub mod monitor;

// Re-exports for cleaner imports
pub use monitor::execute as monitor;
