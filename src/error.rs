use std::io;
use thiserror::Error;

/// Error type for the SysMon library
#[derive(Error, Debug)]
pub enum SysmonError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metric collection failed: {0}")]
    Collection(String),

    #[error("Alert log error: {0}")]
    Sink(String),

    #[error("Initialization failed: {0}")]
    FatalInit(String),

    #[error("TUI error: {0}")]
    Tui(String),
}

/// Result type alias for SysMon
pub type Result<T> = std::result::Result<T, SysmonError>;

impl SysmonError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SysmonError::Config(msg.into())
    }

    pub fn collection<S: Into<String>>(msg: S) -> Self {
        SysmonError::Collection(msg.into())
    }

    pub fn sink<S: Into<String>>(msg: S) -> Self {
        SysmonError::Sink(msg.into())
    }

    /// Create an error that must abort startup
    pub fn fatal_init<S: Into<String>>(msg: S) -> Self {
        SysmonError::FatalInit(msg.into())
    }

    pub fn tui<S: Into<String>>(msg: S) -> Self {
        SysmonError::Tui(msg.into())
    }

    /// Whether this error is allowed to terminate the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, SysmonError::FatalInit(_) | SysmonError::Config(_))
    }
}
