//! Errors reported by the carousel and strip controllers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    /// Invalid or missing setup data. Raised before any timer is armed.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Index request outside `0..len`. State is left untouched.
    #[error("Index {index} out of range for {len} slides")]
    OutOfRange { index: usize, len: usize },
    /// Operation invoked on a controller that has been torn down.
    #[error("Controller has been torn down")]
    Lifecycle,
}
