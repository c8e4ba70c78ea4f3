//! Access map error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while declaring or querying the access map.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A registration was attempted with an empty or blank role requirement.
    ///
    /// Fatal at startup: the application must not serve with a misconfigured map.
    #[error("invalid access configuration: {0}")]
    Configuration(String),

    /// A module name was requested that the role has not been granted.
    #[error("module '{module}' is not granted to role '{role}'")]
    UnknownModule { role: String, module: String },

    /// An access map file could not be read or parsed.
    #[error("invalid access map {}: {message}", path.display())]
    Definition { path: PathBuf, message: String },
}

impl AccessError {
    pub(crate) fn definition(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        AccessError::Definition {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias using AccessError.
pub type AccessResult<T> = Result<T, AccessError>;
