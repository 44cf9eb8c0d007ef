//! Audio Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("Invalid audio name: {0}")]
    InvalidName(String),

    #[error("Invalid audio name prefix: {0}")]
    InvalidPrefix(String),
}
