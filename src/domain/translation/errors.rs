//! Translation Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationRequestError {
    #[error("No text provided")]
    EmptyText,
}
