//! Catalog conversion errors.

use thiserror::Error;

/// Errors raised while building the tool catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The chat API requires a description for every function.
    #[error("Tool '{0}' has no description")]
    MissingDescription(String),
}
