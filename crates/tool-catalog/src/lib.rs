//! Converts MCP tool descriptors into chat-API function tools.

mod catalog;
mod error;

pub use catalog::{convert, ToolCatalog};
pub use error::CatalogError;
