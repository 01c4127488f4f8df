//! Tool catalog for the chat API, built once per session.

use crate::error::CatalogError;
use openai_client::ToolDefinition;
use rmcp::model::{JsonObject, Tool};
use serde_json::{json, Value};
use tracing::debug;

/// Convert one MCP tool descriptor into an OpenAI function tool.
///
/// The description is trimmed. `properties` and `required` are copied from
/// the input schema verbatim, defaulting to `{}` and `[]`.
pub fn convert(tool: &Tool) -> Result<ToolDefinition, CatalogError> {
    let description = tool
        .description
        .as_deref()
        .ok_or_else(|| CatalogError::MissingDescription(tool.name.to_string()))?
        .trim();

    let properties = schema_field(&tool.input_schema, "properties").unwrap_or_else(|| json!({}));
    let required = schema_field(&tool.input_schema, "required").unwrap_or_else(|| json!([]));

    Ok(ToolDefinition::function(
        tool.name.as_ref(),
        description,
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    ))
}

fn schema_field(schema: &JsonObject, field: &str) -> Option<Value> {
    schema.get(field).cloned()
}

/// The fixed set of function tools offered to the model for a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCatalog {
    definitions: Vec<ToolDefinition>,
}

impl ToolCatalog {
    /// Convert every descriptor, in order. Fails on the first bad descriptor.
    pub fn from_descriptors(tools: &[Tool]) -> Result<Self, CatalogError> {
        let definitions = tools.iter().map(convert).collect::<Result<Vec<_>, _>>()?;
        debug!("Built tool catalog with {} tools", definitions.len());
        Ok(Self { definitions })
    }

    /// Definitions to send with every chat request.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Tool names, in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .map(|d| d.function.name.as_str())
            .collect()
    }
}
