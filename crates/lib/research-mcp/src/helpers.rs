use research_core::{CallResult, OperationDescriptor};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::{Value, json};

/// Advertised MCP tool for a catalog descriptor.
pub(crate) fn tool_for(descriptor: &OperationDescriptor) -> Tool {
    Tool::new(
        descriptor.name(),
        descriptor.description().to_string(),
        descriptor.input_schema(),
    )
}

/// Converts a dispatch outcome into the MCP result envelope. Failures stay
/// in-band and carry their category as structured content.
pub(crate) fn tool_result(result: CallResult) -> CallToolResult {
    let CallResult {
        payload,
        is_error,
        error_kind,
    } = result;
    let content = vec![Content::text(payload)];
    if !is_error {
        return CallToolResult::success(content);
    }
    let mut failure = CallToolResult::error(content);
    failure.structured_content =
        error_kind.map(|kind| json!({ "kind": kind.as_str(), "code": kind.code() }));
    failure
}

pub(crate) fn arguments_value(arguments: Option<JsonObject>) -> Value {
    arguments.map_or(Value::Null, Value::Object)
}
