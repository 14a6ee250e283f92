//! Tool registry and dispatch.
//!
//! The registry binds a tool name to its description, input schema and
//! handler. It is assembled once at startup and never mutated afterwards;
//! concurrent registration is not supported.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ToolError;

use super::schema::InputSchema;
use super::{ToolCallResult, ToolContent};

/// Output of a tool handler: zero or more content items, or a typed failure.
pub type HandlerResult = Result<Vec<ToolContent>, ToolError>;

/// A handler bound to a tool at registration time.
///
/// Handlers receive the already-validated arguments object. Failures are
/// propagated as [`ToolError`] values, never as panics.
pub type ToolHandler = Box<dyn Fn(&Value) -> HandlerResult + Send + Sync>;

/// A named, schema-described operation invocable by a client.
pub struct ToolDescriptor {
    name: String,
    description: String,
    schema: InputSchema,
    handler: ToolHandler,
}

impl ToolDescriptor {
    /// Creates a descriptor binding `name` to `schema` and `handler`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: InputSchema,
        handler: impl Fn(&Value) -> HandlerResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler: Box::new(handler),
        }
    }

    /// Unique tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared input schema.
    #[must_use]
    pub const fn schema(&self) -> &InputSchema {
        &self.schema
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Mapping from tool name to descriptor.
///
/// Iteration order is deterministic (sorted by name); callers must not rely
/// on any particular order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, ToolDescriptor>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Registers a tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if a tool with the same name is
    /// already registered.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        if self.tools.contains_key(descriptor.name()) {
            return Err(ToolError::DuplicateTool {
                name: descriptor.name().to_string(),
            });
        }
        self.tools.insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    /// Looks up a tool by name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] if the name is not registered.
    pub fn lookup(&self, name: &str) -> Result<&ToolDescriptor, ToolError> {
        self.tools.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_string(),
        })
    }

    /// All registered descriptors, for capability advertisement.
    pub fn list(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Runs the full dispatch sequence for one request.
    ///
    /// Lookup, validation and handler execution happen in order; the first
    /// failure short-circuits into an error envelope. This is the only entry
    /// point the protocol handler uses, so no tool failure can propagate
    /// past it.
    #[must_use]
    pub fn call(&self, name: &str, arguments: &Value) -> ToolCallResult {
        match self.try_call(name, arguments) {
            Ok(content) => ToolCallResult::success(content),
            Err(error) => {
                tracing::debug!(tool = name, error = %error, "tool call failed");
                ToolCallResult::error(error.to_string())
            }
        }
    }

    fn try_call(&self, name: &str, arguments: &Value) -> HandlerResult {
        let descriptor = self.lookup(name)?;
        descriptor.schema().validate(arguments)?;
        (descriptor.handler)(arguments)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::tools::schema::FieldType;

    use super::*;

    fn echo_tool(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(
            name,
            "echoes the operation field",
            InputSchema::new().required("operation", FieldType::String, "Operation"),
            |args| {
                let operation = args["operation"].as_str().unwrap_or_default();
                Ok(vec![ToolContent::text(operation)])
            },
        )
    }

    #[test]
    fn register_then_lookup_returns_same_schema() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("echo")).unwrap();

        let descriptor = registry.lookup("echo").unwrap();
        assert_eq!(descriptor.name(), "echo");
        assert_eq!(
            descriptor.schema().to_json(),
            InputSchema::new()
                .required("operation", FieldType::String, "Operation")
                .to_json()
        );
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("echo")).unwrap();

        let err = registry.register(echo_tool("echo")).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool { name } if name == "echo"));
    }

    #[test]
    fn lookup_of_unregistered_name_fails() {
        let registry = ToolRegistry::new();
        let err = registry.lookup("missing").unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool { name } if name == "missing"));
    }

    #[test]
    fn list_enumerates_all_descriptors() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("beta")).unwrap();
        registry.register(echo_tool("alpha")).unwrap();

        let names: Vec<&str> = registry.list().map(ToolDescriptor::name).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"alpha"));
        assert!(names.contains(&"beta"));
    }

    #[test]
    fn call_runs_lookup_validation_and_handler_in_order() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("echo")).unwrap();

        let result = registry.call("echo", &json!({"operation": "list"}));
        assert!(!result.is_error);
        assert_eq!(result.content, vec![ToolContent::text("list")]);
    }

    #[test]
    fn call_with_unknown_tool_yields_error_envelope() {
        let registry = ToolRegistry::new();
        let result = registry.call("missing", &json!({}));
        assert!(result.is_error);
        assert_eq!(
            result.content,
            vec![ToolContent::text("unknown tool: missing")]
        );
    }

    #[test]
    fn call_with_invalid_arguments_never_reaches_handler() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new(
                "strict",
                "requires operation",
                InputSchema::new().required("operation", FieldType::String, "Operation"),
                |_| panic!("handler must not run on invalid arguments"),
            ))
            .unwrap();

        let result = registry.call("strict", &json!({}));
        assert!(result.is_error);
    }

    #[test]
    fn handler_failure_becomes_error_envelope() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new(
                "failing",
                "always fails",
                InputSchema::new(),
                |_| {
                    Err(ToolError::HandlerExecution {
                        message: "backing store unavailable".to_string(),
                    })
                },
            ))
            .unwrap();

        let result = registry.call("failing", &json!({}));
        assert!(result.is_error);
        assert_eq!(result.content.len(), 1);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("backing store unavailable"));
    }
}
