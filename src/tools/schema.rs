//! Flat input schemas for tool arguments.
//!
//! A schema is a list of named fields, each with a primitive type and a
//! required flag. That covers everything the advertised tools declare; there
//! is deliberately no nested-object, array, enum or format validation here.
//! The same declaration serialises to a JSON Schema object for the
//! `tools/list` advertisement.

use serde_json::{json, Map, Value};

use crate::error::ToolError;

/// Primitive type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A JSON string.
    String,
    /// A JSON integer (no fractional part).
    Integer,
    /// A JSON object.
    Object,
}

impl FieldType {
    /// The JSON Schema type keyword for this primitive.
    #[must_use]
    pub const fn json_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Object => "object",
        }
    }

    /// Whether `value` is of this primitive type.
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Object => value.is_object(),
        }
    }
}

/// One declared field of a tool's input schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name as it appears in the arguments object.
    pub name: &'static str,
    /// Primitive type the value must have when present.
    pub ty: FieldType,
    /// Whether the field must be present.
    pub required: bool,
    /// Human-readable description for the advertisement.
    pub description: &'static str,
}

/// A flat, JSON-Schema-like description of a tool's input.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    /// Creates an empty schema (accepts any object).
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a required field.
    #[must_use]
    pub fn required(mut self, name: &'static str, ty: FieldType, description: &'static str) -> Self {
        self.fields.push(FieldSpec {
            name,
            ty,
            required: true,
            description,
        });
        self
    }

    /// Adds an optional field.
    #[must_use]
    pub fn optional(mut self, name: &'static str, ty: FieldType, description: &'static str) -> Self {
        self.fields.push(FieldSpec {
            name,
            ty,
            required: false,
            description,
        });
        self
    }

    /// The declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Checks `arguments` against this schema.
    ///
    /// Absent arguments (`null`) are treated as an empty object, so schemas
    /// without required fields accept them.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::SchemaValidation`] naming the first field that is
    /// missing while required, or present with the wrong primitive type.
    pub fn validate(&self, arguments: &Value) -> Result<(), ToolError> {
        let object = match arguments {
            Value::Object(map) => map,
            Value::Null => {
                if let Some(field) = self.fields.iter().find(|f| f.required) {
                    return Err(ToolError::SchemaValidation {
                        field: field.name.to_string(),
                        problem: "is required but missing".to_string(),
                    });
                }
                return Ok(());
            }
            _ => {
                return Err(ToolError::SchemaValidation {
                    field: "arguments".to_string(),
                    problem: "must be a JSON object".to_string(),
                })
            }
        };

        for field in &self.fields {
            match object.get(field.name) {
                Some(value) => {
                    if !field.ty.matches(value) {
                        return Err(ToolError::SchemaValidation {
                            field: field.name.to_string(),
                            problem: format!("must be of type {}", field.ty.json_name()),
                        });
                    }
                }
                None => {
                    if field.required {
                        return Err(ToolError::SchemaValidation {
                            field: field.name.to_string(),
                            problem: "is required but missing".to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Serialises this schema as a JSON Schema object for advertisement.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            properties.insert(
                field.name.to_string(),
                json!({
                    "type": field.ty.json_name(),
                    "description": field.description,
                }),
            );
            if field.required {
                required.push(Value::String(field.name.to_string()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }

        Value::Object(schema)
    }
}
