//! Error types for presentations-mcp.
//!
//! Tool-layer errors ([`ToolError`]) are never allowed past the protocol
//! handler boundary: every variant is converted into an error response
//! envelope with `isError` set, so the client always receives a well-formed
//! reply. Startup errors ([`ConfigError`], [`StoreError`]) terminate the
//! process before the server accepts its first request.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the tool dispatch layer.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The requested tool name is not in the registry.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The tool name the client asked for.
        name: String,
    },

    /// A tool with this name is already registered.
    #[error("tool already registered: {name}")]
    DuplicateTool {
        /// The conflicting tool name.
        name: String,
    },

    /// The arguments object failed schema validation.
    #[error("invalid arguments: field '{field}' {problem}")]
    SchemaValidation {
        /// The missing or mismatched field.
        field: String,
        /// What is wrong with it.
        problem: String,
    },

    /// The operation keyword is not recognised by the dispatcher.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation {
        /// The offending operation keyword.
        operation: String,
    },

    /// Any other failure raised while a tool's handler body was running.
    #[error("tool execution failed: {message}")]
    HandlerExecution {
        /// Description of the failure.
        message: String,
    },
}

/// Errors that can occur while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    Read {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    Parse {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {path}")]
    Missing {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration contents failed validation.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors that can occur while loading the presentation data file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Data file could not be read.
    #[error("failed to read presentation data file: {path}")]
    Read {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Data file could not be parsed.
    #[error("failed to parse presentation data file: {path}")]
    Parse {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
