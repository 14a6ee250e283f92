//! MCP server lifecycle and request handling.
//!
//! The server walks the standard MCP lifecycle: capability negotiation via
//! `initialize`, normal operation once `notifications/initialized` arrives,
//! then shutdown on EOF or a termination signal. Requests are handled one
//! at a time, fully, before the next line is read.
//!
//! Tool calls are delegated to the [`ToolRegistry`]; any tool-layer failure
//! comes back as an error envelope inside a successful JSON-RPC response,
//! so nothing a handler does can produce a protocol-level fault.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::mcp::rpc::{
    ErrorResponse, Message, MessageId, Notification, Request, Response, PROTOCOL_VERSION,
};
use crate::mcp::transport::{LineTransport, StdioTransport};
use crate::tools::{ToolDescriptor, ToolRegistry};

/// Server name advertised during capability negotiation.
pub const SERVER_NAME: &str = "presentations-mcp";

/// Server state in the MCP lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Waiting for the initialize request.
    AwaitingInit,
    /// Initialize received, waiting for the initialized notification.
    Initialising,
    /// Ready for normal operation.
    Running,
    /// Shutdown in progress.
    ShuttingDown,
}

/// Capabilities advertised during initialisation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    pub tools: ToolCapabilities,
}

/// Tool-specific capabilities.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolCapabilities {
    /// The catalog is fixed at startup, so the list never changes.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Client information received during initialisation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    /// Client name.
    pub name: String,
    /// Client version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Parameters of the initialize request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version requested by the client.
    pub protocol_version: String,
    /// Client capabilities (unused by this server).
    #[serde(default)]
    pub capabilities: Value,
    /// Client information.
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// Wire form of one tool in the tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolListing {
    name: String,
    description: String,
    input_schema: Value,
}

impl From<&ToolDescriptor> for ToolListing {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            name: descriptor.name().to_string(),
            description: descriptor.description().to_string(),
            input_schema: descriptor.schema().to_json(),
        }
    }
}

/// Parameters of the tools/call request.
#[derive(Debug, Clone, Deserialize)]
struct ToolCallParams {
    /// Name of the tool to call.
    name: String,
    /// Arguments for the tool; absent arguments validate as an empty object.
    #[serde(default)]
    arguments: Value,
}

/// The MCP server, generic over its transport endpoints.
pub struct McpServer<R, W> {
    state: ServerState,
    transport: LineTransport<R, W>,
    registry: ToolRegistry,
    protocol_version: Option<String>,
}

impl McpServer<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Creates a server over stdio with the given tool registry.
    #[must_use]
    pub fn stdio(registry: ToolRegistry) -> Self {
        Self::new(StdioTransport::stdio(), registry)
    }
}

impl<R, W> McpServer<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a server over an arbitrary transport.
    #[must_use]
    pub const fn new(transport: LineTransport<R, W>, registry: ToolRegistry) -> Self {
        Self {
            state: ServerState::AwaitingInit,
            transport,
            registry,
            protocol_version: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Protocol version agreed during initialisation, if any.
    #[must_use]
    pub fn negotiated_version(&self) -> Option<&str> {
        self.protocol_version.as_deref()
    }

    /// Runs the server main loop until EOF or a termination signal.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.run_with_shutdown().await
    }

    #[cfg(unix)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).map_err(std::io::Error::other)?;
        let mut sigterm = signal(SignalKind::terminate()).map_err(std::io::Error::other)?;

        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT, shutting down");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, shutting down");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    #[cfg(windows)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    tracing::info!("Received Ctrl+C, shutting down");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handles one read result; returns `true` when the server should stop.
    async fn handle_transport_result(
        &mut self,
        line_result: std::io::Result<Option<String>>,
    ) -> std::io::Result<bool> {
        let Some(line) = line_result? else {
            tracing::info!("Client closed the connection, shutting down");
            self.state = ServerState::ShuttingDown;
            return Ok(true);
        };

        if line.trim().is_empty() {
            return Ok(false);
        }

        self.handle_line(&line).await?;

        Ok(self.state == ServerState::ShuttingDown)
    }

    /// Parses and handles a single line of input.
    async fn handle_line(&mut self, line: &str) -> std::io::Result<()> {
        match Message::parse(line) {
            Ok(Message::Request(request)) => self.handle_request(request).await,
            Ok(Message::Notification(notification)) => {
                self.handle_notification(&notification);
                Ok(())
            }
            Err(error) => self.transport.send(&error).await,
        }
    }

    /// Dispatches a request to its method handler and sends the reply.
    async fn handle_request(&mut self, request: Request) -> std::io::Result<()> {
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request),
            "tools/list" => self.handle_tools_list(&request),
            "tools/call" => self.handle_tools_call(&request),
            "ping" => Ok(Response::new(request.id.clone(), json!({}))),
            _ => Err(ErrorResponse::method_not_found(
                request.id.clone(),
                &request.method,
            )),
        };

        match response {
            Ok(response) => self.transport.send(&response).await,
            Err(error) => self.transport.send(&error).await,
        }
    }

    /// Handles an incoming notification.
    fn handle_notification(&mut self, notification: &Notification) {
        if notification.method == "notifications/initialized"
            && self.state == ServerState::Initialising
        {
            tracing::debug!("Initialisation complete");
            self.state = ServerState::Running;
        }
    }

    /// Handles the initialize request.
    fn handle_initialize(&mut self, request: &Request) -> Result<Response, ErrorResponse> {
        if self.state != ServerState::AwaitingInit {
            return Err(ErrorResponse::invalid_request(Some(request.id.clone())));
        }

        let params: InitializeParams = parse_params(request)?;

        if let Some(client) = &params.client_info {
            tracing::info!(
                client = %client.name,
                version = client.version.as_deref().unwrap_or("unknown"),
                "Client connected"
            );
        }

        self.protocol_version = Some(PROTOCOL_VERSION.to_string());
        self.state = ServerState::Initialising;

        let result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": ServerCapabilities::default(),
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        });

        Ok(Response::new(request.id.clone(), result))
    }

    /// Handles the tools/list request.
    fn handle_tools_list(&self, request: &Request) -> Result<Response, ErrorResponse> {
        self.require_running(&request.id)?;

        let tools: Vec<ToolListing> = self.registry.list().map(ToolListing::from).collect();

        Ok(Response::new(request.id.clone(), json!({ "tools": tools })))
    }

    /// Handles the tools/call request.
    fn handle_tools_call(&self, request: &Request) -> Result<Response, ErrorResponse> {
        self.require_running(&request.id)?;

        let params: ToolCallParams = parse_params(request)?;

        tracing::debug!(tool = %params.name, "Dispatching tool call");
        let result = self.registry.call(&params.name, &params.arguments);

        let result_value = serde_json::to_value(&result).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialise tool call result");
            ErrorResponse::internal_error(
                request.id.clone(),
                "Internal error: failed to serialise result",
            )
        })?;

        Ok(Response::new(request.id.clone(), result_value))
    }

    /// Ensures initialisation has completed.
    fn require_running(&self, id: &MessageId) -> Result<(), ErrorResponse> {
        if self.state == ServerState::Running {
            Ok(())
        } else {
            Err(ErrorResponse::invalid_request(Some(id.clone())))
        }
    }
}

/// Deserialises request params, mapping absence and mismatch to
/// invalid-params errors.
fn parse_params<T: for<'de> Deserialize<'de>>(request: &Request) -> Result<T, ErrorResponse> {
    request
        .params
        .as_ref()
        .map(|p| serde_json::from_value(p.clone()))
        .transpose()
        .map_err(|e| {
            ErrorResponse::invalid_params(request.id.clone(), format!("Invalid params: {e}"))
        })?
        .ok_or_else(|| ErrorResponse::invalid_params(request.id.clone(), "Missing params"))
}
