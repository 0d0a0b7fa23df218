//! Transport layer over the rmcp SDK
//!
//! A `TransportHandle` is one live RPC channel to a server process. The stdio
//! implementation spawns the server as a child process and speaks MCP over
//! its stdin/stdout; `TransportFactory` is the seam test doubles plug into.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

#[cfg(windows)]
#[allow(unused_imports)] // Trait is used via method call in closure
use std::os::windows::process::CommandExt;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
    ReadResourceRequestParams, Tool,
};
use rmcp::service::RunningService;
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use rmcp::{ClientHandler, RoleClient, ServiceExt};
use serde_json::Value;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use mcphub_core::{HubError, ServerDescriptor};

use crate::launch::LaunchPlan;

/// Default handshake timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Type alias for a connected MCP client
pub type McpClient = RunningService<RoleClient, HubClientHandler>;

/// Client handler presented to backend servers during the handshake
#[derive(Clone)]
pub struct HubClientHandler {
    info: ClientInfo,
}

impl HubClientHandler {
    pub fn new(identifier: &str) -> Self {
        Self {
            info: ClientInfo {
                protocol_version: Default::default(),
                capabilities: ClientCapabilities::default(),
                client_info: Implementation {
                    name: format!("mcphub-{}", identifier),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    title: Some("McpHub Gateway".to_string()),
                    ..Default::default()
                },
                meta: None,
            },
        }
    }
}

impl ClientHandler for HubClientHandler {
    fn get_info(&self) -> ClientInfo {
        self.info.clone()
    }
}

/// One live RPC channel to a managed server.
///
/// Implementations must make `close` idempotent: a second close is a no-op,
/// never a double teardown of the underlying channel.
#[async_trait]
pub trait TransportHandle: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<Tool>>;
    async fn call_tool(&self, name: &str, arguments: Option<Value>) -> Result<CallToolResult>;
    async fn list_resources(&self) -> Result<Vec<Value>>;
    async fn read_resource(&self, uri: &str) -> Result<Vec<Value>>;
    async fn close(&self) -> Result<()>;
}

/// Spawns and handshakes a transport for one connection attempt.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn open(
        &self,
        descriptor: &ServerDescriptor,
        plan: &LaunchPlan,
    ) -> Result<Arc<dyn TransportHandle>, HubError>;
}

/// Handle over an rmcp client session to a child process.
pub struct StdioHandle {
    identifier: String,
    // Taken out on close; requests against a closed handle fail cleanly.
    client: Mutex<Option<McpClient>>,
}

impl StdioHandle {
    pub fn new(identifier: String, client: McpClient) -> Self {
        Self {
            identifier,
            client: Mutex::new(Some(client)),
        }
    }
}

#[async_trait]
impl TransportHandle for StdioHandle {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| anyhow!("transport already closed"))?;
        let tools = client
            .list_all_tools()
            .await
            .context("Failed to list tools")?;
        Ok(tools)
    }

    async fn call_tool(&self, name: &str, arguments: Option<Value>) -> Result<CallToolResult> {
        debug!(server_id = %self.identifier, tool = %name, "Calling tool");

        let args = arguments.and_then(|v| v.as_object().cloned());

        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| anyhow!("transport already closed"))?;
        let result = client
            .peer()
            .call_tool(CallToolRequestParams {
                name: name.to_string().into(),
                arguments: args,
                task: None,
                meta: None,
            })
            .await
            .context("Tool call failed")?;
        Ok(result)
    }

    async fn list_resources(&self) -> Result<Vec<Value>> {
        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| anyhow!("transport already closed"))?;
        let resources = client
            .list_all_resources()
            .await
            .context("Failed to list resources")?;
        Ok(resources
            .into_iter()
            .map(|r| serde_json::to_value(r).unwrap_or(Value::Null))
            .collect())
    }

    async fn read_resource(&self, uri: &str) -> Result<Vec<Value>> {
        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| anyhow!("transport already closed"))?;
        let result = client
            .peer()
            .read_resource(ReadResourceRequestParams {
                uri: uri.into(),
                meta: None,
            })
            .await
            .context("Failed to read resource")?;
        Ok(result
            .contents
            .into_iter()
            .map(|c| serde_json::to_value(c).unwrap_or(Value::Null))
            .collect())
    }

    async fn close(&self) -> Result<()> {
        let client = self.client.lock().await.take();
        if let Some(client) = client {
            info!(server_id = %self.identifier, "Disconnecting from MCP server");
            client.cancel().await.context("Failed to cancel service")?;
        }
        Ok(())
    }
}

/// Production factory: child process over stdin/stdout.
pub struct StdioTransportFactory {
    connect_timeout: Duration,
}

impl StdioTransportFactory {
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_timeout(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for StdioTransportFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransportFactory for StdioTransportFactory {
    async fn open(
        &self,
        descriptor: &ServerDescriptor,
        plan: &LaunchPlan,
    ) -> Result<Arc<dyn TransportHandle>, HubError> {
        let identifier = &descriptor.identifier;

        info!(
            server_id = %identifier,
            command = %plan.command,
            args = ?plan.args,
            "Connecting to stdio MCP server"
        );

        // Resolve the command up front for a crisp not-found error instead of
        // a spawn failure.
        let command_path = which::which(&plan.command)
            .or_else(|_| which::which(format!("{}.exe", &plan.command)))
            .map_err(|_| HubError::ScriptNotFound {
                command: plan.command.clone(),
            })?;

        debug!(server_id = %identifier, path = ?command_path, "Found command");

        let args = plan.args.clone();
        let env = plan.env.clone();

        // kill_on_drop ties the child's lifetime to the transport: a failed
        // or timed-out handshake drops the transport and reaps the process.
        let transport = TokioChildProcess::new(Command::new(&command_path).configure(move |cmd| {
            cmd.args(&args)
                .envs(&env)
                .stderr(Stdio::null())
                .kill_on_drop(true);

            // New process group so terminal signals (SIGINT, SIGTSTP) sent to
            // the gateway don't propagate to server children.
            #[cfg(unix)]
            {
                cmd.process_group(0);
            }
            #[cfg(windows)]
            {
                const CREATE_NO_WINDOW: u32 = 0x08000000;
                cmd.creation_flags(CREATE_NO_WINDOW);
            }
        }))
        .map_err(|e| {
            error!(server_id = %identifier, error = %e, "Failed to spawn process");
            HubError::ConnectionFailed {
                identifier: identifier.clone(),
                cause: anyhow!(e).context("Failed to spawn process"),
            }
        })?;

        let handler = HubClientHandler::new(identifier);
        let connect = handler.serve(transport);
        let client = match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(client)) => client,
            Ok(Err(e)) => {
                error!(server_id = %identifier, error = %e, "MCP handshake failed");
                return Err(HubError::ConnectionFailed {
                    identifier: identifier.clone(),
                    cause: anyhow!(e).context("MCP handshake failed"),
                });
            }
            Err(_) => {
                error!(server_id = %identifier, timeout = ?self.connect_timeout, "Connection timeout");
                return Err(HubError::ConnectionFailed {
                    identifier: identifier.clone(),
                    cause: anyhow!("Connection timeout ({:?})", self.connect_timeout),
                });
            }
        };

        info!(server_id = %identifier, "stdio server connected");

        Ok(Arc::new(StdioHandle::new(identifier.clone(), client)))
    }
}
