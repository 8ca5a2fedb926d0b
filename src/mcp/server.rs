use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use super::protocol::{
    text_content, Request, Response, RpcError, DEFAULT_PROTOCOL_VERSION, INVALID_REQUEST,
    JSONRPC_VERSION, PARSE_ERROR, TOOLS,
};
use crate::tools::WebsiteGenerator;

pub const SERVER_NAME: &str = "website-generator";

/// Dispatches JSON-RPC requests onto the tool surface.
#[derive(Clone)]
pub struct ToolServer {
    tools: Arc<WebsiteGenerator>,
}

impl ToolServer {
    pub fn new(tools: Arc<WebsiteGenerator>) -> Self {
        Self { tools }
    }

    /// Handle one line of input. Notifications produce no reply.
    pub async fn handle_message(&self, line: &str) -> Option<String> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Discarding malformed message");
                return encode(Response::failure(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {e}")),
                ));
            }
        };
        let request: Request = match serde_json::from_value(raw) {
            Ok(request) => request,
            Err(e) => {
                return encode(Response::failure(
                    Value::Null,
                    RpcError::new(INVALID_REQUEST, format!("Invalid request: {e}")),
                ));
            }
        };
        if request.jsonrpc != JSONRPC_VERSION {
            warn!(version = %request.jsonrpc, method = %request.method, "Rejecting request with unsupported jsonrpc version");
            let id = request.id?;
            return encode(Response::failure(
                id,
                RpcError::new(
                    INVALID_REQUEST,
                    format!("Unsupported jsonrpc version: '{}'", request.jsonrpc),
                ),
            ));
        }

        let outcome = self.dispatch(&request).await;
        let id = request.id?;
        encode(match outcome {
            Ok(result) => Response::success(id, result),
            Err(error) => Response::failure(id, error),
        })
    }

    async fn dispatch(&self, request: &Request) -> Result<Value, RpcError> {
        let params = request.params.clone().unwrap_or(Value::Null);
        match request.method.as_str() {
            "initialize" => Ok(initialize_result(&params)),
            "notifications/initialized" => Ok(Value::Null),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({
                "tools": TOOLS.iter().map(|tool| tool.to_json()).collect::<Vec<_>>(),
            })),
            "tools/call" => self.call_tool(&params).await,
            other => Err(RpcError::method_not_found(other)),
        }
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, RpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("Missing tool name"))?;
        let empty = json!({});
        let args = params.get("arguments").unwrap_or(&empty);
        info!(tool = name, "Tool called");

        let text = match name {
            "repo_setup" => {
                self.tools
                    .repo_setup(
                        required(args, "project_name")?,
                        optional(args, "description")?.unwrap_or(""),
                        flag(args, "deploy_to_amplify")?,
                    )
                    .await
            }
            "create_file" => {
                self.tools
                    .create_file(
                        required(args, "file_name")?,
                        required(args, "file_path")?,
                        required(args, "content")?,
                    )
                    .await
            }
            "push_changes" => self.tools.push_changes(required(args, "project_name")?).await,
            "read_file" => self.tools.read_file(required(args, "file_path")?).await,
            "list_files" => self.tools.list_files(required(args, "directory_path")?).await,
            "update_file" => {
                self.tools
                    .update_file(required(args, "file_path")?, required(args, "new_content")?)
                    .await
            }
            other => return Err(RpcError::invalid_params(format!("Unknown tool: {other}"))),
        };
        Ok(text_content(&text))
    }

    /// Serve newline-delimited requests until `reader` reaches end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(reply) = self.handle_message(&line).await {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        info!("Input closed, stopping tool server");
        Ok(())
    }

    pub async fn serve_stdio(&self) -> Result<()> {
        info!(server = SERVER_NAME, "Serving tools over stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}

fn initialize_result(params: &Value) -> Value {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    json!({
        "protocolVersion": protocol_version,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

fn encode(response: Response) -> Option<String> {
    match serde_json::to_string(&response) {
        Ok(line) => Some(line),
        Err(e) => {
            warn!(error = %e, "Failed to encode response");
            None
        }
    }
}

fn optional<'a>(args: &'a Value, key: &str) -> Result<Option<&'a str>, RpcError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(RpcError::invalid_params(format!("Argument '{key}' must be a string"))),
    }
}

fn required<'a>(args: &'a Value, key: &str) -> Result<&'a str, RpcError> {
    optional(args, key)?
        .ok_or_else(|| RpcError::invalid_params(format!("Missing required argument '{key}'")))
}

fn flag(args: &Value, key: &str) -> Result<bool, RpcError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(RpcError::invalid_params(format!("Argument '{key}' must be a boolean"))),
    }
}
