//! JSON-RPC 2.0 envelopes for the newline-delimited stdio transport.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

pub const JSONRPC_VERSION: &str = "2.0";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: String,
    /// `None` only when the member is absent (a notification); an explicit
    /// `null` id is `Some(Value::Null)` and still gets a reply.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl Request {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Result body of `tools/call`: a single text item.
pub fn text_content(text: &str) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": false,
    })
}

pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// `(name, type, description, required)`
    pub arguments: &'static [(&'static str, &'static str, &'static str, bool)],
}

impl ToolDefinition {
    pub fn to_json(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for (name, kind, description, is_required) in self.arguments {
            properties.insert(
                (*name).to_string(),
                json!({ "type": kind, "description": description }),
            );
            if *is_required {
                required.push(*name);
            }
        }
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        })
    }
}

pub const TOOLS: &[ToolDefinition] = &[
    ToolDefinition {
        name: "repo_setup",
        description: "Create a new website project: clone the template, create a GitHub repository and push the code.",
        arguments: &[
            ("project_name", "string", "Name of the project and repository", true),
            ("description", "string", "Repository description", false),
            ("deploy_to_amplify", "boolean", "Request deployment after publishing", false),
        ],
    },
    ToolDefinition {
        name: "create_file",
        description: "Create a file with the given content, creating its directory if needed.",
        arguments: &[
            ("file_name", "string", "Name of the file to create", true),
            ("file_path", "string", "Directory the file is created in", true),
            ("content", "string", "File content", true),
        ],
    },
    ToolDefinition {
        name: "push_changes",
        description: "Commit and push all changes in a previously set up project.",
        arguments: &[("project_name", "string", "Name of the project", true)],
    },
    ToolDefinition {
        name: "read_file",
        description: "Read a UTF-8 text file.",
        arguments: &[("file_path", "string", "Path of the file to read", true)],
    },
    ToolDefinition {
        name: "list_files",
        description: "List the entries of a directory.",
        arguments: &[("directory_path", "string", "Directory to list", true)],
    },
    ToolDefinition {
        name: "update_file",
        description: "Replace the content of an existing file.",
        arguments: &[
            ("file_path", "string", "Path of the file to update", true),
            ("new_content", "string", "New file content", true),
        ],
    },
];
