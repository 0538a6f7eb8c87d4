//! MCP Server handler for Microsoft Graph.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::entities;
use crate::mcp::{CountParams, DeleteParams, GetParams, ListParams};
use crate::{GraphError, GraphServiceClient};

/// Microsoft Graph MCP Server.
///
/// Implements the MCP ServerHandler trait, providing tools to read and
/// delete directory, drive and calendar entities.
///
/// # Tools
///
/// - `get` - Fetch a single entity by id
/// - `list` - List one page of entities with OData query options
/// - `count` - Count entities with `$count`
/// - `delete` - Delete an entity
///
/// # Example
///
/// ```no_run
/// use graphapi::mcp::GraphServer;
///
/// # fn main() -> graphapi::Result<()> {
/// let server = GraphServer::from_env()?;
/// // Server can now be used with rmcp transport
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GraphServer {
    client: Arc<GraphServiceClient>,
}

impl GraphServer {
    /// Create a new GraphServer from environment variables.
    ///
    /// Uses `GRAPH_ACCESS_TOKEN` for authentication and optionally
    /// `GRAPH_BASE_URL` for the service root.
    ///
    /// # Errors
    ///
    /// Returns an error if `GRAPH_ACCESS_TOKEN` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let client = GraphServiceClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Create a new GraphServer with an existing client.
    pub fn new(client: GraphServiceClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Convert GraphError to McpError.
    fn to_mcp_error(err: GraphError) -> McpError {
        if err.status_code() == Some(404) {
            return McpError::resource_not_found(err.to_string(), None);
        }
        match &err {
            GraphError::InvalidRequest(msg) | GraphError::ConfigMissing(msg) => {
                McpError::invalid_params(msg.clone(), None)
            }
            GraphError::MissingPathParameter { .. } => McpError::invalid_params(err.to_string(), None),
            _ if err.status_code() == Some(400) => McpError::invalid_params(err.to_string(), None),
            _ => McpError::internal_error(err.to_string(), None),
        }
    }

    fn json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Handle the `get` tool.
    ///
    /// Returns the entity as pretty-printed JSON, or `null` when the service
    /// answers without a body.
    pub async fn handle_get(&self, params: GetParams) -> Result<CallToolResult, McpError> {
        let entity = entities::get_entity(
            &self.client,
            params.entity,
            &params.id,
            &params.parent(),
            params.query(),
        )
        .await
        .map_err(Self::to_mcp_error)?;
        Self::json(&entity)
    }

    /// Handle the `list` tool.
    pub async fn handle_list(&self, params: ListParams) -> Result<CallToolResult, McpError> {
        let page = entities::list_entities(
            &self.client,
            params.entity,
            &params.parent(),
            params.query(),
        )
        .await
        .map_err(Self::to_mcp_error)?;
        Self::json(&page)
    }

    /// Handle the `count` tool.
    pub async fn handle_count(&self, params: CountParams) -> Result<CallToolResult, McpError> {
        let count = entities::count_entities(
            &self.client,
            params.entity,
            &params.parent(),
            params.query(),
        )
        .await
        .map_err(Self::to_mcp_error)?;
        Self::json(&serde_json::json!({ "entity": params.entity, "count": count }))
    }

    /// Handle the `delete` tool.
    pub async fn handle_delete(&self, params: DeleteParams) -> Result<CallToolResult, McpError> {
        entities::delete_entity(&self.client, params.entity, &params.id, &params.parent())
            .await
            .map_err(Self::to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Deleted {} '{}'",
            params.entity.as_str(),
            params.id
        ))]))
    }
}

impl ServerHandler for GraphServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "graphapi".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Microsoft Graph MCP Server - Query groups, users, drives, and calendar events."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "get",
                "Fetch a single Graph entity by id. \
                 Supports: group, user (id or userPrincipalName), drive, event. \
                 Events need the owning group or user.",
                Self::schema::<GetParams>(),
            ),
            Tool::new(
                "list",
                "List one page of Graph entities. \
                 Accepts OData options: top, skip, filter, select, orderby, search. \
                 Events need the owning group or user.",
                Self::schema::<ListParams>(),
            ),
            Tool::new(
                "count",
                "Count Graph entities, optionally narrowed by filter or search. \
                 Drives cannot be counted.",
                Self::schema::<CountParams>(),
            ),
            Tool::new(
                "delete",
                "Delete a Graph entity. This cannot be undone.",
                Self::schema::<DeleteParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        match request.name.as_ref() {
            "get" => {
                let params: GetParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_get(params).await
            }
            "list" => {
                let params: ListParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_list(params).await
            }
            "count" => {
                let params: CountParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_count(params).await
            }
            "delete" => {
                let params: DeleteParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_delete(params).await
            }
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}
