//! MCP Collection Tool Handlers
//!
//! Collection management on top of the same Fastidious item calls. Collections
//! are items with `type = "collection"`; nesting them via the parent reference
//! forms a tree whose invariants (cycles, depth) the remote service enforces.

use crate::mcp::handlers::{expect_success, parse_items, parse_json, remote_error};
use crate::mcp::types::MCPError;
use crate::models::{FieldDefinition, SortDirection, ViewMode};
use crate::services::FastidiousClient;
use serde::Deserialize;
use serde_json::{json, Value};

/// Display fields applied when create_collection does not supply any
pub const DEFAULT_DISPLAY_FIELDS: [&str; 3] = ["title", "type", "createdAt"];

/// Sort field applied when create_collection does not supply one
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Parameters for the create_collection tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionParams {
    pub title: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub field_definitions: Option<Vec<FieldDefinition>>,
    #[serde(default)]
    pub display_fields: Option<Vec<String>>,
    #[serde(default)]
    pub view_mode: Option<ViewMode>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_direction: Option<SortDirection>,
}

/// Parameters for the update_collection tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollectionParams {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub field_definitions: Option<Vec<FieldDefinition>>,
    #[serde(default)]
    pub display_fields: Option<Vec<String>>,
    #[serde(default)]
    pub view_mode: Option<ViewMode>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_direction: Option<SortDirection>,
}

/// Parameters for the get_collection tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCollectionParams {
    pub id: String,
    #[serde(default)]
    pub include_children: bool,
}

/// Parameters for the list_collections tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCollectionsParams {
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Handle the create_collection tool
///
/// Creates a collection-typed item. View settings fall back to the service
/// defaults when not supplied: displayFields [title, type, createdAt],
/// grid view, sorted by createdAt descending.
pub async fn handle_create_collection(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: CreateCollectionParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    // Defaults are authoritative here, not client hints
    let display_fields = params
        .display_fields
        .unwrap_or_else(|| DEFAULT_DISPLAY_FIELDS.iter().map(|s| s.to_string()).collect());
    let view_mode = params.view_mode.unwrap_or(ViewMode::Grid);
    let sort_field = params
        .sort_field
        .unwrap_or_else(|| DEFAULT_SORT_FIELD.to_string());
    let sort_direction = params.sort_direction.unwrap_or(SortDirection::Desc);

    let mut body = json!({
        "type": "collection",
        "title": params.title,
        "displayFields": display_fields,
        "viewMode": view_mode,
        "sortField": sort_field,
        "sortDirection": sort_direction,
    });
    if let Some(parent_id) = params.parent_id {
        body["parentId"] = json!(parent_id);
    }
    if let Some(field_definitions) = params.field_definitions {
        body["fieldDefinitions"] = json!(field_definitions);
    }

    let response = client
        .post("/api/items", &body)
        .await
        .map_err(|e| remote_error("create collection", e))?;
    let response = expect_success("create collection", response)?;

    parse_json("create collection", response).await
}

/// Handle the update_collection tool
///
/// Partial update of title, field schema, and view settings; only supplied
/// fields are sent.
pub async fn handle_update_collection(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: UpdateCollectionParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let mut body = json!({});
    if let Some(title) = params.title {
        body["title"] = json!(title);
    }
    if let Some(field_definitions) = params.field_definitions {
        body["fieldDefinitions"] = json!(field_definitions);
    }
    if let Some(display_fields) = params.display_fields {
        body["displayFields"] = json!(display_fields);
    }
    if let Some(view_mode) = params.view_mode {
        body["viewMode"] = json!(view_mode);
    }
    if let Some(sort_field) = params.sort_field {
        body["sortField"] = json!(sort_field);
    }
    if let Some(sort_direction) = params.sort_direction {
        body["sortDirection"] = json!(sort_direction);
    }

    let response = client
        .put(&format!("/api/items/{}", params.id), &body)
        .await
        .map_err(|e| remote_error("update collection", e))?;
    let response = expect_success("update collection", response)?;

    parse_json("update collection", response).await
}

/// Handle the get_collection tool
///
/// Fetches one collection; with `includeChildren` the items under it are
/// fetched as well and the result becomes `{collection, children}`.
pub async fn handle_get_collection(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: GetCollectionParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let response = client
        .get(&format!("/api/items/{}", params.id))
        .await
        .map_err(|e| remote_error("get collection", e))?;
    let response = expect_success("get collection", response)?;
    let collection = parse_json("get collection", response).await?;

    if !params.include_children {
        return Ok(json!({ "collection": collection }));
    }

    let response = client
        .get_with_query("/api/items", &[("parentId", params.id)])
        .await
        .map_err(|e| remote_error("get collection children", e))?;
    let response = expect_success("get collection children", response)?;
    let children = parse_items("get collection children", response).await?;

    Ok(json!({
        "collection": collection,
        "children": children
    }))
}

/// Handle the list_collections tool
///
/// Lists items, optionally under one parent, keeping only collection-typed
/// items.
pub async fn handle_list_collections(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: ListCollectionsParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let mut query = Vec::new();
    if let Some(parent_id) = params.parent_id {
        query.push(("parentId", parent_id));
    }

    let response = client
        .get_with_query("/api/items", &query)
        .await
        .map_err(|e| remote_error("list collections", e))?;
    let response = expect_success("list collections", response)?;

    let collections: Vec<_> = parse_items("list collections", response)
        .await?
        .into_iter()
        .filter(|item| item.is_collection())
        .collect();

    Ok(json!({
        "collections": collections,
        "count": collections.len()
    }))
}
