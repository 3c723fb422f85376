//! MCP Note Tool Handlers
//!
//! Maps the note tools onto Fastidious item calls. Pure request/response
//! shaping - the remote service owns validation, storage, and tree
//! invariants.

use crate::mcp::handlers::{expect_success, parse_items, parse_json, remote_error};
use crate::mcp::types::MCPError;
use crate::services::FastidiousClient;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Parameters for the create_note tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteParams {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub fields: Option<HashMap<String, String>>,
}

/// Parameters for the get_note tool
#[derive(Debug, Deserialize)]
pub struct GetNoteParams {
    pub id: String,
}

/// Parameters for the update_note tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteParams {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub fields: Option<HashMap<String, String>>,
}

/// Parameters for the delete_note tool
#[derive(Debug, Deserialize)]
pub struct DeleteNoteParams {
    pub id: String,
}

/// Parameters for the list_notes tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesParams {
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Parameters for the search_notes tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNotesParams {
    pub query: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Parameters for the move_note tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNoteParams {
    pub id: String,
    /// Omitted or null means move to the root
    #[serde(default)]
    pub target_parent_id: Option<String>,
}

/// Handle the create_note tool
///
/// Creates a text-typed item. Title and content are required; the optional
/// parent id places the note inside a collection.
pub async fn handle_create_note(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: CreateNoteParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let mut body = json!({
        "type": "text",
        "title": params.title,
        "content": params.content,
    });
    if let Some(parent_id) = params.parent_id {
        body["parentId"] = json!(parent_id);
    }
    if let Some(fields) = params.fields {
        body["fields"] = json!(fields);
    }

    let response = client
        .post("/api/items", &body)
        .await
        .map_err(|e| remote_error("create note", e))?;
    let response = expect_success("create note", response)?;

    parse_json("create note", response).await
}

/// Handle the get_note tool
pub async fn handle_get_note(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: GetNoteParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let response = client
        .get(&format!("/api/items/{}", params.id))
        .await
        .map_err(|e| remote_error("get note", e))?;
    let response = expect_success("get note", response)?;

    parse_json("get note", response).await
}

/// Handle the update_note tool
///
/// Partial update: only supplied fields are sent to the remote service.
pub async fn handle_update_note(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: UpdateNoteParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let mut body = json!({});
    if let Some(title) = params.title {
        body["title"] = json!(title);
    }
    if let Some(content) = params.content {
        body["content"] = json!(content);
    }
    if let Some(fields) = params.fields {
        body["fields"] = json!(fields);
    }

    let response = client
        .put(&format!("/api/items/{}", params.id), &body)
        .await
        .map_err(|e| remote_error("update note", e))?;
    let response = expect_success("update note", response)?;

    parse_json("update note", response).await
}

/// Handle the delete_note tool
pub async fn handle_delete_note(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: DeleteNoteParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let response = client
        .delete(&format!("/api/items/{}", params.id))
        .await
        .map_err(|e| remote_error("delete note", e))?;
    expect_success("delete note", response)?;

    Ok(json!({
        "success": true,
        "id": params.id
    }))
}

/// Handle the list_notes tool
///
/// Lists items, optionally under one parent, excluding collection-typed
/// items from the result.
pub async fn handle_list_notes(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: ListNotesParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let mut query = Vec::new();
    if let Some(parent_id) = params.parent_id {
        query.push(("parentId", parent_id));
    }

    let response = client
        .get_with_query("/api/items", &query)
        .await
        .map_err(|e| remote_error("list notes", e))?;
    let response = expect_success("list notes", response)?;

    let notes: Vec<_> = parse_items("list notes", response)
        .await?
        .into_iter()
        .filter(|item| !item.is_collection())
        .collect();

    Ok(json!({
        "notes": notes,
        "count": notes.len()
    }))
}

/// Handle the search_notes tool
///
/// Text search over items, optionally scoped to one parent; collection-typed
/// items are excluded from the result.
pub async fn handle_search_notes(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: SearchNotesParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let mut query = vec![("q", params.query)];
    if let Some(parent_id) = params.parent_id {
        query.push(("parentId", parent_id));
    }

    let response = client
        .get_with_query("/api/items", &query)
        .await
        .map_err(|e| remote_error("search notes", e))?;
    let response = expect_success("search notes", response)?;

    let notes: Vec<_> = parse_items("search notes", response)
        .await?
        .into_iter()
        .filter(|item| !item.is_collection())
        .collect();

    Ok(json!({
        "notes": notes,
        "count": notes.len()
    }))
}

/// Handle the move_note tool
///
/// Changes only the item's parent reference. A missing or null target parent
/// is sent as an explicit null, which the remote service treats as a move to
/// the root.
pub async fn handle_move_note(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let params: MoveNoteParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    // Serializes to "targetParentId": null when absent - never omitted
    let body = json!({ "targetParentId": params.target_parent_id });

    let response = client
        .post(&format!("/api/items/{}/move", params.id), &body)
        .await
        .map_err(|e| remote_error("move note", e))?;
    let response = expect_success("move note", response)?;

    parse_json("move note", response).await
}
