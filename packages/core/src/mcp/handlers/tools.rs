//! MCP Tools Handler
//!
//! Implements the MCP tools/list and tools/call methods: the declarative
//! catalog of Fastidious tools and the dispatcher routing an invocation to
//! its handler.
//!
//! # Error Shaping
//!
//! Per the MCP spec, tool execution failures are returned as successful
//! responses carrying `isError: true` - only protocol-level failures (an
//! unregistered tool name, a missing `name` parameter) become JSON-RPC
//! errors.

use crate::mcp::handlers::{collections, notes};
use crate::mcp::types::MCPError;
use crate::services::FastidiousClient;
use serde_json::{json, Value};

/// Handle the tools/list MCP request
///
/// Returns the full tool catalog. This is called after initialize to
/// discover what the server provides.
pub fn handle_tools_list(_params: Value) -> Result<Value, MCPError> {
    Ok(json!({
        "tools": tool_catalog()
    }))
}

/// Handle the tools/call MCP request
///
/// Executes a tool by name with the provided arguments and shapes the result
/// into the MCP content envelope.
///
/// # Errors
///
/// An unregistered tool name fails with a method-not-found error regardless
/// of arguments. All other failures (malformed arguments, remote rejections)
/// are reported inside the envelope with `isError: true`.
pub async fn handle_tools_call(
    client: &FastidiousClient,
    params: Value,
) -> Result<Value, MCPError> {
    let tool_name = params["name"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing 'name' parameter".to_string()))?;

    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

    let result = match tool_name {
        // Notes
        "create_note" => notes::handle_create_note(client, arguments).await,
        "get_note" => notes::handle_get_note(client, arguments).await,
        "update_note" => notes::handle_update_note(client, arguments).await,
        "delete_note" => notes::handle_delete_note(client, arguments).await,
        "list_notes" => notes::handle_list_notes(client, arguments).await,
        "search_notes" => notes::handle_search_notes(client, arguments).await,
        "move_note" => notes::handle_move_note(client, arguments).await,

        // Collections
        "create_collection" => collections::handle_create_collection(client, arguments).await,
        "update_collection" => collections::handle_update_collection(client, arguments).await,
        "get_collection" => collections::handle_get_collection(client, arguments).await,
        "list_collections" => collections::handle_list_collections(client, arguments).await,

        _ => return Err(MCPError::method_not_found(tool_name)),
    };

    match result {
        Ok(data) => {
            let text = serde_json::to_string_pretty(&data).map_err(|e| {
                MCPError::internal_error(format!("JSON serialization failed: {}", e))
            })?;

            Ok(json!({
                "content": [{
                    "type": "text",
                    "text": text
                }],
                "isError": false
            }))
        }
        Err(e) => Ok(json!({
            "content": [{
                "type": "text",
                "text": e.message
            }],
            "isError": true
        })),
    }
}

/// The declarative tool catalog exposed by tools/list
///
/// Schemas are maintained by hand to keep descriptions readable to the
/// calling model and to control exactly what the API surface admits.
pub fn tool_catalog() -> Value {
    json!([
        {
            "name": "create_note",
            "description": "Create a new note with Markdown content, optionally inside a collection",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Note title"
                    },
                    "content": {
                        "type": "string",
                        "description": "Note body in Markdown"
                    },
                    "parentId": {
                        "type": "string",
                        "description": "Collection to create the note in; omit for the root"
                    },
                    "fields": {
                        "type": "object",
                        "description": "Custom field values keyed by field name, per the parent collection's schema",
                        "additionalProperties": {"type": "string"}
                    }
                },
                "required": ["title", "content"]
            }
        },
        {
            "name": "get_note",
            "description": "Fetch a note by id, including its full content",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Note id"
                    }
                },
                "required": ["id"]
            }
        },
        {
            "name": "update_note",
            "description": "Update a note's title, content, or custom fields; only supplied fields change",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Note id"
                    },
                    "title": {"type": "string"},
                    "content": {
                        "type": "string",
                        "description": "Replacement Markdown body"
                    },
                    "fields": {
                        "type": "object",
                        "additionalProperties": {"type": "string"}
                    }
                },
                "required": ["id"]
            }
        },
        {
            "name": "delete_note",
            "description": "Delete a note by id",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Note id"
                    }
                },
                "required": ["id"]
            }
        },
        {
            "name": "list_notes",
            "description": "List notes, optionally those inside one collection; collections themselves are not included",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "parentId": {
                        "type": "string",
                        "description": "Only list notes under this collection"
                    }
                }
            }
        },
        {
            "name": "search_notes",
            "description": "Search notes by text, optionally within one collection",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search text"
                    },
                    "parentId": {
                        "type": "string",
                        "description": "Restrict the search to this collection"
                    }
                },
                "required": ["query"]
            }
        },
        {
            "name": "create_collection",
            "description": "Create a collection. Defaults: displayFields [title, type, createdAt], grid view, sorted by createdAt descending",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Collection title"
                    },
                    "parentId": {
                        "type": "string",
                        "description": "Parent collection for nesting; omit for the root"
                    },
                    "fieldDefinitions": {
                        "type": "array",
                        "description": "Custom field schema for notes in this collection",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": {"type": "string"},
                                "type": {
                                    "type": "string",
                                    "enum": ["text", "number", "checkbox", "select"]
                                },
                                "options": {
                                    "type": "array",
                                    "description": "Choices for select-typed fields",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "id": {"type": "string"},
                                            "value": {"type": "string"},
                                            "color": {"type": "string"}
                                        },
                                        "required": ["id", "value"]
                                    }
                                },
                                "required": {"type": "boolean"},
                                "description": {"type": "string"}
                            },
                            "required": ["name", "type"]
                        }
                    },
                    "displayFields": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Field names shown in list views"
                    },
                    "viewMode": {
                        "type": "string",
                        "enum": ["grid", "list"]
                    },
                    "sortField": {"type": "string"},
                    "sortDirection": {
                        "type": "string",
                        "enum": ["asc", "desc"]
                    }
                },
                "required": ["title"]
            }
        },
        {
            "name": "update_collection",
            "description": "Update a collection's title, field schema, or view settings; only supplied fields change",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Collection id"
                    },
                    "title": {"type": "string"},
                    "fieldDefinitions": {
                        "type": "array",
                        "items": {"type": "object"}
                    },
                    "displayFields": {
                        "type": "array",
                        "items": {"type": "string"}
                    },
                    "viewMode": {
                        "type": "string",
                        "enum": ["grid", "list"]
                    },
                    "sortField": {"type": "string"},
                    "sortDirection": {
                        "type": "string",
                        "enum": ["asc", "desc"]
                    }
                },
                "required": ["id"]
            }
        },
        {
            "name": "get_collection",
            "description": "Fetch a collection by id, optionally with the items it contains",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Collection id"
                    },
                    "includeChildren": {
                        "type": "boolean",
                        "description": "Also return the items under this collection",
                        "default": false
                    }
                },
                "required": ["id"]
            }
        },
        {
            "name": "list_collections",
            "description": "List collections, optionally those nested under one parent collection",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "parentId": {
                        "type": "string",
                        "description": "Only list collections under this parent"
                    }
                }
            }
        },
        {
            "name": "move_note",
            "description": "Move a note or collection to another collection, or to the root when targetParentId is omitted or null",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Item id to move"
                    },
                    "targetParentId": {
                        "type": ["string", "null"],
                        "description": "Destination collection; null or omitted moves the item to the root"
                    }
                },
                "required": ["id"]
            }
        }
    ])
}

// Include tests
#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;
