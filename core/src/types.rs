//! Domain DTOs for the todo API.
//!
//! # Design
//! Field names follow the server's camelCase wire format; the todo id travels
//! as `_id`. Ids are opaque strings. Owner and timestamps are tolerated when
//! absent so partially populated payloads still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item owned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Overlay a server copy of this todo onto the local one. Fields the
    /// server sent win; optional fields it left out keep their local value.
    /// The local id is never replaced.
    pub fn merge(&mut self, server: Todo) {
        self.title = server.title;
        self.completed = server.completed;
        if server.description.is_some() {
            self.description = server.description;
        }
        if !server.user_id.is_empty() {
            self.user_id = server.user_id;
        }
        if server.created_at.is_some() {
            self.created_at = server.created_at;
        }
        if server.updated_at.is_some() {
            self.updated_at = server.updated_at;
        }
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request payload for updating a todo. The server replaces all three fields,
/// so every one of them is always sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
}

impl UpdateTodo {
    /// Resolve a patch against the cached copy of the todo. Omitted fields
    /// keep the cached value; without a cached copy they fall back to an empty
    /// title, no description and `completed: false`.
    pub fn from_patch(patch: TodoPatch, current: Option<&Todo>) -> Self {
        Self {
            title: patch
                .title
                .or_else(|| current.map(|todo| todo.title.clone()))
                .unwrap_or_default(),
            description: patch
                .description
                .or_else(|| current.and_then(|todo| todo.description.clone())),
            completed: patch
                .completed
                .or_else(|| current.map(|todo| todo.completed))
                .unwrap_or(false),
        }
    }
}

/// Caller-supplied changes to a todo; `None` means "not edited".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Request payload for `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request payload for `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token pair issued by `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    pub user_id: String,
}

/// Account details issued by `/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, title: &str, completed: bool) -> Todo {
        Todo {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            completed,
            user_id: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn todo_decodes_minimal_payload() {
        let todo: Todo =
            serde_json::from_str(r#"{"_id":"x","title":"buy milk","completed":false}"#).unwrap();
        assert_eq!(todo, self::todo("x", "buy milk", false));
    }

    #[test]
    fn todo_decodes_full_payload() {
        let raw = r#"{
            "_id": "65f0",
            "title": "Walk dog",
            "description": "twice",
            "completed": true,
            "userId": "u1",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00.123Z"
        }"#;
        let todo: Todo = serde_json::from_str(raw).unwrap();
        assert_eq!(todo.user_id, "u1");
        assert_eq!(todo.description.as_deref(), Some("twice"));
        assert!(todo.created_at.unwrap() < todo.updated_at.unwrap());
    }

    #[test]
    fn merge_prefers_server_fields() {
        let mut local = todo("1", "A", false);
        local.description = Some("keep me".to_string());
        local.user_id = "u1".to_string();

        local.merge(todo("1", "B", true));

        assert_eq!(local.title, "B");
        assert!(local.completed);
        assert_eq!(local.description.as_deref(), Some("keep me"));
        assert_eq!(local.user_id, "u1");
    }

    #[test]
    fn merge_keeps_local_id() {
        let mut local = todo("1", "A", false);

        local.merge(todo("2", "B", true));

        assert_eq!(local.id, "1");
        assert_eq!(local.title, "B");
    }

    #[test]
    fn patch_fills_omitted_fields_from_cache() {
        let mut current = todo("1", "Walk dog", true);
        current.description = Some("twice".to_string());

        let update = UpdateTodo::from_patch(TodoPatch::default().title("Walk cat"), Some(&current));
        assert_eq!(
            update,
            UpdateTodo {
                title: "Walk cat".to_string(),
                description: Some("twice".to_string()),
                completed: true,
            }
        );
    }

    #[test]
    fn patch_without_cache_uses_defaults() {
        let update = UpdateTodo::from_patch(TodoPatch::default().completed(true), None);
        assert_eq!(update.title, "");
        assert_eq!(update.description, None);
        assert!(update.completed);
    }

    #[test]
    fn update_body_always_carries_title_and_completed() {
        let update = UpdateTodo {
            title: String::new(),
            description: None,
            completed: false,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"title": "", "completed": false}));
    }
}
