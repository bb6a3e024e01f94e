//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The session token is passed per call; a missing or empty token simply
//! leaves the authorization header off.

use crate::envelope;
use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// Synchronous, stateless client for the `/api/todos` endpoints.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self, token: Option<&str>) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection(), token, None)
    }

    pub fn build_get_todo(&self, id: &str, token: Option<&str>) -> HttpRequest {
        self.request(HttpMethod::Get, self.item(id), token, None)
    }

    pub fn build_create_todo(
        &self,
        input: &CreateTodo,
        token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(input, Operation::CreateTodo)?;
        Ok(self.request(HttpMethod::Post, self.collection(), token, Some(body)))
    }

    pub fn build_update_todo(
        &self,
        id: &str,
        input: &UpdateTodo,
        token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(input, Operation::UpdateTodo)?;
        Ok(self.request(HttpMethod::Put, self.item(id), token, Some(body)))
    }

    pub fn build_delete_todo(&self, id: &str, token: Option<&str>) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item(id), token, None)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        envelope::open(response, Operation::ListTodos)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        envelope::open(response, Operation::GetTodo)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        envelope::open(response, Operation::CreateTodo)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        envelope::open(response, Operation::UpdateTodo)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        envelope::acknowledge(response, Operation::DeleteTodo)
    }

    fn collection(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn item(&self, id: &str) -> String {
        format!("{}/api/todos/{id}", self.base_url)
    }

    fn request(
        &self,
        method: HttpMethod,
        path: String,
        token: Option<&str>,
        body: Option<String>,
    ) -> HttpRequest {
        let mut headers = Vec::new();
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

/// Serialize a JSON request body, reporting failures against `operation`.
pub(crate) fn encode<T: serde::Serialize>(
    input: &T,
    operation: Operation,
) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| {
        tracing::warn!(operation = operation.name(), error = %e, "request body serialization failed");
        ApiError::validation(operation.fallback_message())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:5000")
    }

    fn ok(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_carries_bearer_token() {
        let req = client().build_list_todos(Some("abc"));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5000/api/todos");
        assert_eq!(req.header("Authorization"), Some("Bearer abc"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_list_todos_without_token_sends_no_authorization() {
        let req = client().build_list_todos(None);
        assert!(req.header("authorization").is_none());
        assert!(req.headers.is_empty());

        let req = client().build_list_todos(Some(""));
        assert!(req.header("authorization").is_none());
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo("65f0a1", Some("abc"));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5000/api/todos/65f0a1");
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let input = CreateTodo {
            title: "Buy milk".to_string(),
            description: Some("2 litres".to_string()),
        };
        let req = client().build_create_todo(&input, Some("abc")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:5000/api/todos");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer abc"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["description"], "2 litres");
    }

    #[test]
    fn build_update_todo_sends_every_field() {
        let input = UpdateTodo {
            title: "Updated".to_string(),
            description: None,
            completed: true,
        };
        let req = client().build_update_todo("1", &input, Some("abc")).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:5000/api/todos/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Updated");
        assert_eq!(body["completed"], true);
        assert!(body.get("description").is_none());
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo("1", Some("abc"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:5000/api/todos/1");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_success() {
        let todos = client()
            .parse_list_todos(ok(
                200,
                r#"{"success":true,"data":[{"_id":"x","title":"buy milk","completed":false}]}"#,
            ))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "buy milk");
    }

    #[test]
    fn parse_create_todo_success() {
        let todo = client()
            .parse_create_todo(ok(
                201,
                r#"{"success":true,"data":{"_id":"n1","title":"New","completed":false}}"#,
            ))
            .unwrap();
        assert_eq!(todo.id, "n1");
    }

    #[test]
    fn parse_create_todo_failure_without_message_uses_fallback() {
        let err = client().parse_create_todo(ok(500, "")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to create todo");
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client()
            .parse_get_todo(ok(404, r#"{"success":false,"message":"Todo not found"}"#))
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Todo not found");
    }

    #[test]
    fn parse_update_todo_success() {
        let todo = client()
            .parse_update_todo(ok(
                200,
                r#"{"success":true,"data":{"_id":"1","title":"Updated","completed":true}}"#,
            ))
            .unwrap();
        assert_eq!(todo.title, "Updated");
        assert!(todo.completed);
    }

    #[test]
    fn parse_delete_todo_failure_uses_fallback() {
        let err = client().parse_delete_todo(ok(401, "{}")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete todo");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:5000/");
        let req = client.build_list_todos(None);
        assert_eq!(req.path, "http://localhost:5000/api/todos");
    }
}
