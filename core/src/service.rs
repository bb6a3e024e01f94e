//! Transport-executing wrappers over the request builders.
//!
//! Each method runs one build → execute → parse round-trip and reports every
//! failure as an [`ApiError`] whose message is ready for display.

use crate::auth::AuthClient;
use crate::client::TodoClient;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{
    AuthPayload, CreateTodo, LoginRequest, RegisterRequest, Registration, Todo, UpdateTodo,
};

fn send<T: Transport>(
    transport: &T,
    request: HttpRequest,
    operation: Operation,
) -> Result<HttpResponse, ApiError> {
    transport.execute(request).map_err(|e| {
        tracing::warn!(operation = operation.name(), error = %e, "request did not complete");
        ApiError::network(operation)
    })
}

/// Registration and login against `/auth`.
pub struct AuthService<T> {
    client: AuthClient,
    transport: T,
}

impl<T: Transport> AuthService<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: AuthClient::new(base_url),
            transport,
        }
    }

    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, ApiError> {
        let request = self.client.build_register(&RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response = send(&self.transport, request, Operation::Register)?;
        self.client.parse_register(response)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let request = self.client.build_login(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response = send(&self.transport, request, Operation::Login)?;
        self.client.parse_login(response)
    }
}

/// CRUD on `/api/todos`, authorized with the token passed to each call.
pub struct TodoService<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoService<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub fn list(&self, token: Option<&str>) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos(token);
        let response = send(&self.transport, request, Operation::ListTodos)?;
        self.client.parse_list_todos(response)
    }

    pub fn get(&self, id: &str, token: Option<&str>) -> Result<Todo, ApiError> {
        let request = self.client.build_get_todo(id, token);
        let response = send(&self.transport, request, Operation::GetTodo)?;
        self.client.parse_get_todo(response)
    }

    pub fn create(
        &self,
        title: &str,
        description: Option<&str>,
        token: Option<&str>,
    ) -> Result<Todo, ApiError> {
        let input = CreateTodo {
            title: title.to_string(),
            description: description.map(str::to_string),
        };
        let request = self.client.build_create_todo(&input, token)?;
        let response = send(&self.transport, request, Operation::CreateTodo)?;
        self.client.parse_create_todo(response)
    }

    pub fn update(
        &self,
        id: &str,
        input: &UpdateTodo,
        token: Option<&str>,
    ) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, input, token)?;
        let response = send(&self.transport, request, Operation::UpdateTodo)?;
        self.client.parse_update_todo(response)
    }

    pub fn delete(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id, token);
        let response = send(&self.transport, request, Operation::DeleteTodo)?;
        self.client.parse_delete_todo(response)
    }
}
