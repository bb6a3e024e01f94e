//! Error types for the todo API client.
//!
//! # Design
//! Every failure the API layer can report collapses into one of three kinds.
//! Network and server failures always carry a human-readable message: the
//! server's own `message` when it sent one, otherwise the fallback of the
//! [`Operation`] that failed. `Display` prints only that message, so screens
//! can show `err.to_string()` directly.

use thiserror::Error;

/// Broad category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Server,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("{message}")]
    Network { message: String },

    /// The server answered with a failure status, `success: false`, or a
    /// body that could not be decoded.
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    /// Rejected client-side before any request was issued.
    #[error("{message}")]
    Validation { message: String },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network { .. } => ErrorKind::Network,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message }
            | ApiError::Server { message, .. }
            | ApiError::Validation { message } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => *status,
            _ => None,
        }
    }

    pub fn network(operation: Operation) -> Self {
        ApiError::Network {
            message: operation.fallback_message().to_string(),
        }
    }

    /// Server failure, preferring `message` over the operation fallback.
    pub fn server(operation: Operation, status: Option<u16>, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| operation.fallback_message().to_string());
        ApiError::Server { status, message }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }
}

/// Operations exposed by the API layer; used to pick fallback messages and
/// to label log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    ListTodos,
    GetTodo,
    CreateTodo,
    UpdateTodo,
    DeleteTodo,
}

impl Operation {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Register => "Registration failed",
            Operation::Login => "Login failed",
            Operation::ListTodos => "Failed to fetch todos",
            Operation::GetTodo => "Failed to fetch todo",
            Operation::CreateTodo => "Failed to create todo",
            Operation::UpdateTodo => "Failed to update todo",
            Operation::DeleteTodo => "Failed to delete todo",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Register => "register",
            Operation::Login => "login",
            Operation::ListTodos => "list_todos",
            Operation::GetTodo => "get_todo",
            Operation::CreateTodo => "create_todo",
            Operation::UpdateTodo => "update_todo",
            Operation::DeleteTodo => "delete_todo",
        }
    }
}
