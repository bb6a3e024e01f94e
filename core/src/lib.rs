//! Client core for the todo service.
//!
//! # Overview
//! Holds the signed-in session, talks to the todo REST API, and keeps a local
//! copy of the user's todos consistent with what the server confirmed.
//!
//! # Design
//! - Request building and response parsing never touch the network
//!   (host-does-IO pattern). `TodoClient` and `AuthClient` split each
//!   operation into `build_*` and `parse_*`; a [`Transport`] executes the
//!   round-trip in between, and the services glue the three together.
//! - Every API failure reaches callers as an [`ApiError`] whose `Display` is
//!   the message to show: the server's `message` or a per-operation fallback.
//! - The [`Session`] is constructed over a [`KeyValueStore`] and passed
//!   explicitly; it persists `token` and `userId` on every change.
//! - Screens (`screens`) own form state and apply successful results to the
//!   local [`TodoCache`]; the router's guard keeps signed-out visitors on the
//!   login screen.

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
mod envelope;
pub mod error;
pub mod http;
pub mod router;
pub mod screens;
pub mod service;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;

pub use auth::AuthClient;
pub use cache::TodoCache;
pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::{ApiError, ErrorKind, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use router::{guard, resolve, Navigation, Route, REDIRECT_DELAY};
pub use screens::{LoginScreen, RegisterScreen, TodoWorkspace};
pub use service::{AuthService, TodoService};
pub use session::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{
    AuthPayload, CreateTodo, LoginRequest, RegisterRequest, Registration, Todo, TodoPatch,
    UpdateTodo,
};
