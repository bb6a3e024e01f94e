//! In-memory backend implementing the todo service HTTP contract.
//!
//! Every response is wrapped in the `{success, data, message?}` envelope.
//! `/auth/*` issues opaque bearer tokens; `/api/todos` requires one and only
//! ever exposes the caller's own todos.

pub mod error;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub use error::ServerError;

/// Response wrapper shared by every endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full replacement of the mutable fields; the client always sends all three.
#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct RegisterUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registered {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedIn {
    pub token: String,
    pub user_id: Uuid,
}

struct User {
    id: Uuid,
    username: String,
    password: String,
}

/// Backing state: users keyed by email, live tokens, and all todos.
#[derive(Default)]
pub struct Store {
    users: HashMap<String, User>,
    sessions: HashMap<String, Uuid>,
    todos: HashMap<Uuid, Todo>,
}

impl Store {
    fn issue_token(&mut self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), user_id);
        token
    }

    fn owned_mut(&mut self, owner: Uuid, id: Uuid) -> Result<&mut Todo, ServerError> {
        self.todos
            .get_mut(&id)
            .filter(|todo| todo.user_id == owner)
            .ok_or(ServerError::TodoNotFound)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_store(Db::default())
}

/// Build the router over an existing store so several routers (or tests)
/// can observe the same data.
pub fn app_with_store(db: Db) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// The user owning the bearer token on the request.
pub struct AuthUser(pub Uuid);

impl FromRequestParts<Db> for AuthUser {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, db: &Db) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty())
            .ok_or(ServerError::MissingToken)?;

        let store = db.read().await;
        store
            .sessions
            .get(token)
            .copied()
            .map(AuthUser)
            .ok_or(ServerError::InvalidToken)
    }
}

fn ok<T>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
        message: None,
    })
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServerError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}

fn parse_id(raw: &str) -> Result<Uuid, ServerError> {
    // Unknown and malformed ids are indistinguishable to the caller.
    Uuid::parse_str(raw).map_err(|_| ServerError::TodoNotFound)
}

fn require_title(title: &str) -> Result<(), ServerError> {
    if title.trim().is_empty() {
        return Err(ServerError::BadRequest("Title is required".to_string()));
    }
    Ok(())
}

async fn register(
    State(db): State<Db>,
    payload: Result<Json<RegisterUser>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Registered>>), ServerError> {
    let input = body(payload)?;
    if input.username.is_empty() || input.email.is_empty() || input.password.is_empty() {
        return Err(ServerError::BadRequest(
            "Please provide all required fields".to_string(),
        ));
    }

    let mut store = db.write().await;
    if store.users.contains_key(&input.email) {
        return Err(ServerError::UserExists);
    }

    let user = User {
        id: Uuid::new_v4(),
        username: input.username,
        password: input.password,
    };
    let user_id = user.id;
    let username = user.username.clone();
    store.users.insert(input.email.clone(), user);
    let token = store.issue_token(user_id);
    tracing::info!(%user_id, "registered user");

    Ok((
        StatusCode::CREATED,
        ok(Registered {
            token,
            user_id,
            username,
            email: input.email,
        }),
    ))
}

async fn login(
    State(db): State<Db>,
    payload: Result<Json<LoginUser>, JsonRejection>,
) -> Result<Json<Envelope<LoggedIn>>, ServerError> {
    let input = body(payload)?;
    let mut store = db.write().await;
    let user_id = store
        .users
        .get(&input.email)
        .filter(|user| user.password == input.password)
        .map(|user| user.id)
        .ok_or(ServerError::InvalidCredentials)?;

    let token = store.issue_token(user_id);
    tracing::info!(%user_id, "user logged in");
    Ok(ok(LoggedIn { token, user_id }))
}

async fn list_todos(
    State(db): State<Db>,
    AuthUser(owner): AuthUser,
) -> Json<Envelope<Vec<Todo>>> {
    let store = db.read().await;
    let mut todos: Vec<Todo> = store
        .todos
        .values()
        .filter(|todo| todo.user_id == owner)
        .cloned()
        .collect();
    todos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    ok(todos)
}

async fn create_todo(
    State(db): State<Db>,
    AuthUser(owner): AuthUser,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Todo>>), ServerError> {
    let input = body(payload)?;
    require_title(&input.title)?;

    let now = Utc::now();
    let todo = Todo {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        completed: false,
        user_id: owner,
        created_at: now,
        updated_at: now,
    };
    db.write().await.todos.insert(todo.id, todo.clone());
    Ok((StatusCode::CREATED, ok(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Todo>>, ServerError> {
    let id = parse_id(&id)?;
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .filter(|todo| todo.user_id == owner)
        .cloned()
        .map(ok)
        .ok_or(ServerError::TodoNotFound)
}

async fn update_todo(
    State(db): State<Db>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Envelope<Todo>>, ServerError> {
    let id = parse_id(&id)?;
    let input = body(payload)?;
    require_title(&input.title)?;

    let mut store = db.write().await;
    let todo = store.owned_mut(owner, id)?;
    todo.title = input.title;
    todo.description = input.description;
    todo.completed = input.completed;
    todo.updated_at = Utc::now();
    Ok(ok(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ServerError> {
    let id = parse_id(&id)?;
    let mut store = db.write().await;
    store.owned_mut(owner, id)?;
    store.todos.remove(&id);
    Ok(Json(Envelope {
        success: true,
        data: (),
        message: Some("Todo deleted".to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_wire_names() {
        let todo = Todo {
            id: Uuid::nil(),
            title: "Test".to_string(),
            description: None,
            completed: false,
            user_id: Uuid::nil(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["userId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        assert!(json.get("description").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn create_todo_description_is_optional() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"No description"}"#).unwrap();
        assert_eq!(input.title, "No description");
        assert!(input.description.is_none());
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"description":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_defaults_completed_to_false() {
        let input: UpdateTodo = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert!(!input.completed);
        assert!(input.description.is_none());
    }

    #[test]
    fn envelope_omits_absent_message() {
        let json = serde_json::to_value(Envelope {
            success: true,
            data: 1,
            message: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 1}));
    }

    #[test]
    fn unit_data_serializes_as_null() {
        let json = serde_json::to_value(Envelope {
            success: true,
            data: (),
            message: Some("Todo deleted".to_string()),
        })
        .unwrap();
        assert!(json["data"].is_null());
    }
}
