//! The todo workspace: the signed-in user's list plus the create form.
//!
//! The local cache only ever changes after the server confirmed the change.
//! A failed request leaves cache and form untouched and puts the message in
//! the error slot.

use crate::cache::TodoCache;
use crate::router::{Navigation, Route};
use crate::service::TodoService;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::types::{Todo, TodoPatch, UpdateTodo};
use crate::transport::Transport;

#[derive(Debug, Clone, Default)]
pub struct TodoWorkspace {
    pub new_title: String,
    pub new_description: String,
    cache: TodoCache,
    error: Option<String>,
}

impl TodoWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the workspace. Without a session the visitor is sent to the
    /// login screen; otherwise the cache is refetched wholesale.
    pub fn enter<T: Transport, S: KeyValueStore>(
        &mut self,
        todos: &TodoService<T>,
        session: &Session<S>,
    ) -> Option<Navigation> {
        self.cache.clear();
        if !session.is_authenticated() {
            return Some(Navigation::now(Route::Login));
        }

        self.error = None;
        match todos.list(session.token()) {
            Ok(list) => self.cache.replace_all(list),
            Err(e) => self.error = Some(e.to_string()),
        }
        None
    }

    /// Create a todo from the form. A blank title is ignored outright: no
    /// request, no error, no state change.
    pub fn create<T: Transport, S: KeyValueStore>(
        &mut self,
        todos: &TodoService<T>,
        session: &Session<S>,
    ) -> Option<&Todo> {
        if self.new_title.trim().is_empty() {
            return None;
        }
        self.error = None;

        let description = Some(self.new_description.as_str()).filter(|d| !d.is_empty());
        match todos.create(&self.new_title, description, session.token()) {
            Ok(todo) => {
                let id = todo.id.clone();
                self.cache.append(todo);
                self.new_title.clear();
                self.new_description.clear();
                self.cache.get(&id)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Apply `patch` to the todo `id`. Fields the patch leaves out are sent
    /// with their cached values so the server's full replacement does not
    /// reset them.
    pub fn update<T: Transport, S: KeyValueStore>(
        &mut self,
        todos: &TodoService<T>,
        session: &Session<S>,
        id: &str,
        patch: TodoPatch,
    ) -> bool {
        self.error = None;
        let input = UpdateTodo::from_patch(patch, self.cache.get(id));

        match todos.update(id, &input, session.token()) {
            Ok(server) => {
                if !self.cache.merge(id, server) {
                    tracing::debug!(id, "updated todo not applied to the cache");
                }
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Flip the completed flag of a cached todo.
    pub fn toggle_completed<T: Transport, S: KeyValueStore>(
        &mut self,
        todos: &TodoService<T>,
        session: &Session<S>,
        id: &str,
    ) -> bool {
        let Some(completed) = self.cache.get(id).map(|todo| todo.completed) else {
            self.error = Some(format!("Todo {id} is not loaded"));
            return false;
        };
        self.update(todos, session, id, TodoPatch::default().completed(!completed))
    }

    /// Mark a todo completed. Unlike [`Self::toggle_completed`] this is
    /// idempotent.
    pub fn mark_done<T: Transport, S: KeyValueStore>(
        &mut self,
        todos: &TodoService<T>,
        session: &Session<S>,
        id: &str,
    ) -> bool {
        self.update(todos, session, id, TodoPatch::default().completed(true))
    }

    pub fn delete<T: Transport, S: KeyValueStore>(
        &mut self,
        todos: &TodoService<T>,
        session: &Session<S>,
        id: &str,
    ) -> bool {
        self.error = None;
        match todos.delete(id, session.token()) {
            Ok(()) => {
                self.cache.remove(id);
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Refetch a single todo, replacing its cached copy or adding it.
    pub fn reload<T: Transport, S: KeyValueStore>(
        &mut self,
        todos: &TodoService<T>,
        session: &Session<S>,
        id: &str,
    ) -> Option<&Todo> {
        self.error = None;
        match todos.get(id, session.token()) {
            Ok(todo) => {
                let id = todo.id.clone();
                self.cache.append(todo);
                self.cache.get(&id)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// End the session locally and go back to the login screen.
    pub fn logout<S: KeyValueStore>(&mut self, session: &mut Session<S>) -> Navigation {
        if let Err(e) = session.logout() {
            tracing::warn!(error = %e, "persisted session could not be cleared");
        }
        self.cache.clear();
        self.error = None;
        Navigation::now(Route::Login)
    }

    pub fn todos(&self) -> &[Todo] {
        self.cache.todos()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
