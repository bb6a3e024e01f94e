//! Screen routing and the authentication guard.

use std::time::Duration;

use crate::session::Session;
use crate::storage::KeyValueStore;

/// Delay between a successful login/registration and the follow-up
/// navigation, leaving time for the success notice to be read.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Todos,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/auth/login",
            Route::Register => "/auth/register",
            Route::Todos => "/todos",
        }
    }

    /// Map a location to its screen. `/` lands on the workspace and anything
    /// unknown on the login screen.
    pub fn from_path(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "" | "/todos" => Route::Todos,
            "/auth/register" => Route::Register,
            _ => Route::Login,
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Todos)
    }
}

/// A navigation the host should perform once `delay` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub delay: Duration,
}

impl Navigation {
    pub fn now(route: Route) -> Self {
        Self {
            route,
            delay: Duration::ZERO,
        }
    }

    pub fn after(route: Route, delay: Duration) -> Self {
        Self { route, delay }
    }
}

/// Let `route` through when the session allows it, otherwise send the visitor
/// to the login screen. Evaluated afresh on every call.
pub fn guard<S: KeyValueStore>(route: Route, session: &Session<S>) -> Route {
    if route.requires_session() && !session.is_authenticated() {
        tracing::debug!(path = route.path(), "no session, redirecting to login");
        return Route::Login;
    }
    route
}

/// Resolve a location to the screen that should render for it.
pub fn resolve<S: KeyValueStore>(path: &str, session: &Session<S>) -> Route {
    guard(Route::from_path(path), session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn paths_map_to_routes() {
        assert_eq!(Route::from_path("/"), Route::Todos);
        assert_eq!(Route::from_path("/todos"), Route::Todos);
        assert_eq!(Route::from_path("/auth/register"), Route::Register);
        assert_eq!(Route::from_path("/auth/login"), Route::Login);
        assert_eq!(Route::from_path("/nowhere"), Route::Login);
    }

    #[test]
    fn workspace_requires_session() {
        let mut session = Session::load(MemoryStore::new());
        assert_eq!(resolve("/todos", &session), Route::Login);
        assert_eq!(resolve("/", &session), Route::Login);
        assert_eq!(resolve("/auth/register", &session), Route::Register);

        session.login("abc", "u1").unwrap();
        assert_eq!(resolve("/todos", &session), Route::Todos);

        session.logout().unwrap();
        assert_eq!(guard(Route::Todos, &session), Route::Login);
    }
}
