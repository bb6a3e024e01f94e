//! Account creation screen.

use crate::router::{Navigation, Route, REDIRECT_DELAY};
use crate::service::AuthService;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::transport::Transport;

/// Account creation form. A successful registration signs the new user in
/// and then sends them to the login screen.
#[derive(Debug, Clone, Default)]
pub struct RegisterScreen {
    pub username: String,
    pub email: String,
    pub password: String,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit<T: Transport, S: KeyValueStore>(
        &mut self,
        auth: &AuthService<T>,
        session: &mut Session<S>,
    ) -> Option<Navigation> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        self.notice = None;

        let outcome = match auth.register(&self.username, &self.email, &self.password) {
            Ok(registration) => {
                super::start_session(session, registration.token, registration.user_id);
                self.notice = Some("Registration Successful".to_string());
                Some(Navigation::after(Route::Login, REDIRECT_DELAY))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        };

        self.loading = false;
        outcome
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
