//! Sign-in screen.
//!
//! While a submission is in flight further submits are ignored. Success shows
//! a notice and schedules the move to the workspace.

use crate::router::{Navigation, Route, REDIRECT_DELAY};
use crate::service::AuthService;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::transport::Transport;

/// Email/password sign-in form.
#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in with the current form fields. On success the session is
    /// started and the workspace is scheduled after [`REDIRECT_DELAY`]; on
    /// failure the message lands in the error slot and the fields stay put.
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

        let outcome = match auth.login(&self.email, &self.password) {
            Ok(payload) => {
                super::start_session(session, payload.token, payload.user_id);
                self.notice = Some("Login Successful".to_string());
                Some(Navigation::after(Route::Todos, REDIRECT_DELAY))
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
