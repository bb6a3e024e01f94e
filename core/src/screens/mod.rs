//! Screen controllers: form state plus the rules that keep it in step with
//! the API.
//!
//! Every screen keeps a single error slot (the last failure message) that is
//! cleared when a new attempt starts, and a `loading` flag that rejects a
//! second submission while one is in flight.

mod login;
mod register;
mod workspace;

pub use login::LoginScreen;
pub use register::RegisterScreen;
pub use workspace::TodoWorkspace;

use crate::session::Session;
use crate::storage::KeyValueStore;

/// Store freshly issued credentials. A storage failure keeps the in-memory
/// session and is only logged.
fn start_session<S: KeyValueStore>(session: &mut Session<S>, token: String, user_id: String) {
    if let Err(e) = session.login(token, user_id) {
        tracing::warn!(error = %e, "session could not be persisted");
    }
}
