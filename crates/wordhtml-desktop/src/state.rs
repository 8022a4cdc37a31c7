use std::sync::Arc;

use tokio::sync::Mutex;

use crate::session::Session;

/// Shared application state handed to every command.
pub struct DesktopState {
    pub session: Arc<Mutex<Session>>,
}

impl DesktopState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(Session::default())
    }
}
