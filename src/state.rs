use crate::auth::SessionManager;
use crate::store::StudentStore;

/// Shared application state, constructed once in `main` and handed to
/// every request handler by the router.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub store: StudentStore,
}
