use storage::Database;

use crate::notify::Notifier;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub notifier: Notifier,
}
