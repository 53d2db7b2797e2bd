use crate::config::Config;
use crate::storage::AttendanceStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub admin_password: Arc<str>,
    /// Held across each load-modify-persist cycle so concurrent requests
    /// cannot overwrite each other's changes.
    pub store: Arc<Mutex<AttendanceStore>>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            admin_password: Arc::from(config.admin_password.as_str()),
            store: Arc::new(Mutex::new(AttendanceStore::new(config.records_dir.clone()))),
        }
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        candidate == &*self.admin_password
    }
}
