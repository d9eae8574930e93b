use crate::config::AppConfig;
use crate::database::DatabaseService;
use std::sync::Arc;

#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub database: Arc<DatabaseService>,
}

impl AppState {
    pub fn new(config: AppConfig, database: DatabaseService) -> Self {
        Self {
            config,
            database: Arc::new(database),
        }
    }
}
