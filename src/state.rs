use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::models::AnalysisEvent;
use crate::services::catalog::CatalogProvider;
use crate::services::vision::VisionProvider;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub vision: Box<dyn VisionProvider>,
    pub catalog: Box<dyn CatalogProvider>,
    pub events_tx: broadcast::Sender<AnalysisEvent>,
}
