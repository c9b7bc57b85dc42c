use crate::config::AppConfig;
use crate::services::store::BookingStore;

pub struct AppState {
    pub store: Box<dyn BookingStore>,
    pub config: AppConfig,
}
