use std::sync::Arc;

use crate::booking::{AvailabilitySource, StaticAvailability};
use crate::core::AppConfig;
use crate::google::CalendarGateway;

pub type SharedState = Arc<AppState>;

/// Read-only state shared by every request. Nothing in here is
/// mutated after startup so no lock is needed.
pub struct AppState {
    pub config: AppConfig,
    pub calendar: Arc<dyn CalendarGateway>,
    pub availability: Arc<dyn AvailabilitySource>,
}

impl AppState {
    pub fn new(config: AppConfig, calendar: Arc<dyn CalendarGateway>) -> Self {
        Self {
            config,
            calendar,
            availability: Arc::new(StaticAvailability),
        }
    }

    pub fn with_availability(mut self, availability: Arc<dyn AvailabilitySource>) -> Self {
        self.availability = availability;
        self
    }
}
