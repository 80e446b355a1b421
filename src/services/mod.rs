//! Business logic services

pub mod schedules;

use std::sync::Arc;

use crate::repository::ScheduleRepository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub schedules: schedules::SchedulesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> Self {
        Self {
            schedules: schedules::SchedulesService::new(repository),
        }
    }
}
