//! Agenda Appointment Scheduling Server
//!
//! A Rust implementation of the Agenda scheduling server, providing a REST
//! JSON API for managing appointments with automatic overlap validation for
//! employees and users.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
