//! API handlers for Agenda REST endpoints

pub mod health;
pub mod openapi;
pub mod schedules;
