//! Decklive Service
//!
//! Backend for the decklive DJ streaming platform: accounts, profiles,
//! live sessions, follower graph, chat log and show schedules, backed by
//! PostgreSQL and an external live-video provider.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
