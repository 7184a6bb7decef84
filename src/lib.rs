//! Cake API: a small CRUD service over a cakes document collection.

pub mod app;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

pub use app::{app, AppState};
pub use config::AppConfig;
pub use error::ApiError;
