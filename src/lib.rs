pub mod app;
pub mod auth;
pub mod cli;
pub mod collection;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod validation;

pub use app::{app, init_tracing, serve};
pub use state::AppState;
