pub mod app;
pub mod client;
pub mod effects;
pub mod errors;
pub mod handlers;
pub mod legacy;
pub mod loaders;
pub mod models;
pub mod state;
pub mod ui;

pub use app::router;
pub use client::{ApiClient, DEFAULT_API_BASE};
pub use state::AppState;
