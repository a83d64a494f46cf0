//! ProctorScope Server
//!
//! The network-facing layer: axum routes over the analysis pipeline,
//! resolved configuration, and shared application state.

pub mod config;
pub mod routes;
pub mod state;

pub use config::{load_taxonomy, Cli, ServerConfig};
pub use routes::create_router;
pub use state::AppState;
