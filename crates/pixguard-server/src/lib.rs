//! PixGuard Server
//!
//! HTTP moderation service for the Pixara backend. Loads the comment
//! toxicity model once at startup and serves a synchronous classify
//! endpoint; the surrounding CRUD application calls it before persisting
//! comments.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
