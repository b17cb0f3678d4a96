//! Pagehook HTTP presentation layer
//!
//! This crate serves the Messenger webhook over HTTP and hosts the sample
//! greeting bot wired up by the `pagehook-server` binary.

pub mod bot;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use bot::GreetingBot;
pub use routes::create_router;
pub use server::serve;
pub use state::AppState;
