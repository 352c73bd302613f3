//! REST client for the orchestration server.

pub mod client;

pub use client::ApiClient;
