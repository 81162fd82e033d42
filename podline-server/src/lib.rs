//! # Podline Server
//!
//! HTTP front end for `podline-core`: `POST /api/fetch_info` turns an
//! episode link into share-card data, `GET /ping` reports liveness.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
