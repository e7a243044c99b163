//! API Module
//!
//! HTTP handlers and routing exposing the cache over a REST API.
//!
//! # Endpoints
//! - `PUT /set`, `GET /get/:key`, `DELETE /del/:key`, `GET /has/:key`
//! - `POST /clear`
//! - `POST /get-multiple`, `PUT /set-multiple`, `POST /delete-multiple`
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
