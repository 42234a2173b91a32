//! API Module
//!
//! HTTP handlers and routing for the filter preset server.
//!
//! # Endpoints
//! - `GET /filter/presets` - List presets
//! - `GET /filter/presets/:name` - Fetch a preset by name
//! - `POST`, `PUT`, `DELETE` on presets - Not implemented (501)
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
