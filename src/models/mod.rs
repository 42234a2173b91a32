//! Response models for the preset server API
//!
//! DTOs serialized into HTTP response bodies. Presets themselves are
//! returned as [`FilterPreset`](crate::presets::FilterPreset) JSON.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, MessageResponse, StatsResponse};
