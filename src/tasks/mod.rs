//! Background Tasks Module
//!
//! Shared cache handle and the background sweep that runs on its behalf.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at a configured interval

mod cleanup;
mod shared;

pub use cleanup::CleanupHandle;
pub use shared::SharedCache;
