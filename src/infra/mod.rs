//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod sources;
pub mod telemetry;
