//! Observability infrastructure.
//!
//! Provides structured logging through `tracing`.

pub mod tracing;
