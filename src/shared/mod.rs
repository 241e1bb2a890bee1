/// Shared utilities used across all layers
///
/// This module contains:
/// - Error types for the I/O boundary
/// - Prometheus metrics

pub mod error;
pub mod metrics;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use metrics::METRICS;
