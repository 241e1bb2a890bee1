/// Application Services
///
/// Services coordinate domain logic to implement application workflows.

pub mod order_service;

pub use order_service::{seeded_rng, BenchmarkReport, LoadReport, OrderService};
