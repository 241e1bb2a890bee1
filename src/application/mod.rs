/// Application Layer - Services
///
/// This layer orchestrates the domain store together with the
/// infrastructure adapters. It owns logging and metrics so the domain
/// layer stays free of side effects.
///
/// ## Modules
/// - `services`: application services (`OrderService`)

pub mod services;

// Re-export key services
pub use services::OrderService;
