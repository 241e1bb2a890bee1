/// Interfaces Layer - External Entry Points
///
/// ## Modules
/// - `cli`: Command-line interface and interactive mode (main.rs logic)

pub mod cli;
