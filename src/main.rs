/// Main entry point for the limit order manager
///
/// This serves as a thin wrapper that delegates to the interfaces layer.
/// The actual application logic is implemented in `interfaces::cli`.

use limit_order_manager::interfaces::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
