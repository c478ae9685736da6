//! Settings Store command-line entry point.
//!
//! Loads configuration, opens the configured store, and runs one get/set command.

use settings_store::run;

fn main() -> anyhow::Result<()> {
    run()
}
