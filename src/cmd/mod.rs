//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`health`]. Each handler lives in its
//! own submodule.

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::IntakeError;

pub async fn dispatch(cli: Cli) -> Result<(), IntakeError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  intake v{version} \u{2014} customer intake REST API\n\n  \
         No command provided. To get started:\n\n    \
         intake run                        Start the server on port 3000\n    \
         intake run -p 8080 --pretty       Local dev mode\n    \
         intake health                     Probe a running instance\n    \
         intake --help                     See all commands and options\n"
    );
}
