use anyhow::Result;
use clap::Parser;

use bootstrap_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.verbose);
    let log = logging::Logger::new();

    match args.command {
        cli::Command::Provision(opts) => commands::provision::run(&args.global, &opts, &log),
        cli::Command::Status(opts) => commands::status::run(&args.global, &opts, &log),
        cli::Command::Version => {
            let version = option_env!("BOOTSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("bootstrap {version}");
            Ok(())
        }
    }
}
