use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the bootstrap engine.
#[derive(Parser, Debug)]
#[command(
    name = "bootstrap",
    about = "Personal environment bootstrap engine",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the bootstrap kit root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install tools and link dotfiles
    Provision(ProvisionOpts),
    /// Report what is installed and linked without changing anything
    Status(StatusOpts),
    /// Print version information
    Version,
}

/// Options for the `provision` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ProvisionOpts {
    /// Skip specific steps
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific steps
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Options for the `status` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StatusOpts {}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_provision() {
        let cli = Cli::parse_from(["bootstrap", "provision"]);
        assert!(matches!(cli.command, Command::Provision(_)));
    }

    #[test]
    fn parse_provision_dry_run() {
        let cli = Cli::parse_from(["bootstrap", "--dry-run", "provision"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_provision_dry_run_short() {
        let cli = Cli::parse_from(["bootstrap", "-d", "provision"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_provision_yes() {
        let cli = Cli::parse_from(["bootstrap", "provision", "--yes"]);
        assert!(cli.global.yes);
    }

    #[test]
    fn parse_provision_skip_steps() {
        let cli = Cli::parse_from(["bootstrap", "provision", "--skip", "starship,nvim"]);
        assert!(
            matches!(&cli.command, Command::Provision(_)),
            "Expected Provision command"
        );
        if let Command::Provision(opts) = cli.command {
            assert_eq!(opts.skip, vec!["starship", "nvim"]);
        }
    }

    #[test]
    fn parse_provision_only_steps() {
        let cli = Cli::parse_from(["bootstrap", "provision", "--only", "zshrc"]);
        assert!(
            matches!(&cli.command, Command::Provision(_)),
            "Expected Provision command"
        );
        if let Command::Provision(opts) = cli.command {
            assert_eq!(opts.only, vec!["zshrc"]);
        }
    }

    #[test]
    fn parse_status() {
        let cli = Cli::parse_from(["bootstrap", "status"]);
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["bootstrap", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["bootstrap", "-v", "provision"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["bootstrap", "--root", "/tmp/kit", "provision"]);
        assert_eq!(cli.global.root, Some(std::path::PathBuf::from("/tmp/kit")));
    }

    #[test]
    fn yes_defaults_to_false() {
        let cli = Cli::parse_from(["bootstrap", "provision"]);
        assert!(!cli.global.yes);
    }
}
