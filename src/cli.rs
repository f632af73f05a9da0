use std::path::PathBuf;

use archsecure::config::ColorMode;
use clap::{Parser, Subcommand, ValueEnum};

/// archsecure - interactive hardening for Arch Linux
#[derive(Parser, Debug)]
#[command(name = "archsecure")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'archsecure' without arguments to pick options from the menu.")]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/archsecure/config.toml, then /etc/archsecure/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Option catalog replacing the built-in menu
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Machine-readable output (NDJSON run events, JSON option tree)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// When to use colors
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Disable progress animation
    #[arg(long, global = true)]
    pub no_animation: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the option tree with descriptions (as JSON with --json)
    List,

    /// Apply options without the menu
    Apply {
        /// Leaf option to check (repeatable)
        #[arg(short, long = "select", value_name = "LABEL", required = true)]
        select: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(value: ColorWhen) -> Self {
        match value {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["archsecure"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn apply_collects_repeated_selections() {
        let cli = Cli::try_parse_from([
            "archsecure",
            "apply",
            "--select",
            "Use UFW",
            "-s",
            "Harden Xorg",
            "--yes",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Apply { select, yes }) => {
                assert_eq!(select, vec!["Use UFW", "Harden Xorg"]);
                assert!(yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn apply_requires_a_selection() {
        assert!(Cli::try_parse_from(["archsecure", "apply"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["archsecure", "list", "--json", "-vv", "--color", "never"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, Some(ColorWhen::Never));
    }
}
