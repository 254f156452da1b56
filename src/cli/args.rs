//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Course advising catalog: list courses, look up prerequisites, validate course files
#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Course file (default: configured catalog_path)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print all courses in alphanumeric order
    List,

    /// Print a course with its prerequisites
    Show {
        /// Course number, e.g. CSCI200
        course: String,
    },

    /// Print catalog statistics
    Stats,

    /// Load the course file and report prerequisite problems
    Validate,

    /// Print the shape of the course tree
    Tree,

    /// Interactive advising menu
    Menu,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_show_with_global_file_when_parsing_then_both_captured() {
        let cli = Cli::parse_from(["advisor", "-vv", "show", "csci200", "--file", "c.csv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, Some(PathBuf::from("c.csv")));
        assert!(matches!(cli.command, Some(Commands::Show { ref course }) if course == "csci200"));
    }
}
