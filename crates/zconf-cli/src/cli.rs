//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// zconf - Inspect layered zypper configuration
#[derive(Parser, Debug)]
#[command(name = "zconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read this file instead of the user and global configuration
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<String>,

    /// Directory standing in for the filesystem root
    #[arg(long, global = true, env = "ZCONF_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print resolved option values, one per line
    ///
    /// Unset options print an empty line.
    ///
    /// Examples:
    ///   zconf get main/showAlias
    ///   zconf get download/max_concurrent solver/onlyRequires --json
    Get {
        /// Options as section/option
        #[arg(required = true, value_name = "SECTION/OPTION")]
        options: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the whole configuration tree
    #[command(alias = "configtest")]
    Dump,

    /// List the configuration files consulted and whether they loaded
    Sources {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
