//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ztv",
    about = "Browse Zendesk tickets in the terminal",
    version
)]
pub struct Cli {
    /// Configuration file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profile to connect with; defaults to the configured default profile.
    #[arg(long, short = 'p', value_name = "NAME")]
    pub profile: Option<String>,

    /// Browse generated tickets instead of a Zendesk account.
    ///
    /// Without a count the demo list never ends.
    #[arg(long, value_name = "N", num_args = 0..=1)]
    pub demo: Option<Option<u64>>,

    /// Multiplier for PAGE UP / PAGE DOWN, relative to the visible rows.
    #[arg(long, value_name = "F")]
    pub page_speed: Option<f32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Commands {
    /// Store a profile's API token in the OS keyring, read from stdin.
    #[command(name = "set-token")]
    SetToken {
        #[arg(long, short = 'p')]
        profile: String,
    },

    /// Remove a profile's API token from the OS keyring.
    #[command(name = "delete-token")]
    DeleteToken {
        #[arg(long, short = 'p')]
        profile: String,
    },

    /// List configured profiles.
    Profiles,
}
