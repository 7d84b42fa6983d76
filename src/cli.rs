//! Command-line interface definitions.

use clap::{Parser, Subcommand};

/// Announces live stream starts to a Discord channel.
#[derive(Parser, Debug)]
#[command(name = "stream-notify", version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print notification metrics in Prometheus text format on exit.
    #[arg(long, default_value = "false", global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level based on verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Announce that a stream has started.
    Notify {
        /// The stream name.
        stream: String,
    },

    /// Send an arbitrary message to the channel.
    Send {
        /// The message text.
        message: String,
    },

    /// Print the announcement for a stream without sending it.
    Preview {
        /// The stream name.
        stream: String,

        /// Base URL of the stream-hosting site.
        #[arg(long, env = "STREAM_HOST_URL")]
        base_url: String,
    },

    /// Display the resolved configuration.
    #[command(name = "config-show")]
    ConfigShow,
}
