use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, LocationCommands, ObservationCommands};

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Session management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Field observations.
    Observation {
        #[command(subcommand)]
        action: ObservationCommands,
    },
    /// Observation locations.
    Location {
        #[command(subcommand)]
        action: LocationCommands,
    },
}
