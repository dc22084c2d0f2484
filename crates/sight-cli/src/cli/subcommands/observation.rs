use clap::Subcommand;

/// Observation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ObservationCommands {
    /// List observations.
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an observation by ID.
    Get { id: i64 },
    /// Record an observation.
    Create {
        #[arg(long)]
        species: String,
        /// Observation time, e.g. `2025-04-01T06:30:00`.
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long)]
        category: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update fields of an observation.
    Update {
        id: i64,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an observation.
    Delete { id: i64 },
}
