use clap::Subcommand;

/// Location commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LocationCommands {
    /// List locations with their observation counts.
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a location by ID.
    Get { id: i64 },
    /// Add a location.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Update fields of a location.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a location.
    Delete { id: i64 },
}
