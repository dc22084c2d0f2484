pub mod auth;
pub mod location;
pub mod observation;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = match command {
        Commands::Auth { action } => auth::handle(&action, ctx, flags).await,
        Commands::Observation { action } => observation::handle(action, ctx, flags).await,
        Commands::Location { action } => location::handle(action, ctx, flags).await,
    };

    if result.is_err()
        && let Some(route) = ctx.navigator.pending_reload()
    {
        eprintln!("Session ended (returned to {route}). Run 'sight auth login' to sign in again.");
    }
    result
}
