use serde::Serialize;
use sight_core::{LocationDraft, LocationPatch};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LocationCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeletedResponse {
    deleted: i64,
}

/// Handle `sight location <subcommand>`.
pub async fn handle(
    action: LocationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let locations = ctx.api().locations();
    match action {
        LocationCommands::List { skip, limit } => {
            let limit = limit.unwrap_or(ctx.config.general.default_limit);
            output(&locations.list(skip, limit).await?, flags.format)
        }
        LocationCommands::Get { id } => output(&locations.get(id).await?, flags.format),
        LocationCommands::Create {
            name,
            latitude,
            longitude,
            description,
            address,
        } => {
            let draft = LocationDraft {
                name,
                latitude,
                longitude,
                description,
                address,
            };
            output(&locations.create(&draft).await?, flags.format)
        }
        LocationCommands::Update {
            id,
            name,
            latitude,
            longitude,
            description,
            address,
        } => {
            let patch = LocationPatch {
                name,
                latitude,
                longitude,
                description,
                address,
            };
            output(&locations.update(id, &patch).await?, flags.format)
        }
        LocationCommands::Delete { id } => {
            locations.delete(id).await?;
            output(&DeletedResponse { deleted: id }, flags.format)
        }
    }
}
