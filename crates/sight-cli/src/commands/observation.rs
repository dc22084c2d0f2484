use serde::Serialize;
use sight_core::{ObservationDraft, ObservationPatch};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ObservationCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeletedResponse {
    deleted: i64,
}

/// Handle `sight observation <subcommand>`.
pub async fn handle(
    action: ObservationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let observations = ctx.api().observations();
    match action {
        ObservationCommands::List { skip, limit } => {
            let limit = limit.unwrap_or(ctx.config.general.default_limit);
            output(&observations.list(skip, limit).await?, flags.format)
        }
        ObservationCommands::Get { id } => output(&observations.get(id).await?, flags.format),
        ObservationCommands::Create {
            species,
            date,
            latitude,
            longitude,
            category,
            notes,
        } => {
            let draft = ObservationDraft {
                species,
                date,
                latitude,
                longitude,
                notes,
                category,
            };
            output(&observations.create(&draft).await?, flags.format)
        }
        ObservationCommands::Update {
            id,
            species,
            date,
            latitude,
            longitude,
            category,
            notes,
        } => {
            let patch = ObservationPatch {
                species,
                date,
                latitude,
                longitude,
                notes,
                category,
            };
            output(&observations.update(id, &patch).await?, flags.format)
        }
        ObservationCommands::Delete { id } => {
            observations.delete(id).await?;
            output(&DeletedResponse { deleted: id }, flags.format)
        }
    }
}
