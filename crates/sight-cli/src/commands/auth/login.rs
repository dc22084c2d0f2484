use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use sight_auth::browser_flow::CallbackListener;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::commands::auth::callback;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginPendingResponse {
    awaiting_callback: bool,
    callback_route: String,
    next: &'static str,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session_config = &ctx.config.session;

    if args.no_wait {
        ctx.controller.login().await?;
        return output(
            &AuthLoginPendingResponse {
                awaiting_callback: false,
                callback_route: session_config.callback_route.clone(),
                next: "sight auth callback <code>",
            },
            flags.format,
        );
    }

    // Bound before navigating so the redirect cannot beat the listener.
    let listener = CallbackListener::bind(&session_config.callback_bind)
        .context("failed to start the login callback listener")?;
    tracing::debug!(addr = ?listener.local_addr(), "callback listener ready");

    ctx.controller.login().await?;
    ctx.navigator.enter(session_config.callback_route.as_str());
    if !flags.quiet {
        eprintln!("Waiting for the identity provider to redirect back...");
    }

    let code = listener
        .wait_for_code(
            &session_config.callback_route,
            Duration::from_secs(session_config.callback_timeout_secs),
        )
        .await?;

    callback::complete(&code, ctx, flags).await
}
