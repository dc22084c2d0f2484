use crate::cli::GlobalFlags;
use crate::commands::auth::status::AuthStatusResponse;
use crate::context::AppContext;
use crate::output::output;

/// `sight auth callback <code>`: the landing route, entered by hand.
pub async fn handle(code: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.navigator.enter(ctx.config.session.callback_route.as_str());
    complete(code, ctx, flags).await
}

/// Exchange `code` and report the resulting session. Runs on the callback
/// route; the root route is re-entered once the exchange is done.
pub(super) async fn complete(
    code: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let result = ctx.controller.handle_callback(code).await;
    ctx.navigator.enter(ctx.config.session.root_route.as_str());

    if result?.is_none() {
        anyhow::bail!("signed in, but the profile could not be loaded; the session was cleared");
    }

    let response = AuthStatusResponse::from_state(ctx.session.snapshot(), ctx.session.status());
    output(&response, flags.format)
}
