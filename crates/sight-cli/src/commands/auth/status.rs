use serde::Serialize;
use sight_auth::{SessionState, SessionStatus};
use sight_core::UserProfile;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub(super) struct AuthStatusResponse {
    pub status: SessionStatus,
    pub authenticated: bool,
    pub user: Option<UserProfile>,
    pub expires_at: Option<String>,
}

impl AuthStatusResponse {
    pub(super) fn from_state(state: SessionState, status: SessionStatus) -> Self {
        Self {
            status,
            authenticated: status == SessionStatus::Authenticated,
            user: state.user,
            expires_at: state.expires_at.map(|at| at.to_rfc3339()),
        }
    }
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = AuthStatusResponse::from_state(ctx.session.snapshot(), ctx.session.status());
    output(&response, flags.format)
}
