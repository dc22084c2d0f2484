use clap::{Args, Subcommand};

/// Session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in through the identity provider in the browser.
    Login(AuthLoginArgs),
    /// Complete a sign-in with an authorization code copied from the browser.
    Callback(AuthCallbackArgs),
    /// Sign out locally and at the identity provider.
    Logout,
    /// Show the current session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Open the login page and exit without waiting for the redirect.
    /// Finish with `sight auth callback <code>`.
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AuthCallbackArgs {
    /// The `code` query parameter from the callback URL.
    pub code: String,
}
