//! Auth Config

use std::fmt;

use clap::Args;

/// Legacy token settings.
#[derive(Args)]
pub struct AuthConfig {
    /// Secret salt for legacy `<user_id>:<auth_code>` tokens
    #[arg(long, env = "SALT", hide_env_values = true)]
    pub salt: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("salt", &"**redacted**")
            .finish()
    }
}
