use clap::Args;
use relay_app::auth::legacy::validate_legacy_token;

use crate::cli::SaltArgs;

#[derive(Debug, Args)]
pub(crate) struct VerifyArgs {
    /// Legacy token to check
    #[arg(long)]
    token: String,

    #[command(flatten)]
    salt: SaltArgs,
}

pub(crate) fn run(args: &VerifyArgs) -> Result<(), String> {
    let user = validate_legacy_token(&args.token, &args.salt.salt())
        .map_err(|error| format!("token rejected: {error}"))?;

    println!("valid legacy token for user {user}");

    Ok(())
}
