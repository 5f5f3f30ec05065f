use clap::Args;
use relay_app::auth::TokensService;

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// Legacy token to promote into the store
    #[arg(long)]
    token: String,

    #[command(flatten)]
    store: StoreArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let manager = args.store.token_manager().await?;

    let user = manager
        .migrate_legacy(&args.token)
        .await
        .map_err(|error| format!("failed to migrate token: {error}"))?;

    println!("migrated legacy token for user {user}");

    Ok(())
}
