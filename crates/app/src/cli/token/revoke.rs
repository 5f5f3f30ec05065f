use relay_app::auth::TokensService;

use crate::cli::token::UserArgs;

pub(crate) async fn run(args: UserArgs) -> Result<(), String> {
    let manager = args.store.token_manager().await?;

    let record = manager
        .revoke(args.user_id)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    println!("revoked previous token for user {}", record.user_id);
    println!("created_at: {}", record.created_at);
    println!("token: {}", record.token);

    Ok(())
}
