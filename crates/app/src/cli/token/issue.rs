use relay_app::auth::TokensService;

use crate::cli::token::UserArgs;

pub(crate) async fn run(args: UserArgs) -> Result<(), String> {
    let manager = args.store.token_manager().await?;

    let record = manager
        .issue_or_fetch(args.user_id)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_id: {}", record.user_id);
    println!("created_at: {}", record.created_at);
    println!("token: {}", record.token);

    Ok(())
}
