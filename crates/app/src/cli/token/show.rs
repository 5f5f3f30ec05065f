use relay_app::auth::TokensService;

use crate::cli::token::UserArgs;

pub(crate) async fn run(args: UserArgs) -> Result<(), String> {
    let manager = args.store.token_manager().await?;

    let record = manager
        .find_token(args.user_id)
        .await
        .map_err(|error| format!("failed to look up token: {error}"))?;

    let Some(record) = record else {
        println!("no token found for user {}", args.user_id);
        return Ok(());
    };

    println!("user_id: {}", record.user_id);
    println!("created_at: {}", record.created_at);
    println!("token: {}", record.token);

    Ok(())
}
