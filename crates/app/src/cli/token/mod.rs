use clap::{Args, Subcommand};
use relay_app::ids::UserId;

use crate::cli::StoreArgs;

mod issue;
mod revoke;
mod show;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Print the user's token, issuing one if they have none
    Issue(UserArgs),
    /// Print the user's token without issuing one
    Show(UserArgs),
    /// Replace the user's token with a fresh one
    Revoke(UserArgs),
}

#[derive(Debug, Args)]
pub(crate) struct UserArgs {
    /// Platform user id
    #[arg(long, allow_negative_numbers = true)]
    user_id: UserId,

    #[command(flatten)]
    store: StoreArgs,
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Issue(args) => issue::run(args).await,
        TokenSubcommand::Show(args) => show::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}
