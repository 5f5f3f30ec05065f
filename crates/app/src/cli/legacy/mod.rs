use clap::{Args, Subcommand};

mod migrate;
mod verify;

#[derive(Debug, Args)]
pub(crate) struct LegacyCommand {
    #[command(subcommand)]
    command: LegacySubcommand,
}

#[derive(Debug, Subcommand)]
enum LegacySubcommand {
    /// Check a `<user_id>:<auth_code>` token against the salt
    Verify(verify::VerifyArgs),
    /// Store a valid legacy token as the user's active token
    Migrate(migrate::MigrateArgs),
}

pub(crate) async fn run(command: LegacyCommand) -> Result<(), String> {
    match command.command {
        LegacySubcommand::Verify(args) => verify::run(&args),
        LegacySubcommand::Migrate(args) => migrate::run(args).await,
    }
}
