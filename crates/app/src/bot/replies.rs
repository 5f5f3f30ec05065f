//! Reply texts. Outbound messages are rendered as Markdown.

pub const HELP: &str = "Available commands:
/auth - get your bot token
/revoke - revoke the old token and get a new one
/help - show this help

Paste the token into the app settings.";

pub const ISSUE_FAILED: &str = "Something went wrong while issuing your token. Please try again later.";

pub const REVOKE_FAILED: &str =
    "Something went wrong while generating a new token. Please try again later.";

#[must_use]
pub fn token(token: &str) -> String {
    format!("Your bot token:\n```\n{token}\n```\n\nPaste it into the app settings.")
}

#[must_use]
pub fn revoked(token: &str) -> String {
    format!("Previous token revoked.\n\n{}", self::token(token))
}
