//! Chat commands

use std::fmt;

/// A recognised chat command. Matching is exact: no arguments, no bot suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start` or `/auth`
    Auth,

    /// `/revoke`
    Revoke,

    /// `/help`
    Help,
}

impl Command {
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/start" | "/auth" => Some(Self::Auth),
            "/revoke" => Some(Self::Revoke),
            "/help" => Some(Self::Help),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auth => "auth",
            Self::Revoke => "revoke",
            Self::Help => "help",
        })
    }
}
