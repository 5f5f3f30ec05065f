//! Typed platform identifiers

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::ParseIntError,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker for messaging-platform accounts.
#[derive(Debug)]
pub struct User;

/// Marker for messaging-platform conversations.
#[derive(Debug)]
pub struct Chat;

/// Account identifier supplied by the messaging platform.
pub type UserId = PlatformId<User>;

/// Conversation identifier supplied by the messaging platform.
pub type ChatId = PlatformId<Chat>;

/// Signed 64-bit platform identifier tagged with the kind of entity it names.
pub struct PlatformId<T>(i64, PhantomData<T>);

impl<T> PlatformId<T> {
    pub const fn new(id: i64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl UserId {
    /// The user's private conversation with the bot shares the account id.
    #[must_use]
    pub const fn private_chat(self) -> ChatId {
        ChatId::new(self.0)
    }
}

impl<T> Clone for PlatformId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PlatformId<T> {}

impl<T> Debug for PlatformId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for PlatformId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for PlatformId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for PlatformId<T> {}

impl<T> Hash for PlatformId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for PlatformId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for PlatformId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<i64> for PlatformId<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<PlatformId<T>> for i64 {
    fn from(value: PlatformId<T>) -> Self {
        value.get()
    }
}

impl<T> FromStr for PlatformId<T> {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse::<i64>().map(Self::new)
    }
}

impl<T> Serialize for PlatformId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de, T> Deserialize<'de> for PlatformId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}
