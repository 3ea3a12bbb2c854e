//! Domain primitives shared across the generator, persistence and API layers.
//!
//! Identifiers use the newtype pattern so a user id can never be passed where
//! a batch handle is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Database identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Opaque handle returned by a generation call and consumed by a batch export.
///
/// # Examples
///
/// ```rust
/// use mikrogen::domain::BatchHandle;
///
/// let handle = BatchHandle::new();
/// let parsed: BatchHandle = handle.to_string().parse().unwrap();
/// assert_eq!(handle, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchHandle(Uuid);

impl BatchHandle {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchHandle {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The authenticated caller of an operation.
///
/// Resolved once by the auth middleware and then passed explicitly to every
/// service call that persists, stamps or authorizes anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
    pub is_admin: bool,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: impl Into<UserId>, username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_admin,
        }
    }
}
