//! Session identifier
//!
//! A session identifier is the public handle of a listening session and the
//! filename key of the media asset uploaded for it. Generated identifiers are
//! 8 bytes drawn from the operating system CSPRNG, rendered as 16 lowercase
//! hex characters.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a listening session
///
/// Realtime channels accept any non-empty name (see [`SessionId::new`]);
/// only identifiers produced by [`SessionId::generate`] ever have a stored
/// media asset, and [`SessionId::parse`] accepts exactly that shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Number of random bytes in a generated identifier
    pub const BYTE_LEN: usize = 8;

    /// Length of a generated identifier in hex characters
    pub const HEX_LEN: usize = Self::BYTE_LEN * 2;

    /// Generate a fresh, unguessable identifier
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::BYTE_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wrap an arbitrary session name taken from a request path
    ///
    /// No shape check is applied: a client may open a channel for a name that
    /// was never uploaded, which simply yields a new, empty session.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse an identifier that must have the generated shape
    pub fn parse(s: &str) -> Result<Self, SessionIdError> {
        if s.len() != Self::HEX_LEN {
            return Err(SessionIdError::InvalidLength {
                expected: Self::HEX_LEN,
                actual: s.len(),
            });
        }

        if let Some(c) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(SessionIdError::InvalidCharacter(c));
        }

        Ok(Self(s.to_string()))
    }

    /// Get the identifier as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when parsing a generated session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionIdError {
    #[error("invalid session id length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid character in session id: {0:?}")]
    InvalidCharacter(char),
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = SessionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}
