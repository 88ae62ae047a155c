//! Error types shared by every layer of the crate.

use thiserror::Error;

/// Errors returned by key derivation, encryption and secret sharing.
///
/// The boundary adapter collapses these into marker-prefixed text; everything
/// below it keeps the structured kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter is out of range: empty password, bad threshold or share count,
    /// invalid KDF parameters or configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A share could not be decoded or does not fit with the others.
    /// `index` is the zero-based position of the entry in the caller's list.
    #[error("malformed share #{}: {reason}", .index + 1)]
    MalformedShare { index: usize, reason: String },

    /// Fewer than two distinct shares were supplied.
    #[error("insufficient shares: got {usable} usable, at least 2 are required")]
    InsufficientShares { usable: usize },

    /// The ciphertext tag did not verify: wrong key, or the envelope was altered.
    #[error("authentication failed: wrong key or corrupted ciphertext")]
    AuthenticationFailure,

    /// Text at the boundary is not valid in the expected encoding.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl Error {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Error::MalformedShare {
            index,
            reason: reason.into(),
        }
    }
}

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
