//! Password-based encryption with [Shamir's Secret Sharing](https://en.wikipedia.org/wiki/Shamir%27s_Secret_Sharing)
//! of the encryption key.
//!
//! A file is encrypted under a key derived from a password, and the key is split into
//! `N` shares such that any `T` of them rebuild it exactly while fewer than `T` reveal
//! nothing about it.
//!
//! - Key derivation: Argon2id with an embedded salt ([`kdf`])
//! - Encryption: XChaCha20-Poly1305 envelopes ([`aead`])
//! - Splitting and recovery: byte-wise polynomials over GF(256) ([`SecretSharing`], [`recover`])
//! - Text formats: base64 keys, shares and ciphertexts ([`encoding`])
//!
//! # Usage
//!
//! ```
//! use sharelock::{Config, KdfParams, Protector};
//!
//! # let config = Config::new(KdfParams { memory_cost: 64, time_cost: 1, parallelism: 1 });
//! let protector = Protector::new(config);
//! let protected = protector.encrypt("correct-horse", b"hello world").unwrap();
//!
//! // Split the key into 5 shares, any 3 of which recover it
//! let shares = protector.generate_shares(&protected.key, 3, 5).unwrap();
//! let key = protector.recover_key(&[&shares[4], &shares[0], &shares[2]]).unwrap();
//! assert_eq!(key, protected.key);
//!
//! let plaintext = protector.decrypt(&key, &protected.ciphertext).unwrap();
//! assert_eq!(plaintext, b"hello world");
//! ```
//!
//! ## Raw secret sharing
//!
//! ```
//! use sharelock::{recover, SecretSharing};
//! use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};
//!
//! // Any 3 out of 5 shares recover the secret
//! let sss = SecretSharing::new(3, 5).unwrap();
//! let mut rng = ChaCha20Rng::from_seed([0x90; 32]);
//! let shares = sss.split_rng(&[1, 2, 3, 4], &mut rng).unwrap();
//! let secret = recover(&shares[1..4]).unwrap();
//! assert_eq!(secret, vec![1, 2, 3, 4]);
//! ```
//!
//! # Field
//!
//! Arithmetic is done in GF(256) reduced by the AES (Rijndael) polynomial `0x11B`.
//! Changing it invalidates every share already handed out.
//!
//! # Feature flags
//!
//! - `fuzzing` — derives `Arbitrary` on [`Share`] and the field element for the fuzz targets.

pub mod aead;
pub mod boundary;
pub mod config;
pub mod encoding;
pub mod error;
mod field;
pub mod kdf;
pub mod keys;
mod math;
pub mod protect;
mod share;

use hashbrown::HashSet;
use rand::CryptoRng;
use tracing::debug;
use zeroize::Zeroize;

pub use config::Config;
pub use error::{Error, Result};
pub use field::GF256;
pub use kdf::{derive_key, KdfParams};
pub use keys::{MasterKey, KEY_LENGTH};
pub use protect::{Protected, Protector};
pub use share::Share;

/// Smallest number of shares a split may produce.
pub const MIN_SHARES: usize = 3;

/// Largest number of shares a split may produce: one per non-zero field element.
pub const MAX_SHARES: usize = u8::MAX as usize;

/// Smallest threshold accepted by a split.
pub const MIN_THRESHOLD: usize = 2;

/// Validated `(threshold, shares)` parameters for splitting a secret over GF(256).
///
/// Usage example:
/// ```
/// # use sharelock::{recover, SecretSharing};
/// // Any 2 out of 3 shares recover the secret
/// let sss = SecretSharing::new(2, 3).unwrap();
/// let shares = sss.split(&[1, 2, 3, 4]).unwrap();
/// assert_eq!(shares.len(), 3);
/// assert_eq!(recover(&shares[..2]).unwrap(), vec![1, 2, 3, 4]);
///
/// // Out of range parameters are rejected
/// assert!(SecretSharing::new(1, 5).is_err());
/// assert!(SecretSharing::new(3, 2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretSharing {
    threshold: u8,
    shares: u8,
}

impl SecretSharing {
    /// Checks `3 <= shares <= 255` and `2 <= threshold <= shares`.
    pub fn new(threshold: usize, shares: usize) -> Result<Self> {
        if shares < MIN_SHARES {
            return Err(Error::InvalidInput(format!(
                "Number of shares must be at least {}, got {}",
                MIN_SHARES, shares
            )));
        }
        if shares > MAX_SHARES {
            return Err(Error::InvalidInput(format!(
                "Number of shares must be at most {}, got {}",
                MAX_SHARES, shares
            )));
        }
        if threshold < MIN_THRESHOLD || threshold > shares {
            return Err(Error::InvalidInput(format!(
                "Threshold must be between {} and the number of shares ({}), got {}",
                MIN_THRESHOLD, shares, threshold
            )));
        }

        Ok(Self {
            threshold: threshold as u8,
            shares: shares as u8,
        })
    }

    pub fn threshold(&self) -> usize {
        self.threshold as usize
    }

    pub fn shares(&self) -> usize {
        self.shares as usize
    }

    /// Given a `secret` byte slice, returns `shares` new shares with indices `1..=shares`.
    ///
    /// Every byte of the secret gets its own polynomial of degree `threshold - 1`
    /// whose higher coefficients are drawn from `rng`; a share is the evaluation of
    /// all of them at the same index. Each call draws fresh coefficients, so two
    /// splits of the same secret give unrelated share sets.
    ///
    /// Example:
    /// ```
    /// # use sharelock::SecretSharing;
    /// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// let sss = SecretSharing::new(3, 4).unwrap();
    /// let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
    /// let shares = sss.split_rng(&[1, 2], &mut rng).unwrap();
    /// assert_eq!(shares.len(), 4);
    /// assert_eq!(shares[3].index(), 4);
    /// ```
    pub fn split_rng<R: CryptoRng>(&self, secret: &[u8], rng: &mut R) -> Result<Vec<Share>> {
        if secret.is_empty() {
            return Err(Error::InvalidInput("Secret cannot be empty".to_string()));
        }

        let mut polys = Vec::with_capacity(secret.len());
        for byte in secret {
            polys.push(math::random_polynomial(GF256(*byte), self.threshold, rng));
        }

        let shares = math::get_evaluator(&polys)
            .take(self.shares as usize)
            .collect::<Vec<Share>>();
        polys.zeroize();

        debug!(
            threshold = self.threshold,
            shares = self.shares,
            secret_len = secret.len(),
            "Split secret"
        );

        Ok(shares)
    }

    /// Same as [`split_rng`](Self::split_rng) with the thread-local CSPRNG.
    pub fn split(&self, secret: &[u8]) -> Result<Vec<Share>> {
        self.split_rng(secret, &mut rand::rng())
    }
}

/// Given a collection of shares, recovers the original secret.
///
/// The threshold is not encoded in the shares, so any two or more distinct shares are
/// interpolated. With fewer shares than the split's threshold the result is a wrong
/// secret, not an error; integrity has to be checked by whoever uses the secret (for
/// the master key, the envelope tag does this).
///
/// Shares repeating an index already seen are skipped.
///
/// # Errors
/// - [`Error::MalformedShare`] for an empty share, a zero index, or a share whose
///   length differs from the first one
/// - [`Error::InsufficientShares`] when fewer than two distinct indices remain
///
/// Example:
/// ```
/// # use sharelock::{recover, Error, SecretSharing};
/// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
/// # let sss = SecretSharing::new(3, 3).unwrap();
/// # let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
/// let mut shares = sss.split_rng(&[1], &mut rng).unwrap();
/// // Recover original secret from shares
/// assert_eq!(recover(&shares).unwrap(), vec![1]);
/// // Not enough shares to recover anything
/// shares.truncate(1);
/// assert_eq!(recover(&shares), Err(Error::InsufficientShares { usable: 1 }));
/// ```
pub fn recover<'a, T>(shares: T) -> Result<Vec<u8>>
where
    T: IntoIterator<Item = &'a Share>,
{
    let mut share_length: Option<usize> = None;
    let mut keys: HashSet<u8> = HashSet::new();
    let mut values: Vec<Share> = Vec::new();

    for (i, share) in shares.into_iter().enumerate() {
        if share.is_empty() {
            return Err(Error::malformed(i, "share has no value bytes"));
        }
        if share.x == GF256::ZERO {
            return Err(Error::malformed(i, "share index must not be zero"));
        }

        let expected = *share_length.get_or_insert(share.len());
        if share.len() != expected {
            return Err(Error::malformed(
                i,
                format!(
                    "all shares must have the same length: expected {}, got {}",
                    expected,
                    share.len()
                ),
            ));
        }

        if keys.insert(share.index()) {
            values.push(share.clone());
        } else {
            debug!(index = share.index(), "Skipping share with duplicate index");
        }
    }

    if values.len() < MIN_THRESHOLD {
        return Err(Error::InsufficientShares {
            usable: values.len(),
        });
    }

    debug!(shares = values.len(), "Recovering secret");
    Ok(math::interpolate(&values))
}
