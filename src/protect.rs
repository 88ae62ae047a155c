//! The four operations offered to the caller, with typed results.
//!
//! Inputs and outputs are text in the formats of [`crate::encoding`]. Each call is
//! independent; a [`Protector`] only carries its [`Config`].

use core::fmt;

use rand::CryptoRng;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::aead;
use crate::config::Config;
use crate::encoding;
use crate::error::Result;
use crate::kdf::derive_key;
use crate::keys::MasterKey;
use crate::SecretSharing;

/// Associated data bound into every envelope produced here. It tags the
/// envelope format so a future framing cannot be confused with this one.
pub const ENVELOPE_AAD: &[u8] = b"sharelock/envelope/v1";

/// Output of [`Protector::encrypt`]: the derived key and the ciphertext, both as text.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Protected {
    pub key: String,
    pub ciphertext: String,
}

impl fmt::Debug for Protected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Protected")
            .field("key", &"[REDACTED]")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Protector {
    config: Config,
}

impl Protector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Derive a key from `password` and encrypt `plaintext` under it.
    pub fn encrypt(&self, password: &str, plaintext: &[u8]) -> Result<Protected> {
        self.encrypt_with_rng(password, plaintext, &mut rand::rng())
    }

    pub fn encrypt_with_rng<R: CryptoRng>(
        &self,
        password: &str,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Protected> {
        let key = derive_key(password, &self.config.kdf)?;
        let envelope = aead::seal(&key, plaintext, ENVELOPE_AAD, rng)?;

        debug!(plaintext_len = plaintext.len(), "Encrypted payload");

        Ok(Protected {
            key: encoding::encode_key(&key),
            ciphertext: encoding::encode_envelope(&envelope),
        })
    }

    /// Split a key into `total_shares` share texts, any `threshold` of which recover it.
    ///
    /// The result is ordered by share index (1 to `total_shares`).
    pub fn generate_shares(
        &self,
        key: &str,
        threshold: usize,
        total_shares: usize,
    ) -> Result<Vec<String>> {
        self.generate_shares_with_rng(key, threshold, total_shares, &mut rand::rng())
    }

    pub fn generate_shares_with_rng<R: CryptoRng>(
        &self,
        key: &str,
        threshold: usize,
        total_shares: usize,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        let sss = SecretSharing::new(threshold, total_shares)?;
        let key = encoding::decode_key(key)?;
        let shares = sss.split_rng(key.as_bytes(), rng)?;

        Ok(shares.iter().map(encoding::encode_share).collect())
    }

    /// Rebuild the key text from two or more share texts.
    ///
    /// Supplying fewer shares than the split threshold, or shares from different
    /// splits, yields a wrong key; it is caught by [`decrypt`](Self::decrypt).
    pub fn recover_key<S: AsRef<str>>(&self, shares: &[S]) -> Result<String> {
        let shares = encoding::decode_shares(shares)?;
        let mut secret = crate::recover(&shares)?;
        let key = MasterKey::from_slice(&secret);
        secret.zeroize();

        Ok(encoding::encode_key(&key?))
    }

    /// Same as [`recover_key`](Self::recover_key) for a keys file: one share per line.
    pub fn recover_key_from_text(&self, text: &str) -> Result<String> {
        self.recover_key(&encoding::split_share_lines(text))
    }

    /// Decrypt a ciphertext text with a key text.
    pub fn decrypt(&self, key: &str, ciphertext: &str) -> Result<Vec<u8>> {
        let key = encoding::decode_key(key)?;
        let envelope = encoding::decode_envelope(ciphertext)?;
        let plaintext = aead::open(&key, &envelope, ENVELOPE_AAD)?;

        debug!(plaintext_len = plaintext.len(), "Decrypted payload");

        Ok(plaintext)
    }
}
