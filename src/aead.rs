//! Authenticated encryption using XChaCha20-Poly1305.
//!
//! XChaCha20-Poly1305 provides both confidentiality and authenticity, with a
//! 24-byte nonce that is safe for random generation. An [`Envelope`] is the
//! serialized `nonce || ciphertext || tag` produced by one [`seal`] call.

use chacha20poly1305::{
    aead::{generic_array::GenericArray, Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use rand::CryptoRng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::keys::MasterKey;

/// Nonce size for XChaCha20-Poly1305 (24 bytes).
pub const NONCE_SIZE: usize = 24;

/// Authentication tag size (16 bytes).
pub const TAG_SIZE: usize = 16;

/// Nonce, encrypted payload and tag of a single encryption.
#[derive(Clone, PartialEq, Eq)]
pub struct Envelope {
    nonce: [u8; NONCE_SIZE],
    // ciphertext || tag
    sealed: Vec<u8>,
}

impl Envelope {
    /// Length of the encrypted payload, excluding nonce and tag.
    pub fn payload_len(&self) -> usize {
        self.sealed.len() - TAG_SIZE
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(NONCE_SIZE + self.sealed.len());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.sealed);
        bytes
    }

    /// Parse `nonce || ciphertext || tag`.
    ///
    /// Only the length is checked here; integrity is checked by [`open`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NONCE_SIZE + TAG_SIZE {
            return Err(Error::Encoding(format!(
                "Ciphertext too short: expected at least {} bytes, got {}",
                NONCE_SIZE + TAG_SIZE,
                bytes.len()
            )));
        }

        let (nonce_bytes, sealed) = bytes.split_at(NONCE_SIZE);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(nonce_bytes);

        Ok(Self {
            nonce,
            sealed: sealed.to_vec(),
        })
    }
}

impl core::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Envelope")
            .field("nonce", &self.nonce)
            .field("sealed_len", &self.sealed.len())
            .finish()
    }
}

/// Encrypt `plaintext` under `key` with a fresh random nonce drawn from `rng`.
///
/// `aad` is authenticated but not encrypted; the same bytes must be passed to [`open`].
pub fn seal<R: CryptoRng>(
    key: &MasterKey,
    plaintext: &[u8],
    aad: &[u8],
    rng: &mut R,
) -> Result<Envelope> {
    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(key.as_bytes()));
    let sealed = cipher
        .encrypt(
            XNonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| Error::InvalidInput(format!("Encryption failed: {}", e)))?;

    debug!(plaintext_len = plaintext.len(), "Sealed envelope");

    Ok(Envelope { nonce, sealed })
}

/// Encrypt with the thread-local CSPRNG.
pub fn seal_random(key: &MasterKey, plaintext: &[u8], aad: &[u8]) -> Result<Envelope> {
    seal(key, plaintext, aad, &mut rand::rng())
}

/// Decrypt and authenticate an envelope.
///
/// Fails closed: on tag mismatch [`Error::AuthenticationFailure`] is returned and
/// no plaintext is released.
pub fn open(key: &MasterKey, envelope: &Envelope, aad: &[u8]) -> Result<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(key.as_bytes()));

    cipher
        .decrypt(
            XNonce::from_slice(&envelope.nonce),
            Payload {
                msg: &envelope.sealed,
                aad,
            },
        )
        .map_err(|_| {
            debug!(sealed_len = envelope.sealed.len(), "Envelope failed authentication");
            Error::AuthenticationFailure
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KEY_LENGTH;
    use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};

    fn key(byte: u8) -> MasterKey {
        MasterKey::from_bytes([byte; KEY_LENGTH])
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let mut rng = ChaCha20Rng::from_seed([7; 32]);
        let plaintext = b"Hello, World!";

        let envelope = seal(&key(42), plaintext, b"", &mut rng).unwrap();
        let decrypted = open(&key(42), &envelope, b"").unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_envelope_size() {
        let plaintext = b"Test message";

        let envelope = seal_random(&key(42), plaintext, b"").unwrap();

        assert_eq!(envelope.payload_len(), plaintext.len());
        assert_eq!(
            envelope.to_bytes().len(),
            NONCE_SIZE + plaintext.len() + TAG_SIZE
        );
    }

    #[test]
    fn test_different_nonce_each_time() {
        let plaintext = b"Same plaintext";

        let ct1 = seal_random(&key(42), plaintext, b"").unwrap();
        let ct2 = seal_random(&key(42), plaintext, b"").unwrap();

        assert_ne!(ct1.to_bytes()[..NONCE_SIZE], ct2.to_bytes()[..NONCE_SIZE]);
        assert_ne!(ct1.to_bytes(), ct2.to_bytes());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = seal(&key(1), b"abc", b"", &mut ChaCha20Rng::from_seed([3; 32])).unwrap();
        let b = seal(&key(1), b"abc", b"", &mut ChaCha20Rng::from_seed([3; 32])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let envelope = seal_random(&key(1), b"Secret data", b"").unwrap();
        assert_eq!(
            open(&key(2), &envelope, b""),
            Err(Error::AuthenticationFailure)
        );
    }

    #[test]
    fn test_wrong_aad_fails() {
        let envelope = seal_random(&key(1), b"Secret data", b"report.pdf").unwrap();
        assert_eq!(
            open(&key(1), &envelope, b"other.pdf"),
            Err(Error::AuthenticationFailure)
        );
        assert!(open(&key(1), &envelope, b"report.pdf").is_ok());
    }

    #[test]
    fn test_any_flipped_byte_fails() {
        let bytes = seal_random(&key(42), b"Important data", b"")
            .unwrap()
            .to_bytes();

        for i in 0..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;
            let envelope = Envelope::from_bytes(&tampered).unwrap();
            assert_eq!(
                open(&key(42), &envelope, b""),
                Err(Error::AuthenticationFailure),
                "flip at byte {} was not detected",
                i
            );
        }
    }

    #[test]
    fn test_short_envelope_rejected() {
        assert!(matches!(
            Envelope::from_bytes(&[0u8; NONCE_SIZE + TAG_SIZE - 1]),
            Err(Error::Encoding(_))
        ));
        // An empty plaintext still produces a well-formed envelope.
        assert!(Envelope::from_bytes(&[0u8; NONCE_SIZE + TAG_SIZE]).is_ok());
    }

    #[test]
    fn test_empty_plaintext() {
        let envelope = seal_random(&key(42), b"", b"").unwrap();
        assert_eq!(open(&key(42), &envelope, b"").unwrap(), b"");
    }

    #[test]
    fn test_large_plaintext() {
        let plaintext = vec![0xABu8; 1_000_000]; // 1 MB

        let envelope = seal_random(&key(42), &plaintext, b"").unwrap();
        let decrypted = open(&key(42), &envelope, b"").unwrap();

        assert_eq!(decrypted, plaintext);
    }
}
