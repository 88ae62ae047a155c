//! Text encodings for keys, shares and envelopes.
//!
//! Everything is standard padded base64. A share is `base64(index || value)`
//! where `value` has exactly [`KEY_LENGTH`] bytes. These formats are part of the
//! compatibility contract for shares already handed out: do not change them.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroize;

use crate::aead::Envelope;
use crate::error::{Error, Result};
use crate::keys::{MasterKey, KEY_LENGTH};
use crate::share::Share;

/// Decoded length of a key share: one index byte followed by the value.
pub const SHARE_LENGTH: usize = 1 + KEY_LENGTH;

pub fn encode_key(key: &MasterKey) -> String {
    STANDARD.encode(key.as_bytes())
}

pub fn decode_key(text: &str) -> Result<MasterKey> {
    let mut bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| Error::Encoding(format!("Key is not valid base64: {}", e)))?;
    let key = MasterKey::from_slice(&bytes).map_err(|_| {
        Error::Encoding(format!(
            "Key must decode to {} bytes, got {}",
            KEY_LENGTH,
            bytes.len()
        ))
    });
    bytes.zeroize();
    key
}

pub fn encode_share(share: &Share) -> String {
    let mut bytes = Vec::from(share);
    let text = STANDARD.encode(&bytes);
    bytes.zeroize();
    text
}

/// Decode one key share. `position` is the entry's place in the caller's list
/// and is reported back in [`Error::MalformedShare`].
pub fn decode_share(text: &str, position: usize) -> Result<Share> {
    let mut bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| Error::malformed(position, format!("not valid base64: {}", e)))?;

    let share = if bytes.len() != SHARE_LENGTH {
        Err(Error::malformed(
            position,
            format!("expected {} bytes, got {}", SHARE_LENGTH, bytes.len()),
        ))
    } else {
        Share::try_from(bytes.as_slice()).map_err(|reason| Error::malformed(position, reason))
    };

    bytes.zeroize();
    share
}

/// Decode a list of share texts, failing on the first malformed entry.
pub fn decode_shares<S: AsRef<str>>(texts: &[S]) -> Result<Vec<Share>> {
    texts
        .iter()
        .enumerate()
        .map(|(position, text)| decode_share(text.as_ref(), position))
        .collect()
}

/// Split pasted or file-loaded text into share entries, one per line.
/// Blank lines and surrounding whitespace are dropped.
pub fn split_share_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn encode_envelope(envelope: &Envelope) -> String {
    STANDARD.encode(envelope.to_bytes())
}

pub fn decode_envelope(text: &str) -> Result<Envelope> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Encoding("Ciphertext is empty".to_string()));
    }
    let bytes = STANDARD
        .decode(text)
        .map_err(|e| Error::Encoding(format!("Ciphertext is not valid base64: {}", e)))?;
    Envelope::from_bytes(&bytes)
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_bytes(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| Error::Encoding(format!("Text is not valid base64: {}", e)))
}
