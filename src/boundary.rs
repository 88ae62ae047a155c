//! String adapter for collaborators that branch on a failure marker.
//!
//! Every reply is plain text. Errors are rendered as `"ERROR: <message>"` and
//! values are base64. Base64 never contains `':'` or `' '`, so [`is_failure`]
//! matches the marker together with its `": "` separator.
//!
//! A bare `"ERROR"` prefix is not enough to tell the two apart: base64 can start
//! with it, e.g. the decrypt reply for a plaintext beginning `11 14 4e 44` is
//! `"ERRORAAA"`. Callers that only test `startsWith("ERROR")` misread such replies.

use tracing::warn;

use crate::config::Config;
use crate::encoding;
use crate::error::Error;
use crate::protect::Protector;

/// Prefix of every failure reply.
pub const FAILURE_MARKER: &str = "ERROR";

/// Suffix appended to the name of an encrypted file.
pub const ENCRYPTED_SUFFIX: &str = ".aes";

/// Whether a reply is an error message.
pub fn is_failure(reply: &str) -> bool {
    reply
        .strip_prefix(FAILURE_MARKER)
        .is_some_and(|rest| rest.starts_with(": "))
}

/// Render an error as a failure reply.
pub fn failure(err: &Error) -> String {
    format!("{}: {}", FAILURE_MARKER, err)
}

/// Name of the encrypted output for `name`.
pub fn encrypted_file_name(name: &str) -> String {
    format!("{}{}", name, ENCRYPTED_SUFFIX)
}

/// Name of the decrypted output: strips [`ENCRYPTED_SUFFIX`] when present.
pub fn decrypted_file_name(name: &str) -> String {
    name.strip_suffix(ENCRYPTED_SUFFIX).unwrap_or(name).to_string()
}

/// Text-in, text-out front of a [`Protector`].
#[derive(Debug, Clone, Default)]
pub struct Boundary {
    protector: Protector,
}

impl Boundary {
    pub fn new(config: Config) -> Self {
        Self {
            protector: Protector::new(config),
        }
    }

    /// Returns `[key, ciphertext]`, or a single failure reply.
    pub fn encrypt(&self, password: &str, plaintext: &[u8]) -> Vec<String> {
        match self.protector.encrypt(password, plaintext) {
            Ok(protected) => vec![protected.key.clone(), protected.ciphertext.clone()],
            Err(err) => vec![reply_failure("encrypt", &err)],
        }
    }

    /// Returns `total_shares` share texts in index order, or a single failure reply.
    pub fn generate_shares(&self, key: &str, threshold: usize, total_shares: usize) -> Vec<String> {
        match self.protector.generate_shares(key, threshold, total_shares) {
            Ok(shares) => shares,
            Err(err) => vec![reply_failure("generate_shares", &err)],
        }
    }

    /// Returns the key text, or a failure reply.
    pub fn recover_key<S: AsRef<str>>(&self, shares: &[S]) -> String {
        self.protector
            .recover_key(shares)
            .unwrap_or_else(|err| reply_failure("recover_key", &err))
    }

    /// Same as [`recover_key`](Self::recover_key) for the contents of a keys file.
    pub fn recover_key_from_text(&self, text: &str) -> String {
        self.protector
            .recover_key_from_text(text)
            .unwrap_or_else(|err| reply_failure("recover_key", &err))
    }

    /// Returns the plaintext as base64 text, or a failure reply.
    pub fn decrypt(&self, key: &str, ciphertext: &str) -> String {
        match self.protector.decrypt(key, ciphertext) {
            Ok(plaintext) => encoding::encode_bytes(&plaintext),
            Err(err) => reply_failure("decrypt", &err),
        }
    }
}

fn reply_failure(operation: &str, err: &Error) -> String {
    warn!(operation, error = %err, "Operation failed");
    failure(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::test_params;
    use rstest::rstest;

    fn boundary() -> Boundary {
        Boundary::new(Config::new(test_params()))
    }

    #[rstest]
    #[case("report.pdf", "report.pdf.aes")]
    #[case("archive.tar.gz", "archive.tar.gz.aes")]
    #[case("noext", "noext.aes")]
    fn encrypted_name_appends_suffix(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(encrypted_file_name(name), expected);
    }

    #[rstest]
    #[case("report.pdf.aes", "report.pdf")]
    #[case("report.pdf", "report.pdf")]
    #[case("report.aes.txt", "report.aes.txt")]
    #[case("report.AES", "report.AES")]
    #[case("x.aes.aes", "x.aes")]
    fn decrypted_name_strips_suffix(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(decrypted_file_name(name), expected);
    }

    #[test]
    fn failure_replies_carry_marker() {
        let reply = failure(&Error::AuthenticationFailure);
        assert!(reply.starts_with("ERROR: "));
        assert!(is_failure(&reply));
        assert!(!is_failure("AQAAAA=="));
        assert!(!is_failure("ERRORAAA"));
        assert!(!is_failure("ERROR"));
    }

    #[test]
    fn plaintext_encoding_to_marker_is_not_a_failure() {
        let b = boundary();
        let plaintext = [0x11, 0x14, 0x4E, 0x44, 0x00, 0x00];
        let out = b.encrypt("pw", &plaintext);
        assert_eq!(out.len(), 2);

        let reply = b.decrypt(&out[0], &out[1]);
        assert_eq!(reply, "ERRORAAA");
        assert!(!is_failure(&reply));
        assert_eq!(encoding::decode_bytes(&reply).unwrap(), plaintext);
    }

    #[test]
    fn full_flow_through_text() {
        let b = boundary();
        let out = b.encrypt("correct-horse", b"hello world");
        assert_eq!(out.len(), 2);
        assert!(!is_failure(&out[0]) && !is_failure(&out[1]));

        let shares = b.generate_shares(&out[0], 3, 5);
        assert_eq!(shares.len(), 5);

        let key = b.recover_key(&shares[2..]);
        assert_eq!(key, out[0]);

        let plaintext = b.decrypt(&key, &out[1]);
        assert_eq!(encoding::decode_bytes(&plaintext).unwrap(), b"hello world");
    }

    #[test]
    fn errors_become_single_failure_reply() {
        let b = boundary();

        let out = b.encrypt("", b"data");
        assert_eq!(out.len(), 1);
        assert!(is_failure(&out[0]));

        let out = b.generate_shares("bad key", 2, 3);
        assert_eq!(out.len(), 1);
        assert!(is_failure(&out[0]));

        assert!(is_failure(&b.recover_key(&["only-one"])));
        assert!(is_failure(&b.recover_key_from_text("")));
        assert!(is_failure(&b.decrypt("bad key", "bad ciphertext")));
    }

    #[test]
    fn malformed_share_reply_names_entry() {
        let b = boundary();
        let key = b.encrypt("pw", b"data").remove(0);
        let mut shares = b.generate_shares(&key, 2, 3);
        shares[1].pop();

        let reply = b.recover_key(&shares);
        assert!(reply.starts_with("ERROR: malformed share #2"), "{}", reply);
    }
}
