//! Key derivation using Argon2id.
//!
//! The salt is a fixed constant embedded in the crate: the same password under
//! the same [`KdfParams`] always yields the same [`MasterKey`], which lets the
//! caller show the derived key back to the user. Changing either the salt or
//! the default parameters changes every derived key.

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::keys::{MasterKey, KEY_LENGTH};

/// Salt embedded in every derivation.
pub const KDF_SALT: &[u8; 32] = b"sharelock/argon2id/v1/fixed-salt";

/// Parameters for Argon2id key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB (e.g., 65536 = 64 MiB).
    pub memory_cost: u32,
    /// Number of iterations.
    pub time_cost: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl KdfParams {
    /// Create parameters suitable for interactive use.
    pub fn interactive() -> Self {
        Self {
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 4,
        }
    }

    /// Higher security parameters that may take several seconds.
    pub fn sensitive() -> Self {
        Self {
            memory_cost: 262144, // 256 MiB
            time_cost: 4,
            parallelism: 4,
        }
    }

    /// Create moderate parameters for constrained devices.
    pub fn moderate() -> Self {
        Self {
            memory_cost: 32768, // 32 MiB
            time_cost: 3,
            parallelism: 2,
        }
    }

    fn to_argon2(self) -> Result<Params> {
        Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(KEY_LENGTH),
        )
        .map_err(|e| Error::InvalidInput(format!("Invalid KDF parameters: {}", e)))
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Derive a master key from a password using Argon2id and the embedded salt.
///
/// # Errors
/// - [`Error::InvalidInput`] if the password is empty
/// - [`Error::InvalidInput`] if the Argon2id parameters are out of range
pub fn derive_key(password: &str, params: &KdfParams) -> Result<MasterKey> {
    if password.is_empty() {
        return Err(Error::InvalidInput("Password cannot be empty".to_string()));
    }

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_argon2()?);

    let mut key_bytes = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(password.as_bytes(), KDF_SALT, &mut key_bytes)
        .map_err(|e| Error::InvalidInput(format!("Key derivation failed: {}", e)))?;

    debug!(
        memory_cost = params.memory_cost,
        time_cost = params.time_cost,
        parallelism = params.parallelism,
        "Derived master key"
    );

    let key = MasterKey::from_bytes(key_bytes);
    key_bytes.zeroize();
    Ok(key)
}

#[cfg(test)]
pub(crate) fn test_params() -> KdfParams {
    KdfParams {
        memory_cost: 64,
        time_cost: 1,
        parallelism: 1,
    }
}
