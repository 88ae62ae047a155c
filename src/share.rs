use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::field::GF256;

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

/// A share used to reconstruct the secret. Can be serialized to and from a byte array.
///
/// `x` is the share index (never zero) and is reused for every byte position of
/// the secret; `y` holds one polynomial evaluation per secret byte.
///
/// Usage example:
/// ```
/// use sharelock::{SecretSharing, Share};
/// use core::convert::TryFrom;
/// # use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};
///
/// let sss = SecretSharing::new(2, 3).unwrap();
/// let mut rng = ChaCha20Rng::from_seed([0x90; 32]);
/// let shares = sss.split_rng(&[1, 2, 3], &mut rng).unwrap();
///
/// // Serialize a share as `[x, y...]` and read it back
/// let bytes = Vec::from(&shares[0]);
/// assert_eq!(bytes.len(), 4);
/// let share = Share::try_from(bytes.as_slice()).unwrap();
/// assert_eq!(share.x, shares[0].x);
/// ```
///
/// # Serialization format:
/// `Vec<u8>` representation is `[x, y...]` (first byte is `x`).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
pub struct Share {
    /// The x coordinate of the share.
    pub x: GF256,
    /// The y coordinates of the share.
    pub y: Vec<GF256>,
}

impl Share {
    /// The share index as a plain byte.
    pub fn index(&self) -> u8 {
        self.x.0
    }

    /// Number of secret bytes this share covers.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("x", &self.x.0)
            .field("y", &format_args!("[REDACTED; {}]", self.y.len()))
            .finish()
    }
}

/// Converts a Share to a vector of bytes, where the first byte is the x value and the rest are the y values.
impl From<&Share> for Vec<u8> {
    fn from(s: &Share) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(s.y.len() + 1);
        bytes.push(s.x.0);
        bytes.extend(s.y.iter().map(|p| p.0));
        bytes
    }
}

impl core::convert::TryFrom<&[u8]> for Share {
    type Error = &'static str;

    fn try_from(s: &[u8]) -> Result<Share, Self::Error> {
        if s.len() < 2 {
            Err("A Share must be at least 2 bytes long")
        } else if s[0] == 0 {
            Err("A Share index must not be zero")
        } else {
            let x = GF256(s[0]);
            let y = s[1..].iter().map(|p| GF256(*p)).collect();
            Ok(Share { x, y })
        }
    }
}
