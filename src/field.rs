// Arithmetic over GF(2^8) reduced by the AES polynomial x^8 + x^4 + x^3 + x + 1.
//
// Multiplication and division go through log/exp tables built at compile time
// from the generator 0x03. The exp table is doubled so that `log a + log b`
// never needs a modular reduction.

use core::iter::{Product, Sum};
use core::ops::{Add, Div, Mul, Sub};

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

use zeroize::Zeroize;

/// Irreducible polynomial defining the field.
pub const POLY: u16 = 0x11b;

const GENERATOR: u8 = 0x03;

const fn xtime_mul(a: u8, b: u8) -> u8 {
    let mut a = a as u16;
    let mut b = b;
    let mut acc: u16 = 0;
    while b != 0 {
        if b & 1 == 1 {
            acc ^= a;
        }
        a <<= 1;
        if a & 0x100 != 0 {
            a ^= POLY;
        }
        b >>= 1;
    }
    acc as u8
}

const fn build_exp() -> [u8; 510] {
    let mut exp = [0u8; 510];
    let mut x: u8 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x;
        exp[i + 255] = x;
        x = xtime_mul(x, GENERATOR);
        i += 1;
    }
    exp
}

const fn build_log(exp: &[u8; 510]) -> [u8; 256] {
    let mut log = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }
    log
}

const EXP_TABLE: [u8; 510] = build_exp();

static EXP: [u8; 510] = EXP_TABLE;
static LOG: [u8; 256] = build_log(&EXP_TABLE);

/// An element of GF(256).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Zeroize)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
pub struct GF256(pub u8);

impl GF256 {
    pub const ZERO: Self = GF256(0);
    pub const ONE: Self = GF256(1);

    /// Multiplicative inverse, `None` for zero.
    pub fn inverse(self) -> Option<Self> {
        if self.0 == 0 {
            None
        } else {
            Some(GF256(EXP[255 - LOG[self.0 as usize] as usize]))
        }
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Add for GF256 {
    type Output = GF256;

    fn add(self, other: Self) -> Self::Output {
        GF256(self.0 ^ other.0)
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for GF256 {
    type Output = GF256;

    fn sub(self, other: Self) -> Self::Output {
        GF256(self.0 ^ other.0)
    }
}

impl Mul for GF256 {
    type Output = GF256;

    fn mul(self, other: Self) -> Self::Output {
        if self.0 == 0 || other.0 == 0 {
            return GF256::ZERO;
        }
        let log_sum = LOG[self.0 as usize] as usize + LOG[other.0 as usize] as usize;
        GF256(EXP[log_sum])
    }
}

/// Division by zero panics; callers only divide by differences of distinct share indices.
impl Div for GF256 {
    type Output = GF256;

    fn div(self, other: Self) -> Self::Output {
        assert_ne!(other.0, 0, "division by zero in GF(256)");
        if self.0 == 0 {
            return GF256::ZERO;
        }
        let log_diff = LOG[self.0 as usize] as usize + 255 - LOG[other.0 as usize] as usize;
        GF256(EXP[log_diff])
    }
}

impl Sum for GF256 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(GF256::ZERO, |acc, x| acc + x)
    }
}

impl Product for GF256 {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(GF256::ONE, |acc, x| acc * x)
    }
}
