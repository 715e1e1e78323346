//! Arbitrary-precision non-negative integers.
//!
//! [`BigNat`] is the single integer type used for moduli, generators, exponents, public
//! values and shared secrets. It is backed by `num_bigint::BigUint`, so every operation
//! works on dynamically sized storage and never truncates.

use core::fmt;
use core::ops::{Add, Mul, Rem, ShrAssign};
use core::str::FromStr;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use thiserror::Error;

use crate::error::DhError;

/// Why a decimal string could not be parsed as a [`BigNat`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseBigNatError {
    #[error("empty string")]
    Empty,
    #[error("negative value")]
    Negative,
    #[error("non-decimal character at offset {0}")]
    InvalidDigit(usize),
}

/// Non-negative integer of unbounded magnitude.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigNat(BigUint);

impl BigNat {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn one() -> Self {
        Self(BigUint::one())
    }

    pub fn from_u64(n: u64) -> Self {
        Self(BigUint::from(n))
    }

    /// Parse a plain decimal string (`[0-9]+`).
    ///
    /// Signs, whitespace and digit separators are rejected so that `"-5"` can never be
    /// mistaken for `5`.
    pub fn from_decimal_str(s: &str) -> Result<Self, ParseBigNatError> {
        if s.is_empty() {
            return Err(ParseBigNatError::Empty);
        }
        if s.starts_with('-') {
            return Err(ParseBigNatError::Negative);
        }
        if let Some(pos) = s.bytes().position(|b| !b.is_ascii_digit()) {
            return Err(ParseBigNatError::InvalidDigit(pos));
        }

        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or(ParseBigNatError::InvalidDigit(0))
    }

    /// Canonical decimal representation (no leading zeros, `"0"` for zero).
    pub fn to_decimal_string(&self) -> String {
        self.0.to_str_radix(10)
    }

    /// Parse from a hexadecimal string. Used for the built-in named groups.
    pub fn from_hex_str(s: &str) -> Option<Self> {
        BigUint::parse_bytes(s.as_bytes(), 16).map(Self)
    }

    /// Interpret big-endian bytes. An empty slice is zero.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Minimal big-endian encoding. Zero encodes as a single `0x00` byte.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_odd(&self) -> bool {
        !(&self.0 & BigUint::one()).is_zero()
    }

    /// Number of significant bits. Zero has bit length 0.
    pub fn bit_length(&self) -> u64 {
        self.0.bits()
    }

    pub fn shift_right(&self, n: usize) -> Self {
        Self(&self.0 >> n)
    }

    /// Remainder of division by `modulus`, or `None` when `modulus` is zero.
    pub fn checked_rem(&self, modulus: &BigNat) -> Option<Self> {
        if modulus.is_zero() {
            return None;
        }
        Some(Self(&self.0 % &modulus.0))
    }

    /// `self - rhs`, or `None` when the result would be negative.
    pub fn checked_sub(&self, rhs: &BigNat) -> Option<Self> {
        if rhs.0 > self.0 {
            return None;
        }
        Some(Self(&self.0 - &rhs.0))
    }

    /// Narrow to a native `u64`.
    ///
    /// This is the only narrowing conversion on the type and it refuses values that do
    /// not fit instead of truncating them.
    pub fn to_u64(&self) -> Result<u64, DhError> {
        self.0.to_u64().ok_or(DhError::OverflowPolicyViolation {
            bits: self.bit_length(),
            capacity: u64::BITS as u64,
        })
    }

    pub(crate) fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for BigNat {
    fn from(n: u64) -> Self {
        Self::from_u64(n)
    }
}

impl From<u32> for BigNat {
    fn from(n: u32) -> Self {
        Self(BigUint::from(n))
    }
}

impl From<BigUint> for BigNat {
    fn from(n: BigUint) -> Self {
        Self(n)
    }
}

impl From<BigNat> for BigUint {
    fn from(n: BigNat) -> Self {
        n.0
    }
}

impl FromStr for BigNat {
    type Err = ParseBigNatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl fmt::Display for BigNat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for BigNat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigNat({})", self.0)
    }
}

impl Add<&BigNat> for &BigNat {
    type Output = BigNat;

    fn add(self, rhs: &BigNat) -> BigNat {
        BigNat(&self.0 + &rhs.0)
    }
}

impl Mul<&BigNat> for &BigNat {
    type Output = BigNat;

    fn mul(self, rhs: &BigNat) -> BigNat {
        BigNat(&self.0 * &rhs.0)
    }
}

/// Panics when `rhs` is zero, like the primitive integer types. Use
/// [`BigNat::checked_rem`] for untrusted moduli.
impl Rem<&BigNat> for &BigNat {
    type Output = BigNat;

    fn rem(self, rhs: &BigNat) -> BigNat {
        BigNat(&self.0 % &rhs.0)
    }
}

impl ShrAssign<usize> for BigNat {
    fn shr_assign(&mut self, n: usize) {
        self.0 >>= n;
    }
}
