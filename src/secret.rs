//! Secret exponent selection.
//!
//! Exponents are drawn uniformly from `[2, p-2]` by rejection sampling over bytes from a
//! cryptographically secure source. Raw draws are never reduced modulo the range, which
//! would bias the result toward small values.

use core::fmt;

use tracing::{error, warn};
use zeroize::Zeroizing;

use crate::bigint::BigNat;
use crate::config::{DH_MIN_EXPONENT, DH_SECRET_SAMPLING_MAX_ATTEMPTS};
use crate::error::{DhError, Result};

/// Source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fill `buf` entirely or fail with [`DhError::EntropySourceUnavailable`].
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        getrandom::getrandom(buf).map_err(|e| DhError::EntropySourceUnavailable(e.to_string()))
    }
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(buf)
    }
}

/// A per-role secret exponent.
///
/// Not `Clone` and not serializable; `Debug` output is redacted.
pub struct SecretExponent(BigNat);

impl SecretExponent {
    /// Wrap a caller-chosen exponent after checking it against `modulus`.
    ///
    /// Accepts `[2, modulus-2]`, or exactly `2` for the weak moduli 2 and 3.
    pub fn new(value: BigNat, modulus: &BigNat) -> Result<Self> {
        let min = BigNat::from(DH_MIN_EXPONENT);
        if modulus < &min {
            return Err(DhError::InvalidDomainParameters(
                "modulus must be at least 2".to_string(),
            ));
        }

        let max = match modulus.checked_sub(&min) {
            Some(max) if max >= min => max,
            _ => min.clone(),
        };
        if value < min || value > max {
            return Err(DhError::InvalidDomainParameters(format!(
                "secret exponent outside [2, {}]",
                max
            )));
        }

        Ok(Self(value))
    }

    pub fn expose_secret(&self) -> &BigNat {
        &self.0
    }
}

impl fmt::Debug for SecretExponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretExponent(<redacted>)")
    }
}

/// Draw a secret exponent uniformly from `[2, modulus-2]`.
///
/// Moduli 2 and 3 leave no non-trivial range; they get the fixed exponent `2`. The
/// protocol still runs but offers no secrecy.
pub fn random_exponent<E>(modulus: &BigNat, entropy: &mut E) -> Result<SecretExponent>
where
    E: EntropySource + ?Sized,
{
    let min = BigNat::from(DH_MIN_EXPONENT);
    if modulus < &min {
        return Err(DhError::InvalidDomainParameters(
            "modulus must be at least 2".to_string(),
        ));
    }

    let three = BigNat::from(3u32);
    if modulus <= &three {
        warn!(modulus = %modulus, "weak modulus, using fixed secret exponent 2");
        return Ok(SecretExponent(min));
    }

    // [2, p-2] holds p-3 values.
    let range = modulus.checked_sub(&three).ok_or_else(|| {
        DhError::InvalidDomainParameters("modulus too small for exponent range".to_string())
    })?;
    let bytes_len = modulus.bit_length().div_ceil(8) as usize;
    let offset = sample_below(&range, bytes_len, entropy)?;

    Ok(SecretExponent(&offset + &min))
}

/// Rejection-sample uniformly in `[0, upper)` from `bytes_len`-byte draws.
///
/// Gives up with [`DhError::EntropySourceUnavailable`] after a fixed number of
/// out-of-range draws.
pub(crate) fn sample_below<E>(
    upper: &BigNat,
    bytes_len: usize,
    entropy: &mut E,
) -> Result<BigNat>
where
    E: EntropySource + ?Sized,
{
    let bits = upper.bit_length() as usize;
    let excess_bits = (bytes_len * 8).saturating_sub(bits);

    for _ in 0..DH_SECRET_SAMPLING_MAX_ATTEMPTS {
        let mut buf = Zeroizing::new(vec![0u8; bytes_len]);
        entropy.fill_bytes(&mut buf)?;

        // Clear bits above the range's bit length so each draw is accepted with
        // probability at least 1/2.
        let whole = (excess_bits / 8).min(bytes_len);
        buf[..whole].fill(0);
        if excess_bits % 8 != 0 && whole < bytes_len {
            buf[whole] &= 0xFF >> (excess_bits % 8);
        }

        let candidate = BigNat::from_bytes_be(&buf);
        if &candidate < upper {
            return Ok(candidate);
        }
    }

    error!(
        attempts = DH_SECRET_SAMPLING_MAX_ATTEMPTS,
        "entropy source produced only out-of-range draws"
    );
    Err(DhError::EntropySourceUnavailable(
        "rejection sampling exhausted".to_string(),
    ))
}
