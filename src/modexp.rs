//! Modular exponentiation.
//!
//! The portable path is a right-to-left square-and-multiply over [`BigNat`]. With the
//! `accelerated` feature the same contract is served by `num_bigint`'s Montgomery
//! `modpow`; both paths produce identical results for every input.

use crate::bigint::BigNat;
use crate::error::{DhError, Result};

/// Compute `base^exponent mod modulus`.
///
/// A modulus of one is the degenerate group and always yields zero. A zero modulus has
/// no residue ring and is rejected.
pub fn mod_pow(base: &BigNat, exponent: &BigNat, modulus: &BigNat) -> Result<BigNat> {
    if modulus.is_zero() {
        return Err(DhError::InvalidDomainParameters(
            "modulus must be at least 1".to_string(),
        ));
    }
    if modulus.is_one() {
        return Ok(BigNat::zero());
    }

    #[cfg(feature = "accelerated")]
    {
        Ok(accelerated_mod_pow(base, exponent, modulus))
    }

    #[cfg(not(feature = "accelerated"))]
    {
        Ok(square_and_multiply(base, exponent, modulus))
    }
}

/// Right-to-left binary exponentiation. `modulus` must be at least 2.
///
/// Every product is formed at full width and reduced before the next step.
#[cfg_attr(feature = "accelerated", allow(dead_code))]
pub(crate) fn square_and_multiply(base: &BigNat, exponent: &BigNat, modulus: &BigNat) -> BigNat {
    let mut base = base % modulus;
    let mut exponent = exponent.clone();
    let mut result = BigNat::one();

    while !exponent.is_zero() {
        if exponent.is_odd() {
            result = &(&result * &base) % modulus;
        }
        base = &(&base * &base) % modulus;
        exponent >>= 1;
    }

    result
}

#[cfg_attr(not(feature = "accelerated"), allow(dead_code))]
pub(crate) fn accelerated_mod_pow(base: &BigNat, exponent: &BigNat, modulus: &BigNat) -> BigNat {
    BigNat::from(
        base.as_biguint()
            .modpow(exponent.as_biguint(), modulus.as_biguint()),
    )
}
