use base64ct::{Base64UrlUnpadded, Encoding};
use tracing::debug;
use zeroize::Zeroizing;

use crate::bigint::BigNat;
use crate::config::{
    DH_MILLER_RABIN_ROUNDS, DH_MIN_GENERATED_PRIME_BITS, DH_PRIME_GEN_MAX_ATTEMPTS,
};
use crate::error::{DhError, Result};
use crate::modexp::mod_pow;
use crate::secret::{sample_below, EntropySource, OsEntropy};

/// Encode a `BigNat` as base64url (unpadded) over its minimal big-endian bytes.
pub fn encode_bignat_b64u(x: &BigNat) -> String {
    Base64UrlUnpadded::encode_string(&x.to_bytes_be())
}

/// Decode a `BigNat` from base64url (unpadded).
pub fn decode_bignat_b64u(s: &str) -> Result<BigNat> {
    let bytes = Base64UrlUnpadded::decode_vec(s)?;
    Ok(BigNat::from_bytes_be(&bytes))
}

/// Generate a random probable prime of exactly `bits` bits.
///
/// Intended for callers that need fresh domain parameters instead of a named group.
/// The result should be generated once and distributed to both roles.
pub fn generate_prime(bits: usize) -> Result<BigNat> {
    generate_prime_with(bits, &mut OsEntropy)
}

pub fn generate_prime_with<E>(bits: usize, entropy: &mut E) -> Result<BigNat>
where
    E: EntropySource + ?Sized,
{
    if bits < DH_MIN_GENERATED_PRIME_BITS {
        return Err(DhError::InvalidDomainParameters(format!(
            "prime too small (bits={}, min_bits={})",
            bits, DH_MIN_GENERATED_PRIME_BITS
        )));
    }

    for _ in 0..DH_PRIME_GEN_MAX_ATTEMPTS {
        let candidate = odd_candidate(bits, entropy)?;
        if is_probable_prime_with(&candidate, entropy)? {
            debug!(bits, "generated probable prime");
            return Ok(candidate);
        }
    }

    Err(DhError::EntropySourceUnavailable(
        "no prime found within attempt limit".to_string(),
    ))
}

/// An odd number with its top bit set, so `bit_length() == bits`.
fn odd_candidate<E>(bits: usize, entropy: &mut E) -> Result<BigNat>
where
    E: EntropySource + ?Sized,
{
    let mut draw = Zeroizing::new(vec![0u8; bits.div_ceil(8)]);
    entropy.fill_bytes(&mut draw)?;

    let spare = draw.len() * 8 - bits;
    draw[0] &= 0xFFu8 >> spare;
    draw[0] |= 0x80u8 >> spare;
    if let Some(last) = draw.last_mut() {
        *last |= 1;
    }
    Ok(BigNat::from_bytes_be(&draw))
}

/// Miller-Rabin probable-prime test with random bases.
pub fn is_probable_prime(n: &BigNat) -> Result<bool> {
    is_probable_prime_with(n, &mut OsEntropy)
}

/// Miller-Rabin with bases drawn from `entropy`.
///
/// Bases come from the same capped rejection sampler as secret exponents, so a source
/// that never yields an in-range draw fails with [`DhError::EntropySourceUnavailable`].
pub fn is_probable_prime_with<E>(n: &BigNat, entropy: &mut E) -> Result<bool>
where
    E: EntropySource + ?Sized,
{
    const SIEVE: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    for small in SIEVE {
        let small = BigNat::from(small);
        if n == &small {
            return Ok(true);
        }
        if n < &small || (n % &small).is_zero() {
            return Ok(false);
        }
    }

    // n > 37 and odd from here on.
    let one = BigNat::one();
    let n_minus_1 = n
        .checked_sub(&one)
        .ok_or_else(|| DhError::InvalidDomainParameters("n must be positive".to_string()))?;
    let mut odd_part = n_minus_1.clone();
    let mut twos = 0u32;
    while !odd_part.is_odd() {
        odd_part >>= 1;
        twos += 1;
    }

    // Bases in [2, n-2]: n-3 values, offset by 2.
    let base_count = n
        .checked_sub(&BigNat::from(3u32))
        .ok_or_else(|| DhError::InvalidDomainParameters("n must exceed 3".to_string()))?;
    let draw_len = base_count.bit_length().div_ceil(8) as usize;
    let offset = BigNat::from(2u32);

    for _ in 0..DH_MILLER_RABIN_ROUNDS {
        let base = &sample_below(&base_count, draw_len, entropy)? + &offset;
        if is_witness(&base, n, &n_minus_1, &odd_part, twos)? {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Whether `base` proves `n` composite, given `n - 1 = odd_part * 2^twos`.
fn is_witness(
    base: &BigNat,
    n: &BigNat,
    n_minus_1: &BigNat,
    odd_part: &BigNat,
    twos: u32,
) -> Result<bool> {
    let mut x = mod_pow(base, odd_part, n)?;
    if x.is_one() || &x == n_minus_1 {
        return Ok(false);
    }

    for _ in 1..twos {
        x = &(&x * &x) % n;
        if &x == n_minus_1 {
            return Ok(false);
        }
        if x.is_one() {
            return Ok(true);
        }
    }
    Ok(true)
}
