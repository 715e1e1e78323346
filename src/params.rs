//! Domain parameters `(p, g)` shared by both roles.

use core::fmt;
use core::str::FromStr;

use crate::bigint::BigNat;
use crate::config::{RFC3526_GENERATOR, RFC3526_MODP_1536_HEX, RFC3526_MODP_2048_HEX};
use crate::error::{DhError, Result};
use crate::utils::is_probable_prime;

/// Well-known MODP groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedGroup {
    /// RFC 3526 group 5 (1536-bit).
    Rfc3526Modp1536,
    /// RFC 3526 group 14 (2048-bit).
    Rfc3526Modp2048,
}

impl NamedGroup {
    pub fn name(self) -> &'static str {
        match self {
            NamedGroup::Rfc3526Modp1536 => "modp1536",
            NamedGroup::Rfc3526Modp2048 => "modp2048",
        }
    }

    fn prime_hex(self) -> &'static str {
        match self {
            NamedGroup::Rfc3526Modp1536 => RFC3526_MODP_1536_HEX,
            NamedGroup::Rfc3526Modp2048 => RFC3526_MODP_2048_HEX,
        }
    }
}

impl fmt::Display for NamedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedGroup {
    type Err = DhError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "modp1536" => Ok(NamedGroup::Rfc3526Modp1536),
            "modp2048" => Ok(NamedGroup::Rfc3526Modp2048),
            other => Err(DhError::InvalidDomainParameters(format!(
                "unknown group: {}",
                other
            ))),
        }
    }
}

/// Modulus `p` and generator `g` for one key-agreement run.
///
/// Construction checks `p >= 2` and `g ∈ [2, p-1]`. Primality of `p` is the caller's
/// responsibility unless [`DomainParameters::validated`] is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParameters {
    modulus: BigNat,
    generator: BigNat,
}

impl DomainParameters {
    pub fn new(modulus: BigNat, generator: BigNat) -> Result<Self> {
        let two = BigNat::from(2u32);
        if modulus < two {
            return Err(DhError::InvalidDomainParameters(
                "modulus must be at least 2".to_string(),
            ));
        }
        if generator < two || generator >= modulus {
            return Err(DhError::InvalidDomainParameters(
                "generator must lie in [2, p-1]".to_string(),
            ));
        }

        Ok(Self { modulus, generator })
    }

    /// Like [`DomainParameters::new`], additionally rejecting composite moduli.
    pub fn validated(modulus: BigNat, generator: BigNat) -> Result<Self> {
        let params = Self::new(modulus, generator)?;
        if !is_probable_prime(&params.modulus)? {
            return Err(DhError::InvalidDomainParameters(
                "modulus is not prime".to_string(),
            ));
        }
        Ok(params)
    }

    /// Parse decimal strings as received on the wire.
    pub fn from_decimal(modulus: &str, generator: &str) -> Result<Self> {
        let p = BigNat::from_decimal_str(modulus)
            .map_err(|e| DhError::InvalidDomainParameters(format!("p: {}", e)))?;
        let g = BigNat::from_decimal_str(generator)
            .map_err(|e| DhError::InvalidDomainParameters(format!("g: {}", e)))?;
        Self::new(p, g)
    }

    pub fn named(group: NamedGroup) -> Result<Self> {
        let modulus = BigNat::from_hex_str(group.prime_hex()).ok_or_else(|| {
            DhError::InvalidDomainParameters(format!("{}: malformed group prime", group))
        })?;
        Ok(Self {
            modulus,
            generator: BigNat::from(RFC3526_GENERATOR),
        })
    }

    pub fn modulus(&self) -> &BigNat {
        &self.modulus
    }

    pub fn generator(&self) -> &BigNat {
        &self.generator
    }

    /// Check that a peer public value lies in `[0, p)`.
    ///
    /// Values equal to or above the modulus are rejected, never reduced.
    pub fn check_peer_value(&self, value: &BigNat) -> Result<()> {
        if value >= &self.modulus {
            return Err(DhError::InvalidPeerValue(
                "public value must be below the modulus".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and range-check a decimal peer public value.
    pub fn parse_peer_value(&self, value: &str) -> Result<BigNat> {
        let value = BigNat::from_decimal_str(value)
            .map_err(|e| DhError::InvalidPeerValue(e.to_string()))?;
        self.check_peer_value(&value)?;
        Ok(value)
    }
}
