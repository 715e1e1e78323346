use std::collections::VecDeque;
use std::sync::OnceLock;

use crate::{BigNat, DhError, DomainParameters, EntropySource, NamedGroup};

/// `2^bits - 1`, built from its all-ones byte pattern.
fn mersenne(bits: usize) -> BigNat {
    let mut bytes = vec![0xFFu8; bits.div_ceil(8)];
    if bits % 8 != 0 {
        bytes[0] = (1u8 << (bits % 8)) - 1;
    }
    BigNat::from_bytes_be(&bytes)
}

/// 2^127 - 1, a Mersenne prime well past native word width.
fn mersenne_127() -> BigNat {
    mersenne(127)
}

/// 2^521 - 1, a Mersenne prime larger than a 512-bit modulus.
fn mersenne_521() -> BigNat {
    mersenne(521)
}

fn modp_2048() -> &'static DomainParameters {
    static P: OnceLock<DomainParameters> = OnceLock::new();
    P.get_or_init(|| DomainParameters::named(NamedGroup::Rfc3526Modp2048).unwrap())
}

fn small_params() -> DomainParameters {
    DomainParameters::new(BigNat::from(23u32), BigNat::from(5u32)).expect("p=23, g=5")
}

/// Always fails, like an unreadable `/dev/urandom`.
struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn fill_bytes(&mut self, _buf: &mut [u8]) -> crate::Result<()> {
        Err(DhError::EntropySourceUnavailable("test source".to_string()))
    }
}

/// Fills every draw with the same byte.
struct StuckEntropy(u8);

impl EntropySource for StuckEntropy {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> crate::Result<()> {
        buf.fill(self.0);
        Ok(())
    }
}

/// Replays a fixed list of draws.
struct ScriptedEntropy(VecDeque<Vec<u8>>);

impl ScriptedEntropy {
    fn new(draws: &[&[u8]]) -> Self {
        Self(draws.iter().map(|d| d.to_vec()).collect())
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> crate::Result<()> {
        let draw = self
            .0
            .pop_front()
            .ok_or_else(|| DhError::EntropySourceUnavailable("script exhausted".to_string()))?;
        assert_eq!(draw.len(), buf.len(), "scripted draw has wrong length");
        buf.copy_from_slice(&draw);
        Ok(())
    }
}



pub mod security_tests;
