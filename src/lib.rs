//! Diffie-Hellman key agreement over arbitrary-precision modular exponentiation.
//!
//! This crate contains a small, self-contained two-party key-agreement engine: an
//! unbounded integer type, square-and-multiply exponentiation, uniform secret exponent
//! sampling from the OS CSPRNG, and the Initiator/Responder session state machine with
//! its decimal-string wire format.

pub mod bigint;
pub mod config;
pub mod error;
pub mod exchange;
pub mod modexp;
pub mod params;
pub mod secret;
pub mod session;
pub mod table;
pub mod utils;
pub mod wire;

#[cfg(test)]
pub mod tests;

pub use crate::bigint::{BigNat, ParseBigNatError};
pub use crate::error::{DhError, Result, StatusClass};
pub use crate::exchange::{run_initiator, InitiatorOutcome, LoopbackTransport, Responder, Transport};
pub use crate::modexp::mod_pow;
pub use crate::params::{DomainParameters, NamedGroup};
pub use crate::secret::{random_exponent, EntropySource, OsEntropy, SecretExponent};
pub use crate::session::{respond, KeyAgreementSession, Role, SessionState, SharedSecret};
pub use crate::table::{ConnectionId, SessionTable};
pub use crate::utils::{decode_bignat_b64u, encode_bignat_b64u};
pub use crate::utils::{generate_prime, is_probable_prime};
pub use crate::wire::{ErrorResponse, ExchangeRequest, ExchangeResponse, WireReply};
