//! Two-role key-agreement session.
//!
//! # Protocol Overview
//!
//! 1. Initiator draws `a`, computes `x = g^a mod p` and sends `<g, p, x>`
//! 2. Responder draws `b`, computes `y = g^b mod p` and `K = x^b mod p`, replies `<y, K>`
//! 3. Initiator computes `K = y^a mod p`
//!
//! Each role walks `Created -> PublicValueComputed -> AwaitingPeer -> SharedSecretDerived`.
//! A rejected peer value leaves the session in `AwaitingPeer` so the caller can retry.

use core::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::bigint::BigNat;
use crate::config::DH_SHARED_SECRET_HKDF_INFO;
use crate::error::{DhError, Result};
use crate::modexp::mod_pow;
use crate::params::DomainParameters;
use crate::secret::{random_exponent, EntropySource, SecretExponent};

/// Protocol responsibility of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Sends `<g, p, x>` and waits for the reply.
    Initiator,
    /// Receives `<g, p, x>` and replies with `<y, K>`.
    Responder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    PublicValueComputed,
    AwaitingPeer,
    SharedSecretDerived,
}

impl SessionState {
    pub fn name(self) -> &'static str {
        match self {
            SessionState::Created => "Created",
            SessionState::PublicValueComputed => "PublicValueComputed",
            SessionState::AwaitingPeer => "AwaitingPeer",
            SessionState::SharedSecretDerived => "SharedSecretDerived",
        }
    }
}

/// The agreed value `K`.
///
/// Not `Clone`; each session hands it out once.
#[derive(PartialEq, Eq)]
pub struct SharedSecret(BigNat);

impl SharedSecret {
    pub fn value(&self) -> &BigNat {
        &self.0
    }

    pub fn into_value(self) -> BigNat {
        self.0
    }

    /// Expand `K` into a 32-byte symmetric key with HKDF-SHA256.
    ///
    /// `info` is appended to the crate's label so distinct uses get distinct keys.
    pub fn derive_key(&self, info: &[u8]) -> Result<Zeroizing<[u8; 32]>> {
        let ikm = Zeroizing::new(self.0.to_bytes_be());
        let hkdf = Hkdf::<Sha256>::new(None, &ikm);

        let mut label = DH_SHARED_SECRET_HKDF_INFO.to_vec();
        label.extend_from_slice(info);

        let mut key = Zeroizing::new([0u8; 32]);
        // HKDF-SHA256 output is capped at 255 blocks of 32 bytes.
        hkdf.expand(&label, &mut key[..])
            .map_err(|_| DhError::OverflowPolicyViolation {
                bits: 256,
                capacity: 255 * 256,
            })?;
        Ok(key)
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// One role's view of a Diffie-Hellman exchange.
#[derive(Debug)]
pub struct KeyAgreementSession {
    role: Role,
    params: DomainParameters,
    state: SessionState,
    secret: Option<SecretExponent>,
    public_value: Option<BigNat>,
}

impl KeyAgreementSession {
    pub fn new(role: Role, params: DomainParameters) -> Self {
        debug!(
            ?role,
            modulus_bits = params.modulus().bit_length(),
            "key-agreement session created"
        );
        Self {
            role,
            params,
            state: SessionState::Created,
            secret: None,
            public_value: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn params(&self) -> &DomainParameters {
        &self.params
    }

    /// Own public value, once computed.
    pub fn public_value(&self) -> Option<&BigNat> {
        self.public_value.as_ref()
    }

    /// Draw the secret exponent and compute `g^secret mod p`.
    ///
    /// An entropy failure leaves the session in `Created`.
    pub fn compute_public_value<E>(&mut self, entropy: &mut E) -> Result<&BigNat>
    where
        E: EntropySource + ?Sized,
    {
        self.expect_state(SessionState::Created)?;
        let secret = random_exponent(self.params.modulus(), entropy)?;
        self.install_secret(secret)
    }

    /// Use a caller-supplied secret exponent instead of drawing one.
    ///
    /// The value must lie in `[2, p-2]`.
    pub fn compute_public_value_from(&mut self, secret: BigNat) -> Result<&BigNat> {
        self.expect_state(SessionState::Created)?;
        let secret = SecretExponent::new(secret, self.params.modulus())?;
        self.install_secret(secret)
    }

    fn install_secret(&mut self, secret: SecretExponent) -> Result<&BigNat> {
        let public = mod_pow(
            self.params.generator(),
            secret.expose_secret(),
            self.params.modulus(),
        )?;

        self.secret = Some(secret);
        self.state = SessionState::PublicValueComputed;
        debug!(role = ?self.role, state = self.state.name(), "public value computed");

        let public = self.public_value.insert(public);
        Ok(&*public)
    }

    /// Hand the public value to the transport and start waiting for the peer.
    pub fn publish(&mut self) -> Result<BigNat> {
        self.expect_state(SessionState::PublicValueComputed)?;
        let public = self.public_value.clone().ok_or(DhError::InvalidSessionState {
            expected: SessionState::PublicValueComputed.name(),
            actual: self.state.name(),
        })?;

        self.state = SessionState::AwaitingPeer;
        debug!(role = ?self.role, state = self.state.name(), "public value published");
        Ok(public)
    }

    /// Derive `K = peer^secret mod p`.
    ///
    /// The secret exponent is consumed and `K` is returned exactly once. A peer value not
    /// below the modulus fails with [`DhError::InvalidPeerValue`] and the session stays in
    /// `AwaitingPeer`.
    pub fn receive_peer_value(&mut self, peer: &BigNat) -> Result<SharedSecret> {
        self.expect_state(SessionState::AwaitingPeer)?;
        if let Err(e) = self.params.check_peer_value(peer) {
            warn!(role = ?self.role, "rejected peer public value");
            return Err(e);
        }

        let secret = self.secret.take().ok_or(DhError::InvalidSessionState {
            expected: SessionState::AwaitingPeer.name(),
            actual: self.state.name(),
        })?;
        let shared = mod_pow(peer, secret.expose_secret(), self.params.modulus())?;

        self.state = SessionState::SharedSecretDerived;
        debug!(role = ?self.role, state = self.state.name(), "shared secret derived");
        Ok(SharedSecret(shared))
    }

    /// Parse a decimal wire value and derive `K`.
    pub fn receive_peer_wire(&mut self, peer: &str) -> Result<SharedSecret> {
        self.expect_state(SessionState::AwaitingPeer)?;
        let peer = match self.params.parse_peer_value(peer) {
            Ok(peer) => peer,
            Err(e) => {
                warn!(role = ?self.role, "rejected peer public value");
                return Err(e);
            }
        };
        self.receive_peer_value(&peer)
    }

    fn expect_state(&self, expected: SessionState) -> Result<()> {
        if self.state != expected {
            return Err(DhError::InvalidSessionState {
                expected: expected.name(),
                actual: self.state.name(),
            });
        }
        Ok(())
    }
}

/// Run the Responder role against an already received Initiator value.
///
/// Returns the Responder's public value `y` and the shared secret `K`. The peer value is
/// checked before any randomness is drawn.
pub fn respond<E>(
    params: &DomainParameters,
    peer: &BigNat,
    entropy: &mut E,
) -> Result<(BigNat, SharedSecret)>
where
    E: EntropySource + ?Sized,
{
    params.check_peer_value(peer)?;

    let mut session = KeyAgreementSession::new(Role::Responder, params.clone());
    session.compute_public_value(entropy)?;
    let public = session.publish()?;
    let shared = session.receive_peer_value(peer)?;
    Ok((public, shared))
}
