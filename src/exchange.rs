//! Request/response drivers for the two roles.
//!
//! Framing (HTTP, WebSocket, ...) lives outside this crate. A [`Transport`] only has to
//! carry one [`ExchangeRequest`] out and one [`ExchangeResponse`] back; timeouts and
//! retries belong to the transport as well.

use tracing::{debug, warn};

use crate::bigint::BigNat;
use crate::error::{DhError, Result};
use crate::params::DomainParameters;
use crate::secret::EntropySource;
use crate::session::{respond, KeyAgreementSession, Role, SharedSecret};
use crate::wire::{ErrorResponse, ExchangeRequest, ExchangeResponse, WireReply};

/// Carries the Initiator's request to a Responder and returns its reply.
pub trait Transport {
    fn exchange(&mut self, request: &ExchangeRequest) -> Result<ExchangeResponse>;
}

/// Server side of the exchange.
///
/// Every request gets a fresh session and a fresh secret exponent; nothing carries over
/// between requests.
#[derive(Debug)]
pub struct Responder<E> {
    entropy: E,
}

impl<E: EntropySource> Responder<E> {
    pub fn new(entropy: E) -> Self {
        Self { entropy }
    }

    pub fn handle(&mut self, request: &ExchangeRequest) -> Result<ExchangeResponse> {
        let (params, x) = request.parse()?;
        let (y, shared) = respond(&params, &x, &mut self.entropy)?;
        debug!(
            modulus_bits = params.modulus().bit_length(),
            "responder completed exchange"
        );
        Ok(ExchangeResponse::new(&y, &shared))
    }

    /// Handle a raw JSON body, producing a status code and JSON reply.
    ///
    /// Failures become `{ "error": <kind> }` with a 4xx or 5xx status.
    pub fn handle_json(&mut self, body: &str) -> WireReply {
        let reply = ExchangeRequest::from_json(body)
            .and_then(|request| self.handle(&request))
            .and_then(|response| response.to_json());

        match reply {
            Ok(body) => WireReply::ok(body),
            Err(e) => {
                warn!(kind = e.kind(), "exchange request failed");
                WireReply::from_error(&e)
            }
        }
    }
}

/// In-process transport that serializes through the JSON wire format.
#[derive(Debug)]
pub struct LoopbackTransport<E> {
    responder: Responder<E>,
}

impl<E: EntropySource> LoopbackTransport<E> {
    pub fn new(responder: Responder<E>) -> Self {
        Self { responder }
    }
}

impl<E: EntropySource> Transport for LoopbackTransport<E> {
    fn exchange(&mut self, request: &ExchangeRequest) -> Result<ExchangeResponse> {
        let reply = self.responder.handle_json(&request.to_json()?);
        if reply.status != 200 {
            let err: ErrorResponse = serde_json::from_str(&reply.body)?;
            return Err(DhError::from_wire_kind(&err.error));
        }
        ExchangeResponse::from_json(&reply.body)
    }
}

/// What the Initiator ends up with after a complete exchange.
#[derive(Debug)]
pub struct InitiatorOutcome {
    /// Own public value `x`.
    pub public_value: BigNat,
    /// Responder's public value `y`.
    pub peer_public_value: BigNat,
    /// `K` derived locally from `y`.
    pub shared_secret: SharedSecret,
    /// `K` as reported by the Responder.
    pub responder_shared_secret: BigNat,
}

impl InitiatorOutcome {
    /// Whether both roles derived the same `K`.
    pub fn agrees(&self) -> bool {
        self.shared_secret.value() == &self.responder_shared_secret
    }
}

/// Drive an Initiator session over `transport`.
pub fn run_initiator<T, E>(
    params: &DomainParameters,
    transport: &mut T,
    entropy: &mut E,
) -> Result<InitiatorOutcome>
where
    T: Transport + ?Sized,
    E: EntropySource + ?Sized,
{
    let mut session = KeyAgreementSession::new(Role::Initiator, params.clone());
    session.compute_public_value(entropy)?;
    let x = session.publish()?;

    let response = transport.exchange(&ExchangeRequest::new(params, &x))?;

    let shared_secret = session.receive_peer_wire(&response.y)?;
    let peer_public_value = params.parse_peer_value(&response.y)?;
    let responder_shared_secret = params.parse_peer_value(&response.k)?;

    let outcome = InitiatorOutcome {
        public_value: x,
        peer_public_value,
        shared_secret,
        responder_shared_secret,
    };
    if !outcome.agrees() {
        warn!("initiator and responder derived different shared secrets");
    }
    Ok(outcome)
}
