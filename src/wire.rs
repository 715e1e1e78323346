//! Wire contract between Initiator and Responder.
//!
//! Every integer travels as a decimal string. JSON numbers are refused at
//! deserialization, so a 2048-bit modulus can never be squeezed through an `f64`.

use serde::{Deserialize, Serialize};

use crate::bigint::BigNat;
use crate::error::{DhError, Result, StatusClass};
use crate::params::DomainParameters;
use crate::session::SharedSecret;

/// Initiator → Responder: `{ "g": .., "p": .., "x": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExchangeRequest {
    pub g: String,
    pub p: String,
    pub x: String,
}

impl ExchangeRequest {
    pub fn new(params: &DomainParameters, initiator_public: &BigNat) -> Self {
        Self {
            g: params.generator().to_decimal_string(),
            p: params.modulus().to_decimal_string(),
            x: initiator_public.to_decimal_string(),
        }
    }

    /// Parse the domain parameters and the Initiator's public value.
    pub fn parse(&self) -> Result<(DomainParameters, BigNat)> {
        let params = DomainParameters::from_decimal(&self.p, &self.g)?;
        let x = params.parse_peer_value(&self.x)?;
        Ok((params, x))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Responder → Initiator: `{ "y": .., "K": .. }`.
///
/// The Responder's secret exponent has no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExchangeResponse {
    pub y: String,
    #[serde(rename = "K")]
    pub k: String,
}

impl ExchangeResponse {
    pub fn new(responder_public: &BigNat, shared: &SharedSecret) -> Self {
        Self {
            y: responder_public.to_decimal_string(),
            k: shared.value().to_decimal_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `{ "error": <kind> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Only the kind-string is exposed; error details stay server-side.
    pub fn from_error(err: &DhError) -> Self {
        Self {
            error: err.kind().to_string(),
        }
    }
}

/// A transport-level reply: status code plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireReply {
    pub status: u16,
    pub body: String,
}

impl WireReply {
    pub fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    pub fn from_error(err: &DhError) -> Self {
        let status = err.status_class().http_status();
        let body = serde_json::to_string(&ErrorResponse::from_error(err))
            .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", err.kind()));
        Self { status, body }
    }

    pub fn status_class(&self) -> Option<StatusClass> {
        match self.status {
            400..=499 => Some(StatusClass::ClientError),
            500..=599 => Some(StatusClass::ServerError),
            _ => None,
        }
    }
}
