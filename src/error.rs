use thiserror::Error;

/// Result type alias for key-agreement operations.
pub type Result<T> = core::result::Result<T, DhError>;

/// Key-agreement errors.
///
/// Messages never carry secret exponents or shared secrets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DhError {
    /// Modulus or generator outside the admissible range.
    #[error("invalid domain parameters: {0}")]
    InvalidDomainParameters(String),

    /// Peer public value is non-numeric, negative, or not below the modulus.
    #[error("invalid peer value: {0}")]
    InvalidPeerValue(String),

    /// The secure random source could not be read.
    #[error("entropy source unavailable: {0}")]
    EntropySourceUnavailable(String),

    /// A value did not fit a fixed-capacity representation.
    #[error("overflow policy violation (bits={bits}, capacity={capacity})")]
    OverflowPolicyViolation { bits: u64, capacity: u64 },

    /// A session operation was called out of protocol order.
    #[error("invalid session state: expected {expected}, got {actual}")]
    InvalidSessionState {
        expected: &'static str,
        actual: &'static str,
    },

    /// A wire payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// HTTP-style status class of an error surfaced by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    ClientError,
    ServerError,
}

impl StatusClass {
    /// Representative HTTP status code for this class.
    pub fn http_status(self) -> u16 {
        match self {
            StatusClass::ClientError => 400,
            StatusClass::ServerError => 500,
        }
    }
}

impl DhError {
    /// Stable kind-string reported verbatim in `{ "error": <kind> }` payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            DhError::InvalidDomainParameters(_) => "InvalidDomainParameters",
            DhError::InvalidPeerValue(_) => "InvalidPeerValue",
            DhError::EntropySourceUnavailable(_) => "EntropySourceUnavailable",
            DhError::OverflowPolicyViolation { .. } => "OverflowPolicyViolation",
            DhError::InvalidSessionState { .. } => "InvalidSessionState",
            DhError::Serialization(_) => "MalformedRequest",
        }
    }

    /// Rebuild an error from a peer's `{ "error": <kind> }` payload.
    pub fn from_wire_kind(kind: &str) -> Self {
        let detail = "reported by peer".to_string();
        match kind {
            "InvalidDomainParameters" => DhError::InvalidDomainParameters(detail),
            "InvalidPeerValue" => DhError::InvalidPeerValue(detail),
            "EntropySourceUnavailable" => DhError::EntropySourceUnavailable(detail),
            "OverflowPolicyViolation" => DhError::OverflowPolicyViolation {
                bits: 0,
                capacity: 0,
            },
            "InvalidSessionState" => DhError::InvalidSessionState {
                expected: "unknown",
                actual: "unknown",
            },
            other => DhError::Serialization(format!("peer reported {}", other)),
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match self {
            DhError::InvalidDomainParameters(_)
            | DhError::InvalidPeerValue(_)
            | DhError::InvalidSessionState { .. }
            | DhError::Serialization(_) => StatusClass::ClientError,
            DhError::EntropySourceUnavailable(_) | DhError::OverflowPolicyViolation { .. } => {
                StatusClass::ServerError
            }
        }
    }

    /// Whether the session that produced this error may be retried with corrected input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DhError::InvalidDomainParameters(_)
                | DhError::InvalidPeerValue(_)
                | DhError::InvalidSessionState { .. }
                | DhError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for DhError {
    fn from(err: serde_json::Error) -> Self {
        DhError::Serialization(err.to_string())
    }
}

impl From<base64ct::Error> for DhError {
    fn from(err: base64ct::Error) -> Self {
        DhError::Serialization(err.to_string())
    }
}
