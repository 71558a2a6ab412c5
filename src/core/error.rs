use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a balance set is rejected before any settlement is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("participant at position {index} has an empty name")]
    EmptyName { index: usize },
    #[error("participant '{name}' appears more than once")]
    DuplicateName { name: ParticipantId },
    #[error("balance of '{name}' is not a finite number: {value}")]
    NonFiniteBalance { name: ParticipantId, value: f64 },
    #[error("balance of '{name}' is outside the representable range: {value}")]
    OutOfRange { name: ParticipantId, value: f64 },
    #[error("scale {scale} exceeds the supported maximum of {max} decimal places")]
    UnsupportedScale { scale: u32, max: u32 },
    #[error("payer '{name}' is not a participant of the event")]
    UnknownPayer { name: ParticipantId },
    #[error("event has no participants")]
    NoParticipants,
    #[error("participant '{name}' has the same name as the sink account")]
    SinkNameClash { name: ParticipantId },
    #[error("transfer from '{from}' to '{to}' must be positive, got {amount}")]
    NonPositiveAmount {
        from: ParticipantId,
        to: ParticipantId,
        amount: Decimal,
    },
    #[error("transfer from '{name}' to itself")]
    SelfTransfer { name: ParticipantId },
}

/// Errors surfaced by the settlement engine and its wire layer.
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SettlementError {
    /// The rejected-input reason, if this is an input error.
    pub fn invalid_input(&self) -> Option<&InvalidInput> {
        match self {
            SettlementError::InvalidInput(reason) => Some(reason),
            SettlementError::Json(_) => None,
        }
    }
}
