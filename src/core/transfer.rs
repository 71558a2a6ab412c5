use crate::core::error::InvalidInput;
use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single payment instruction: `from` pays `to` the given `amount`.
///
/// Transfers are produced by the settlement engine. Each one reduces one
/// debtor's and one creditor's outstanding balance.
///
/// On the wire the amount is a JSON number:
/// `{"from": "A", "to": "C", "amount": 30.0}`. Decoding applies the same
/// checks as [`Transfer::try_new`].
///
/// # Examples
///
/// ```
/// use bill_settlement::core::transfer::Transfer;
/// use bill_settlement::core::participant::ParticipantId;
/// use rust_decimal_macros::dec;
///
/// let t = Transfer::new(ParticipantId::new("A"), ParticipantId::new("C"), dec!(30));
/// assert_eq!(t.to_string(), "A pays 30 to C");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransferRecord")]
pub struct Transfer {
    from: ParticipantId,
    to: ParticipantId,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    amount: Decimal,
}

/// Unchecked wire shape of a [`Transfer`].
#[derive(Deserialize)]
struct TransferRecord {
    from: ParticipantId,
    to: ParticipantId,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

impl TryFrom<TransferRecord> for Transfer {
    type Error = InvalidInput;

    fn try_from(record: TransferRecord) -> Result<Self, Self::Error> {
        Transfer::try_new(record.from, record.to, record.amount)
    }
}

impl Transfer {
    /// Create a new transfer.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive or if `from == to`.
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Decimal) -> Self {
        match Self::try_new(from, to, amount) {
            Ok(transfer) => transfer,
            Err(reason) => panic!("{}", reason),
        }
    }

    /// Like [`Transfer::new`], but reports a bad amount or a self-transfer
    /// as an error.
    pub fn try_new(
        from: ParticipantId,
        to: ParticipantId,
        amount: Decimal,
    ) -> Result<Self, InvalidInput> {
        if amount <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveAmount { from, to, amount });
        }
        if from == to {
            return Err(InvalidInput::SelfTransfer { name: from });
        }
        Ok(Self { from, to, amount })
    }

    pub fn from(&self) -> &ParticipantId {
        &self.from
    }

    pub fn to(&self) -> &ParticipantId {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} to {}", self.from, self.amount, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transfer_creation() {
        let t = Transfer::new(ParticipantId::new("A"), ParticipantId::new("B"), dec!(12.5));
        assert_eq!(t.from().as_str(), "A");
        assert_eq!(t.to().as_str(), "B");
        assert_eq!(t.amount(), dec!(12.5));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_transfer_zero_amount() {
        Transfer::new(ParticipantId::new("A"), ParticipantId::new("B"), Decimal::ZERO);
    }

    #[test]
    #[should_panic(expected = "to itself")]
    fn test_transfer_self() {
        Transfer::new(ParticipantId::new("A"), ParticipantId::new("A"), dec!(1));
    }

    #[test]
    fn test_transfer_json_amount_is_number() {
        let t = Transfer::new(ParticipantId::new("A"), ParticipantId::new("B"), dec!(0.1));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["from"], "A");
        assert_eq!(json["to"], "B");
        assert!(json["amount"].is_number());
        approx::assert_relative_eq!(json["amount"].as_f64().unwrap(), 0.1);
    }

    #[test]
    fn test_transfer_json_decoding_is_validated() {
        let ok: Transfer = serde_json::from_str(r#"{"from":"A","to":"B","amount":2.5}"#).unwrap();
        assert_eq!(ok.amount(), dec!(2.5));

        let zero = serde_json::from_str::<Transfer>(r#"{"from":"A","to":"B","amount":0}"#);
        assert!(zero.unwrap_err().to_string().contains("must be positive"));

        let negative = serde_json::from_str::<Transfer>(r#"{"from":"A","to":"B","amount":-4}"#);
        assert!(negative.is_err());

        let own = serde_json::from_str::<Transfer>(r#"{"from":"A","to":"A","amount":1}"#);
        assert!(own.unwrap_err().to_string().contains("to itself"));
    }

    #[test]
    fn test_try_new_reports_reason() {
        assert_eq!(
            Transfer::try_new(ParticipantId::new("A"), ParticipantId::new("A"), dec!(1)),
            Err(InvalidInput::SelfTransfer {
                name: ParticipantId::new("A")
            })
        );
    }
}
