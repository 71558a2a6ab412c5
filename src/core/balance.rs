use crate::core::error::InvalidInput;
use crate::core::money;
use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A participant's signed balance within one shared event.
///
/// Negative means the participant owes money (debtor), positive means the
/// participant is owed money (creditor), zero means already settled.
///
/// # Examples
///
/// ```
/// use bill_settlement::core::balance::ParticipantBalance;
/// use rust_decimal_macros::dec;
///
/// let alice = ParticipantBalance::new("Alice", dec!(-30));
/// assert!(alice.is_debtor());
/// assert_eq!(alice.magnitude(), dec!(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    pub participant: ParticipantId,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
}

impl ParticipantBalance {
    pub fn new(participant: impl Into<ParticipantId>, balance: Decimal) -> Self {
        Self {
            participant: participant.into(),
            balance,
        }
    }

    pub fn is_debtor(&self) -> bool {
        self.balance < Decimal::ZERO
    }

    pub fn is_creditor(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    pub fn is_settled(&self) -> bool {
        self.balance.is_zero()
    }

    /// Absolute value of the balance.
    pub fn magnitude(&self) -> Decimal {
        self.balance.abs()
    }
}

/// Wire shape of a balance: `{ "name": string, "balance": number }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub name: String,
    pub balance: f64,
}

impl BalanceEntry {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

/// An ordered set of participant balances submitted for settlement.
///
/// Insertion order is preserved; the settlement engine breaks ties by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    entries: Vec<ParticipantBalance>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: ParticipantBalance) {
        self.entries.push(entry);
    }

    /// Build a sheet from wire entries.
    ///
    /// Each balance is converted from `f64` and quantized to `scale` decimal
    /// places. The result is validated before it is returned.
    pub fn from_entries(entries: &[BalanceEntry], scale: u32) -> Result<Self, InvalidInput> {
        money::check_scale(scale)?;
        let mut sheet = BalanceSheet::new();
        for entry in entries {
            let participant = ParticipantId::new(entry.name.as_str());
            let balance = money::from_f64(&participant, entry.balance, scale)?;
            sheet.add(ParticipantBalance {
                participant,
                balance,
            });
        }
        sheet.validate()?;
        Ok(sheet)
    }

    /// Reject blank or duplicated names.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.participant.is_blank() {
                return Err(InvalidInput::EmptyName { index });
            }
            if !seen.insert(&entry.participant) {
                return Err(InvalidInput::DuplicateName {
                    name: entry.participant.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[ParticipantBalance] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Participant names in sheet order.
    pub fn participants(&self) -> Vec<ParticipantId> {
        self.entries.iter().map(|e| e.participant.clone()).collect()
    }

    /// Signed sum of all balances. Zero for a balanced group.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.balance).sum()
    }

    /// Total owed by debtors, as a positive amount.
    pub fn debt_total(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.is_debtor())
            .map(|e| e.magnitude())
            .sum()
    }

    /// Total owed to creditors.
    pub fn credit_total(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.is_creditor())
            .map(|e| e.balance)
            .sum()
    }

    pub fn debtor_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_debtor()).count()
    }

    pub fn creditor_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_creditor()).count()
    }

    /// Whether debts and credits cancel out within `tolerance`.
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        self.total().abs() <= tolerance
    }
}

impl FromIterator<ParticipantBalance> for BalanceSheet {
    fn from_iter<T: IntoIterator<Item = ParticipantBalance>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
