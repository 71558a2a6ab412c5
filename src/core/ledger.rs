use crate::core::balance::{BalanceSheet, ParticipantBalance};
use crate::core::participant::ParticipantId;
use crate::core::transfer::Transfer;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Tracks each participant's outstanding position while transfers are applied.
///
/// A positive position means the participant is still owed money.
/// A negative position means the participant still owes money.
///
/// Seeded from a [`BalanceSheet`]; applying every transfer of a settlement
/// to it shows what, if anything, is left unsettled.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    positions: HashMap<ParticipantId, Decimal>,
    /// Participants in first-seen order, for stable reporting.
    order: Vec<ParticipantId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sheet(sheet: &BalanceSheet) -> Self {
        let mut ledger = Self::new();
        for entry in sheet.entries() {
            *ledger.slot(&entry.participant) += entry.balance;
        }
        ledger
    }

    fn slot(&mut self, participant: &ParticipantId) -> &mut Decimal {
        if !self.positions.contains_key(participant) {
            self.order.push(participant.clone());
        }
        self.positions
            .entry(participant.clone())
            .or_insert(Decimal::ZERO)
    }

    /// Apply a transfer: the payer's debt shrinks, the payee's credit shrinks.
    pub fn apply_transfer(&mut self, transfer: &Transfer) {
        *self.slot(transfer.from()) += transfer.amount();
        *self.slot(transfer.to()) -= transfer.amount();
    }

    pub fn position(&self, participant: &ParticipantId) -> Decimal {
        self.positions
            .get(participant)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Participants whose position is outside `tolerance` of zero, in
    /// first-seen order.
    pub fn residuals(&self, tolerance: Decimal) -> Vec<ParticipantBalance> {
        self.order
            .iter()
            .map(|p| ParticipantBalance::new(p.clone(), self.position(p)))
            .filter(|b| b.magnitude() > tolerance)
            .collect()
    }

    pub fn is_settled(&self, tolerance: Decimal) -> bool {
        self.positions.values().all(|v| v.abs() <= tolerance)
    }

    /// Sum of positive positions: what creditors are still owed.
    pub fn outstanding(&self) -> Decimal {
        self.positions
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .sum()
    }
}
