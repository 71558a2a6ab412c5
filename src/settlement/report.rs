use crate::core::balance::ParticipantBalance;
use crate::core::transfer::Transfer;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which settlement policy produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Greedy,
    EvenSplit,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Greedy => write!(f, "greedy"),
            StrategyKind::EvenSplit => write!(f, "even split"),
        }
    }
}

/// Advisory attached when the input balances do not sum to zero.
///
/// Settlement still runs; the caller decides whether to accept, round or
/// reject the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbalancedInput {
    /// Signed sum of all input balances.
    #[serde(with = "rust_decimal::serde::float")]
    pub imbalance: Decimal,
    /// Participants left with a non-zero position after settlement.
    pub residuals: Vec<ParticipantBalance>,
}

/// Result of one settlement run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    strategy: StrategyKind,
    transfers: Vec<Transfer>,
    unbalanced: Option<UnbalancedInput>,
    #[serde(with = "rust_decimal::serde::float")]
    unallocated: Decimal,
}

impl SettlementReport {
    pub(crate) fn new(
        strategy: StrategyKind,
        transfers: Vec<Transfer>,
        unbalanced: Option<UnbalancedInput>,
        unallocated: Decimal,
    ) -> Self {
        Self {
            strategy,
            transfers,
            unbalanced,
            unallocated,
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Transfers in emission order.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn into_transfers(self) -> Vec<Transfer> {
        self.transfers
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    pub fn total_transferred(&self) -> Decimal {
        self.transfers.iter().map(|t| t.amount()).sum()
    }

    pub fn unbalanced(&self) -> Option<&UnbalancedInput> {
        self.unbalanced.as_ref()
    }

    /// Amount an even split could not allocate because of share rounding.
    pub fn unallocated(&self) -> Decimal {
        self.unallocated
    }

    /// True when no residual debt or credit remains.
    pub fn is_fully_settled(&self) -> bool {
        self.unbalanced
            .as_ref()
            .map_or(true, |u| u.residuals.is_empty())
    }
}

impl fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement ({}) ===", self.strategy)?;
        writeln!(f, "Transfers:      {}", self.transfer_count())?;
        writeln!(f, "Total moved:    {}", self.total_transferred())?;
        writeln!(f, "Fully settled:  {}", self.is_fully_settled())?;
        if !self.unallocated.is_zero() {
            writeln!(f, "Unallocated:    {}", self.unallocated)?;
        }

        if !self.transfers.is_empty() {
            writeln!(f)?;
            for transfer in &self.transfers {
                writeln!(f, "  {}", transfer)?;
            }
        }

        if let Some(unbalanced) = &self.unbalanced {
            writeln!(f, "\n--- Unbalanced input ---")?;
            writeln!(f, "  Imbalance: {}", unbalanced.imbalance)?;
            for residual in &unbalanced.residuals {
                let status = if residual.is_creditor() {
                    "still owed"
                } else {
                    "still owes"
                };
                writeln!(
                    f,
                    "  {} {} {}",
                    residual.participant,
                    status,
                    residual.magnitude()
                )?;
            }
        }
        Ok(())
    }
}
