//! Settlement: turning balances into payments.
//!
//! Two independent policies are available:
//!
//! - **greedy**: debtors pay creditors directly, matched in input order
//!   (see [`greedy::settle`]).
//! - **even split**: everyone pays an equal share of a total into a single
//!   sink account (see [`even_split::settle`]).

pub mod even_split;
pub mod greedy;
pub mod report;

use crate::core::balance::{BalanceEntry, BalanceSheet};
use crate::core::error::{InvalidInput, SettlementError};
use crate::core::event::Event;
use crate::core::ledger::Ledger;
use crate::core::money;
use crate::core::participant::ParticipantId;
use crate::core::transfer::Transfer;
use report::{SettlementReport, StrategyKind, UnbalancedInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default sink account for the even-split policy.
pub const DEFAULT_SINK: &str = "settled account";

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct SettlementConfig {
    /// Decimal places amounts are quantized to on intake (2 = cents).
    pub scale: u32,
    /// Largest absolute balance sum still treated as balanced.
    pub tolerance: Decimal,
    /// Account that receives every share under the even-split policy.
    pub sink: ParticipantId,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            scale: money::DEFAULT_SCALE,
            tolerance: dec!(0.000001),
            sink: ParticipantId::new(DEFAULT_SINK),
        }
    }
}

impl SettlementConfig {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        money::check_scale(self.scale)
    }
}

/// How a sheet should be settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Greedy,
    /// Settle `total` evenly against the configured sink.
    EvenSplit { total: Decimal },
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Greedy => StrategyKind::Greedy,
            Strategy::EvenSplit { .. } => StrategyKind::EvenSplit,
        }
    }
}

/// Stateless settlement engine.
///
/// Holds only its configuration; every call works on its own copies, so a
/// single engine can be shared across threads.
///
/// # Examples
///
/// ```
/// use bill_settlement::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let sheet: BalanceSheet = [
///     ParticipantBalance::new("A", dec!(-30)),
///     ParticipantBalance::new("B", dec!(-20)),
///     ParticipantBalance::new("C", dec!(50)),
/// ]
/// .into_iter()
/// .collect();
///
/// let report = SettlementEngine::default().settle(&sheet).unwrap();
/// assert_eq!(report.transfer_count(), 2);
/// assert!(report.is_fully_settled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: SettlementConfig,
}

impl SettlementEngine {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Settle a sheet with the greedy matcher.
    pub fn settle(&self, sheet: &BalanceSheet) -> Result<SettlementReport, SettlementError> {
        self.settle_with(&Strategy::Greedy, sheet)
    }

    /// Settle wire entries (`{name, balance}`) with the greedy matcher.
    pub fn settle_entries(
        &self,
        entries: &[BalanceEntry],
    ) -> Result<SettlementReport, SettlementError> {
        self.config.validate()?;
        let sheet = BalanceSheet::from_entries(entries, self.config.scale)?;
        self.settle(&sheet)
    }

    /// Settle a JSON array of `{name, balance}` objects.
    pub fn settle_json(&self, json: &str) -> Result<SettlementReport, SettlementError> {
        let entries: Vec<BalanceEntry> = serde_json::from_str(json)?;
        self.settle_entries(&entries)
    }

    /// Settle an event's participants. The even split uses the event's total bill.
    pub fn settle_event(
        &self,
        event: &Event,
        kind: StrategyKind,
    ) -> Result<SettlementReport, SettlementError> {
        self.config.validate()?;
        let sheet = event.balance_sheet(self.config.scale)?;
        let strategy = match kind {
            StrategyKind::Greedy => Strategy::Greedy,
            StrategyKind::EvenSplit => Strategy::EvenSplit {
                total: event.total_bill(),
            },
        };
        self.settle_with(&strategy, &sheet)
    }

    pub fn settle_with(
        &self,
        strategy: &Strategy,
        sheet: &BalanceSheet,
    ) -> Result<SettlementReport, SettlementError> {
        self.config.validate()?;
        sheet.validate()?;

        let report = match strategy {
            Strategy::Greedy => {
                let transfers = greedy::settle(sheet);
                let unbalanced = self.check_balance(sheet, &transfers);
                SettlementReport::new(strategy.kind(), transfers, unbalanced, Decimal::ZERO)
            }
            Strategy::EvenSplit { total } => {
                let split =
                    even_split::settle(sheet, *total, &self.config.sink, self.config.scale)?;
                SettlementReport::new(
                    strategy.kind(),
                    split.transfers,
                    None,
                    split.unallocated,
                )
            }
        };

        log::info!(
            "{} settlement of {} participants: {} transfers, {} moved",
            report.strategy(),
            sheet.len(),
            report.transfer_count(),
            report.total_transferred()
        );
        Ok(report)
    }

    fn check_balance(
        &self,
        sheet: &BalanceSheet,
        transfers: &[Transfer],
    ) -> Option<UnbalancedInput> {
        if sheet.is_balanced(self.config.tolerance) {
            return None;
        }

        let mut ledger = Ledger::from_sheet(sheet);
        for transfer in transfers {
            ledger.apply_transfer(transfer);
        }
        let imbalance = sheet.total();
        let residuals = ledger.residuals(self.config.tolerance);
        log::warn!(
            "balances sum to {} instead of zero; {} participant(s) left unsettled",
            imbalance,
            residuals.len()
        );
        Some(UnbalancedInput {
            imbalance,
            residuals,
        })
    }
}
