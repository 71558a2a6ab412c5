//! # bill-settlement
//!
//! Debt settlement for shared bills.
//!
//! Given each participant's signed balance for an event (negative: owes,
//! positive: is owed), the engine computes a short, deterministic list of
//! point-to-point payments that brings everyone back to zero.
//!
//! ## Architecture
//!
//! - **core**: participants, balances, transfers, ledger, event records, errors
//! - **settlement**: greedy matcher, even-split policy, reports
//! - **simulation**: random balanced groups for benchmarks and tests

pub mod core;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::{BalanceEntry, BalanceSheet, ParticipantBalance};
    pub use crate::core::error::{InvalidInput, SettlementError};
    pub use crate::core::event::{Event, EventParticipant, PaidBy};
    pub use crate::core::ledger::Ledger;
    pub use crate::core::participant::ParticipantId;
    pub use crate::core::transfer::Transfer;
    pub use crate::settlement::report::{SettlementReport, StrategyKind, UnbalancedInput};
    pub use crate::settlement::{SettlementConfig, SettlementEngine, Strategy};
}
