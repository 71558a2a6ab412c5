//! Shared-expense event records.
//!
//! An event is what the bill-splitter service persists: a name, a total
//! bill and the people sharing it. Only the `name`/`balance` pair of each
//! participant matters to settlement; everything else is projected away
//! before the engine sees it.

use crate::core::balance::{BalanceEntry, BalanceSheet};
use crate::core::error::InvalidInput;
use crate::core::money;
use crate::core::participant::ParticipantId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a participant paid the bill up front. Serialized as `"Yes"`/`"No"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaidBy {
    Yes,
    #[default]
    No,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParticipant {
    pub name: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub paid_by: PaidBy,
}

impl EventParticipant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: 0.0,
            paid_by: PaidBy::No,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned id; `_id` is accepted on input. Fresh events get a UUID.
    #[serde(default = "new_event_id", alias = "_id")]
    id: String,
    event_name: String,
    #[serde(default)]
    description: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    total_bill: Decimal,
    #[serde(default)]
    participants: Vec<EventParticipant>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

impl Event {
    pub fn new(event_name: impl Into<String>, total_bill: Decimal) -> Self {
        Self {
            id: new_event_id(),
            event_name: event_name.into(),
            description: String::new(),
            total_bill,
            participants: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_participant(mut self, participant: EventParticipant) -> Self {
        self.participants.push(participant);
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn total_bill(&self) -> Decimal {
        self.total_bill
    }

    pub fn participants(&self) -> &[EventParticipant] {
        &self.participants
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn payer(&self) -> Option<&EventParticipant> {
        self.participants.iter().find(|p| p.paid_by == PaidBy::Yes)
    }

    /// Project participants to the `{name, balance}` pairs the engine takes.
    pub fn balance_entries(&self) -> Vec<BalanceEntry> {
        self.participants
            .iter()
            .map(|p| BalanceEntry::new(p.name.as_str(), p.balance))
            .collect()
    }

    pub fn balance_sheet(&self, scale: u32) -> Result<BalanceSheet, InvalidInput> {
        BalanceSheet::from_entries(&self.balance_entries(), scale)
    }

    /// Recompute balances for one payer covering the whole bill.
    ///
    /// Every other participant owes `total_bill / n` rounded to `scale`
    /// decimal places. The payer is owed exactly the sum of those shares, so
    /// the rounding remainder stays with the payer and the group sums to zero.
    /// The payer is the only participant marked as having paid.
    pub fn split_evenly(&mut self, payer: &str, scale: u32) -> Result<(), InvalidInput> {
        money::check_scale(scale)?;
        if self.participants.is_empty() {
            return Err(InvalidInput::NoParticipants);
        }
        if !self.participants.iter().any(|p| p.name == payer) {
            return Err(InvalidInput::UnknownPayer {
                name: ParticipantId::new(payer),
            });
        }

        let count = self.participants.len();
        let share = money::quantize(self.total_bill / Decimal::from(count), scale);
        let payer_balance = money::to_f64(share * Decimal::from(count - 1));
        let share = money::to_f64(share);

        for p in &mut self.participants {
            if p.name == payer {
                p.balance = payer_balance;
                p.paid_by = PaidBy::Yes;
            } else {
                p.balance = -share;
                p.paid_by = PaidBy::No;
            }
        }
        log::debug!(
            "split '{}' evenly: {} participants, payer {}",
            self.event_name,
            self.participants.len(),
            payer
        );
        Ok(())
    }

    /// One human-readable line per participant, e.g. `"Bob: owes 25"`.
    pub fn summary_lines(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|p| {
                if p.balance < 0.0 {
                    format!("{}: owes {}", p.name, p.balance.abs())
                } else if p.balance > 0.0 {
                    format!("{}: is owed {}", p.name, p.balance)
                } else {
                    format!("{}: settled", p.name)
                }
            })
            .collect()
    }
}
