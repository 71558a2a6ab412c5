use crate::core::balance::BalanceSheet;
use crate::core::error::InvalidInput;
use crate::core::money;
use crate::core::participant::ParticipantId;
use crate::core::transfer::Transfer;
use rust_decimal::Decimal;

/// Outcome of settling a total evenly against a sink account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvenSplit {
    pub share: Decimal,
    pub transfers: Vec<Transfer>,
    /// `total - share * n`: what rounding the share left unallocated.
    pub unallocated: Decimal,
}

/// Every participant pays an equal share of `total` into `sink`.
///
/// Balances are ignored; only the participant list and its order matter.
/// The share is quantized to `scale` decimal places and a zero share emits
/// no transfers. A participant named like the sink is rejected: it could
/// not pay its share without transferring to itself.
pub fn settle(
    sheet: &BalanceSheet,
    total: Decimal,
    sink: &ParticipantId,
    scale: u32,
) -> Result<EvenSplit, InvalidInput> {
    if let Some(entry) = sheet.entries().iter().find(|e| &e.participant == sink) {
        return Err(InvalidInput::SinkNameClash {
            name: entry.participant.clone(),
        });
    }
    if sheet.is_empty() {
        return Ok(EvenSplit {
            share: Decimal::ZERO,
            transfers: Vec::new(),
            unallocated: total,
        });
    }

    let count = Decimal::from(sheet.len());
    let share = money::quantize(total / count, scale);

    let mut transfers = Vec::with_capacity(sheet.len());
    if share > Decimal::ZERO {
        for entry in sheet.entries() {
            transfers.push(Transfer::new(entry.participant.clone(), sink.clone(), share));
        }
    }
    let unallocated = total - share * count;
    log::debug!(
        "even split of {} over {} participants: share {}, unallocated {}",
        total,
        sheet.len(),
        share,
        unallocated
    );

    Ok(EvenSplit {
        share,
        transfers,
        unallocated,
    })
}
