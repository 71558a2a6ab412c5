use crate::core::balance::BalanceSheet;
use crate::core::participant::ParticipantId;
use crate::core::transfer::Transfer;
use rust_decimal::Decimal;

/// One side of the matching: a participant and what they still owe or are owed.
#[derive(Debug)]
struct Position<'a> {
    participant: &'a ParticipantId,
    remaining: Decimal,
}

/// Greedy two-pointer matching of debtors against creditors.
///
/// # Algorithm
///
/// 1. Queue debtors (by magnitude) and creditors in sheet order. Zero
///    balances join neither queue.
/// 2. Match the head debtor with the head creditor for
///    `min(debtor.remaining, creditor.remaining)`.
/// 3. Pop whichever side reached zero; both pop on an exact match.
/// 4. Stop when either queue runs out.
///
/// Produces at most `debtors + creditors - 1` transfers. If debts and credits
/// do not cancel out, the longer side keeps a residual on its last active
/// entry and the remaining queue is left untouched.
///
/// The sheet is only borrowed; the working magnitudes are private copies.
pub fn settle(sheet: &BalanceSheet) -> Vec<Transfer> {
    let mut debtors: Vec<Position<'_>> = Vec::new();
    let mut creditors: Vec<Position<'_>> = Vec::new();
    for entry in sheet.entries() {
        if entry.is_debtor() {
            debtors.push(Position {
                participant: &entry.participant,
                remaining: entry.magnitude(),
            });
        } else if entry.is_creditor() {
            creditors.push(Position {
                participant: &entry.participant,
                remaining: entry.balance,
            });
        }
    }
    log::debug!(
        "matching {} debtors against {} creditors",
        debtors.len(),
        creditors.len()
    );

    let mut transfers = Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].remaining.min(creditors[j].remaining);

        if amount > Decimal::ZERO {
            let transfer = Transfer::new(
                debtors[i].participant.clone(),
                creditors[j].participant.clone(),
                amount,
            );
            log::debug!("{}", transfer);
            transfers.push(transfer);
        }

        debtors[i].remaining -= amount;
        creditors[j].remaining -= amount;

        if debtors[i].remaining.is_zero() {
            i += 1;
        }
        if creditors[j].remaining.is_zero() {
            j += 1;
        }
    }

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance::ParticipantBalance;
    use rust_decimal_macros::dec;

    fn sheet(entries: &[(&str, Decimal)]) -> BalanceSheet {
        entries
            .iter()
            .map(|(name, balance)| ParticipantBalance::new(*name, *balance))
            .collect()
    }

    fn triples(transfers: &[Transfer]) -> Vec<(String, String, Decimal)> {
        transfers
            .iter()
            .map(|t| (t.from().to_string(), t.to().to_string(), t.amount()))
            .collect()
    }

    #[test]
    fn test_two_debtors_one_creditor() {
        let transfers = settle(&sheet(&[("A", dec!(-30)), ("B", dec!(-20)), ("C", dec!(50))]));
        assert_eq!(
            triples(&transfers),
            vec![
                ("A".into(), "C".into(), dec!(30)),
                ("B".into(), "C".into(), dec!(20)),
            ]
        );
    }

    #[test]
    fn test_one_debtor_two_creditors() {
        let transfers = settle(&sheet(&[("A", dec!(-10)), ("B", dec!(5)), ("C", dec!(5))]));
        assert_eq!(
            triples(&transfers),
            vec![
                ("A".into(), "B".into(), dec!(5)),
                ("A".into(), "C".into(), dec!(5)),
            ]
        );
    }

    #[test]
    fn test_all_zero() {
        assert!(settle(&sheet(&[("A", Decimal::ZERO), ("B", Decimal::ZERO)])).is_empty());
        assert!(settle(&BalanceSheet::new()).is_empty());
    }

    #[test]
    fn test_equal_amounts_advance_both_cursors() {
        let transfers = settle(&sheet(&[
            ("A", dec!(-10)),
            ("B", dec!(-10)),
            ("C", dec!(10)),
            ("D", dec!(10)),
        ]));
        assert_eq!(
            triples(&transfers),
            vec![
                ("A".into(), "C".into(), dec!(10)),
                ("B".into(), "D".into(), dec!(10)),
            ]
        );
    }

    #[test]
    fn test_ties_broken_by_input_order() {
        let transfers = settle(&sheet(&[
            ("C", dec!(50)),
            ("B", dec!(-20)),
            ("A", dec!(-30)),
        ]));
        assert_eq!(
            triples(&transfers),
            vec![
                ("B".into(), "C".into(), dec!(20)),
                ("A".into(), "C".into(), dec!(30)),
            ]
        );
    }

    #[test]
    fn test_unbalanced_leaves_creditor_residual() {
        let transfers = settle(&sheet(&[("A", dec!(-15)), ("B", dec!(10)), ("C", dec!(10))]));
        assert_eq!(
            triples(&transfers),
            vec![
                ("A".into(), "B".into(), dec!(10)),
                ("A".into(), "C".into(), dec!(5)),
            ]
        );
    }

    #[test]
    fn test_only_debtors() {
        assert!(settle(&sheet(&[("A", dec!(-15)), ("B", dec!(-5))])).is_empty());
    }

    #[test]
    fn test_sheet_is_not_mutated() {
        let input = sheet(&[("A", dec!(-30)), ("B", dec!(30))]);
        let before = input.clone();
        let _ = settle(&input);
        assert_eq!(input, before);
    }
}
