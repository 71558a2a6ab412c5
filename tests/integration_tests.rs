use bill_settlement::core::balance::{BalanceEntry, BalanceSheet, ParticipantBalance};
use bill_settlement::core::error::InvalidInput;
use bill_settlement::core::event::{Event, EventParticipant};
use bill_settlement::core::ledger::Ledger;
use bill_settlement::core::participant::ParticipantId;
use bill_settlement::core::transfer::Transfer;
use bill_settlement::settlement::report::StrategyKind;
use bill_settlement::settlement::{SettlementEngine, Strategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn triples(transfers: &[Transfer]) -> Vec<(&str, &str, Decimal)> {
    transfers
        .iter()
        .map(|t| (t.from().as_str(), t.to().as_str(), t.amount()))
        .collect()
}

fn settled_ledger(entries: &[BalanceEntry], transfers: &[Transfer]) -> Ledger {
    let sheet = BalanceSheet::from_entries(entries, 2).unwrap();
    let mut ledger = Ledger::from_sheet(&sheet);
    for t in transfers {
        ledger.apply_transfer(t);
    }
    ledger
}

#[test]
fn two_debtors_pay_one_creditor() {
    let entries = vec![
        BalanceEntry::new("A", -30.0),
        BalanceEntry::new("B", -20.0),
        BalanceEntry::new("C", 50.0),
    ];
    let report = SettlementEngine::default().settle_entries(&entries).unwrap();

    assert_eq!(
        triples(report.transfers()),
        vec![("A", "C", dec!(30)), ("B", "C", dec!(20))]
    );
    assert!(settled_ledger(&entries, report.transfers()).is_settled(Decimal::ZERO));
}

#[test]
fn one_debtor_pays_two_creditors() {
    let entries = vec![
        BalanceEntry::new("A", -10.0),
        BalanceEntry::new("B", 5.0),
        BalanceEntry::new("C", 5.0),
    ];
    let report = SettlementEngine::default().settle_entries(&entries).unwrap();

    assert_eq!(
        triples(report.transfers()),
        vec![("A", "B", dec!(5)), ("A", "C", dec!(5))]
    );
}

#[test]
fn all_zero_balances_need_no_transfers() {
    let entries = vec![BalanceEntry::new("A", 0.0), BalanceEntry::new("B", 0.0)];
    let report = SettlementEngine::default().settle_entries(&entries).unwrap();
    assert!(report.transfers().is_empty());
    assert!(report.is_fully_settled());
}

#[test]
fn unbalanced_input_flags_residual_creditor() {
    let entries = vec![
        BalanceEntry::new("A", -15.0),
        BalanceEntry::new("B", 10.0),
        BalanceEntry::new("C", 10.0),
    ];
    let report = SettlementEngine::default().settle_entries(&entries).unwrap();

    assert_eq!(
        triples(report.transfers()),
        vec![("A", "B", dec!(10)), ("A", "C", dec!(5))]
    );
    let advisory = report.unbalanced().expect("imbalance must be reported");
    assert_eq!(advisory.imbalance, dec!(5));
    assert_eq!(advisory.residuals, vec![ParticipantBalance::new("C", dec!(5))]);

    let ledger = settled_ledger(&entries, report.transfers());
    assert_eq!(ledger.position(&ParticipantId::new("A")), Decimal::ZERO);
    assert_eq!(ledger.position(&ParticipantId::new("B")), Decimal::ZERO);
    assert_eq!(ledger.position(&ParticipantId::new("C")), dec!(5));
}

#[test]
fn tenths_settle_without_floating_residue() {
    let entries = vec![BalanceEntry::new("A", -0.1), BalanceEntry::new("B", 0.1)];
    let report = SettlementEngine::default().settle_entries(&entries).unwrap();

    assert_eq!(triples(report.transfers()), vec![("A", "B", dec!(0.1))]);
    assert!(report.unbalanced().is_none());
    assert!(settled_ledger(&entries, report.transfers()).is_settled(Decimal::ZERO));
}

#[test]
fn float_noise_in_balances_is_absorbed() {
    // 0.1 + 0.2 is not 0.3 in binary floating point
    let entries = vec![
        BalanceEntry::new("A", -(0.1 + 0.2)),
        BalanceEntry::new("B", 0.1),
        BalanceEntry::new("C", 0.2),
    ];
    let report = SettlementEngine::default().settle_entries(&entries).unwrap();
    assert_eq!(
        triples(report.transfers()),
        vec![("A", "B", dec!(0.1)), ("A", "C", dec!(0.2))]
    );
    assert!(report.is_fully_settled());
}

#[test]
fn non_finite_and_duplicate_inputs_are_rejected() {
    let engine = SettlementEngine::default();

    let nan = vec![BalanceEntry::new("A", f64::NAN), BalanceEntry::new("B", 1.0)];
    assert!(matches!(
        engine.settle_entries(&nan).unwrap_err().invalid_input(),
        Some(InvalidInput::NonFiniteBalance { .. })
    ));

    let inf = vec![BalanceEntry::new("A", f64::NEG_INFINITY)];
    assert!(matches!(
        engine.settle_entries(&inf).unwrap_err().invalid_input(),
        Some(InvalidInput::NonFiniteBalance { .. })
    ));

    let dup = vec![BalanceEntry::new("A", -1.0), BalanceEntry::new("A", 1.0)];
    assert!(matches!(
        engine.settle_entries(&dup).unwrap_err().invalid_input(),
        Some(InvalidInput::DuplicateName { .. })
    ));

    let blank = vec![BalanceEntry::new("", -1.0), BalanceEntry::new("B", 1.0)];
    assert_eq!(
        engine.settle_entries(&blank).unwrap_err().invalid_input(),
        Some(&InvalidInput::EmptyName { index: 0 })
    );
}

/// Full pipeline: event record → even split of balances → greedy settlement.
#[test]
fn event_pipeline_split_then_settle() {
    let mut event = Event::new("Cabin weekend", dec!(400))
        .with_description("Groceries and firewood")
        .with_participant(EventParticipant::new("Alice"))
        .with_participant(EventParticipant::new("Bob"))
        .with_participant(EventParticipant::new("Carol"))
        .with_participant(EventParticipant::new("Dan"));
    event.split_evenly("Carol", 2).unwrap();

    let engine = SettlementEngine::default();
    let report = engine.settle_event(&event, StrategyKind::Greedy).unwrap();
    assert_eq!(
        triples(report.transfers()),
        vec![
            ("Alice", "Carol", dec!(100)),
            ("Bob", "Carol", dec!(100)),
            ("Dan", "Carol", dec!(100)),
        ]
    );
    assert!(report.is_fully_settled());

    let even = engine.settle_event(&event, StrategyKind::EvenSplit).unwrap();
    assert_eq!(even.transfer_count(), 4);
    assert_eq!(even.total_transferred(), dec!(400));
    assert_eq!(even.unallocated(), Decimal::ZERO);
}

#[test]
fn uneven_split_still_settles_fully() {
    let mut event = Event::new("Dinner", dec!(100))
        .with_participant(EventParticipant::new("A"))
        .with_participant(EventParticipant::new("B"))
        .with_participant(EventParticipant::new("C"));
    event.split_evenly("A", 2).unwrap();

    let report = SettlementEngine::default()
        .settle_event(&event, StrategyKind::Greedy)
        .unwrap();
    assert_eq!(
        triples(report.transfers()),
        vec![("B", "A", dec!(33.33)), ("C", "A", dec!(33.33))]
    );
    assert!(report.unbalanced().is_none());
    assert!(report.is_fully_settled());
}

#[test]
fn even_split_rejects_participant_named_like_sink() {
    let mut sheet = BalanceSheet::new();
    sheet.add(ParticipantBalance::new("A", Decimal::ZERO));
    sheet.add(ParticipantBalance::new("settled account", Decimal::ZERO));

    let err = SettlementEngine::default()
        .settle_with(&Strategy::EvenSplit { total: dec!(10) }, &sheet)
        .unwrap_err();
    assert_eq!(
        err.invalid_input(),
        Some(&InvalidInput::SinkNameClash {
            name: ParticipantId::new("settled account")
        })
    );
}

#[test]
fn event_json_round_trip_through_engine() {
    let json = r#"{
        "eventName": "Pizza",
        "totalBill": 30,
        "participants": [
            { "name": "A", "balance": 20, "paidBy": "Yes" },
            { "name": "B", "balance": -10, "paidBy": "No" },
            { "name": "C", "balance": -10, "paidBy": "No" }
        ]
    }"#;
    let event: Event = serde_json::from_str(json).unwrap();
    let report = SettlementEngine::default()
        .settle_event(&event, StrategyKind::Greedy)
        .unwrap();

    let out = serde_json::to_value(&report).unwrap();
    assert_eq!(out["transfers"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(out["transfers"][0]["from"], "B");
    assert_eq!(out["transfers"][0]["to"], "A");
    approx::assert_relative_eq!(out["transfers"][0]["amount"].as_f64().unwrap(), 10.0);
}
