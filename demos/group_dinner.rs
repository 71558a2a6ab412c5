//! Settling a group dinner.
//!
//! One person pays the bill, the balances are split evenly, and the engine
//! works out who pays whom. The same event is then settled with the
//! even-split policy for comparison.

use bill_settlement::core::balance::{BalanceSheet, ParticipantBalance};
use bill_settlement::core::event::{Event, EventParticipant};
use bill_settlement::settlement::report::StrategyKind;
use bill_settlement::settlement::SettlementEngine;
use rust_decimal_macros::dec;

fn main() {
    env_logger::init();

    println!("╔══════════════════════════════════════════╗");
    println!("║  bill-settlement: Group Dinner Example   ║");
    println!("╚══════════════════════════════════════════╝\n");

    let engine = SettlementEngine::default();

    // --- Scenario 1: one payer ---
    println!("━━━ Scenario 1: Alice pays a 120.00 dinner for four ━━━\n");

    let mut event = Event::new("Dinner at Luigi's", dec!(120))
        .with_participant(EventParticipant::new("Alice"))
        .with_participant(EventParticipant::new("Bob"))
        .with_participant(EventParticipant::new("Carol"))
        .with_participant(EventParticipant::new("Dan"));
    if let Err(e) = event.split_evenly("Alice", 2) {
        eprintln!("{}", e);
        return;
    }

    for line in event.summary_lines() {
        println!("  {}", line);
    }
    println!();

    match engine.settle_event(&event, StrategyKind::Greedy) {
        Ok(report) => println!("{}", report),
        Err(e) => eprintln!("{}", e),
    }

    match engine.settle_event(&event, StrategyKind::EvenSplit) {
        Ok(report) => println!("{}", report),
        Err(e) => eprintln!("{}", e),
    }

    // --- Scenario 2: several people paid for different things ---
    println!("━━━ Scenario 2: a weekend trip with mixed payments ━━━\n");

    let sheet: BalanceSheet = [
        ParticipantBalance::new("Alice", dec!(-45.50)),
        ParticipantBalance::new("Bob", dec!(80.25)),
        ParticipantBalance::new("Carol", dec!(-60)),
        ParticipantBalance::new("Dan", dec!(25.25)),
        ParticipantBalance::new("Erin", dec!(0)),
    ]
    .into_iter()
    .collect();

    match engine.settle(&sheet) {
        Ok(report) => println!("{}", report),
        Err(e) => eprintln!("{}", e),
    }

    // --- Scenario 3: the books do not balance ---
    println!("━━━ Scenario 3: balances that do not add up ━━━\n");

    let sheet: BalanceSheet = [
        ParticipantBalance::new("A", dec!(-15)),
        ParticipantBalance::new("B", dec!(10)),
        ParticipantBalance::new("C", dec!(10)),
    ]
    .into_iter()
    .collect();

    match engine.settle(&sheet) {
        Ok(report) => println!("{}", report),
        Err(e) => eprintln!("{}", e),
    }
}
