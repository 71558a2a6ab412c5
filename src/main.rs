//! bill-settlement CLI
//!
//! Settle shared-bill balances from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle a list of {name, balance} entries or an event record
//! bill-settlement settle --input balances.json
//!
//! # Output as JSON
//! bill-settlement settle --input event.json --format json
//!
//! # Everyone pays an equal share of the event's total bill into one account
//! bill-settlement settle --input event.json --strategy even
//!
//! # Recompute an event's balances for a single payer
//! bill-settlement split --input event.json --payer Alice
//!
//! # Generate a random balanced group for testing
//! bill-settlement generate --participants 8 --seed 1
//! ```

use bill_settlement::core::balance::BalanceEntry;
use bill_settlement::core::event::Event;
use bill_settlement::core::money;
use bill_settlement::core::participant::ParticipantId;
use bill_settlement::settlement::report::{SettlementReport, StrategyKind};
use bill_settlement::settlement::{SettlementConfig, SettlementEngine};
use bill_settlement::simulation::random_group::{generate_balanced_group, GroupConfig};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"bill-settlement: settle shared-bill balances with as few payments as possible

USAGE:
    bill-settlement <COMMAND> [OPTIONS]

COMMANDS:
    settle      Compute the payments that settle a set of balances
    split       Recompute an event's balances for a single payer
    summary     Show who owes and who is owed in an event
    generate    Generate a random balanced group (for testing)
    help        Show this message

OPTIONS (settle):
    --input <FILE>        JSON array of {{name, balance}} or an event record
    --format <FORMAT>     Output format: text (default) or json
    --strategy <NAME>     greedy (default) or even
    --scale <N>           Decimal places amounts are rounded to (default: 2)
    --tolerance <X>       Largest balance sum treated as zero (default: 0.000001)
    --sink <NAME>         Receiving account for the even strategy (default: "settled account")

OPTIONS (split):
    --input <FILE>        Event record
    --payer <NAME>        Participant who paid the whole bill
    --scale <N>           Decimal places shares are rounded to (default: 2)
    --output <FILE>       Write to file instead of stdout

OPTIONS (summary):
    --input <FILE>        Event record

OPTIONS (generate):
    --participants <N>    Number of participants (default: 10)
    --seed <N>            Seed for a reproducible group
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    bill-settlement settle --input balances.json
    bill-settlement settle --input event.json --strategy even --format json
    bill-settlement split --input event.json --payer Alice --output event.json
    bill-settlement summary --input event.json
    bill-settlement generate --participants 20 --seed 7"#
    );
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// What `settle` accepts: bare balances or a full event record.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SettleInput {
    Entries(Vec<BalanceEntry>),
    Event(Event),
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("cannot read file '{}': {}", path, e)))
}

fn load_event(path: &str) -> Event {
    let content = read_input(path);
    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing event JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "eventName": "Dinner",
  "totalBill": 90,
  "participants": [
    {{ "name": "Alice", "balance": 60, "paidBy": "Yes" }},
    {{ "name": "Bob", "balance": -30, "paidBy": "No" }}
  ]
}}"#
        );
        process::exit(1);
    })
}

fn to_json(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fail(format!("cannot encode output: {}", e)))
}

fn write_output(json: &str, output_path: Option<String>) {
    match output_path {
        Some(path) => fs::write(&path, json)
            .unwrap_or_else(|e| fail(format!("cannot write to '{}': {}", path, e))),
        None => println!("{}", json),
    }
}

/// Pull the value following a flag, or exit with a message naming the flag.
fn flag_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    args.get(i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires {}", flag, what)))
}

fn parse_flag<T: std::str::FromStr>(args: &[String], i: usize, flag: &str, what: &str) -> T {
    flag_value(args, i, flag, what)
        .parse()
        .unwrap_or_else(|_| fail(format!("{} requires {}", flag, what)))
}

fn cmd_settle(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut kind = StrategyKind::Greedy;
    let mut config = SettlementConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(flag_value(args, i, "--input", "a file path"));
            }
            "--format" => {
                i += 1;
                format = flag_value(args, i, "--format", "'text' or 'json'");
            }
            "--strategy" => {
                i += 1;
                kind = match flag_value(args, i, "--strategy", "'greedy' or 'even'").as_str() {
                    "greedy" => StrategyKind::Greedy,
                    "even" => StrategyKind::EvenSplit,
                    other => fail(format!("unknown strategy '{}'", other)),
                };
            }
            "--scale" => {
                i += 1;
                config.scale = parse_flag(args, i, "--scale", "a number of decimal places");
            }
            "--tolerance" => {
                i += 1;
                config.tolerance = parse_flag::<Decimal>(args, i, "--tolerance", "a decimal");
            }
            "--sink" => {
                i += 1;
                config.sink = ParticipantId::new(flag_value(args, i, "--sink", "an account name"));
            }
            _ => fail(format!("unknown option: {}", args[i])),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    let content = read_input(&path);
    let input: SettleInput = serde_json::from_str(&content).unwrap_or_else(|e| {
        fail(format!(
            "expected a JSON array of {{name, balance}} or an event record: {}",
            e
        ))
    });

    let engine = SettlementEngine::new(config);
    let result = match input {
        SettleInput::Event(event) => engine.settle_event(&event, kind),
        SettleInput::Entries(entries) => match kind {
            StrategyKind::Greedy => engine.settle_entries(&entries),
            StrategyKind::EvenSplit => fail(
                "the even strategy needs an event record with a totalBill, not bare balances",
            ),
        },
    };
    let report: SettlementReport = result.unwrap_or_else(|e| fail(e));

    if format == "json" {
        println!("{}", to_json(&report));
    } else {
        print!("{}", report);
    }
}

fn cmd_split(args: &[String]) {
    let mut input_path = None;
    let mut payer = None;
    let mut scale = money::DEFAULT_SCALE;
    let mut output_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(flag_value(args, i, "--input", "a file path"));
            }
            "--payer" => {
                i += 1;
                payer = Some(flag_value(args, i, "--payer", "a participant name"));
            }
            "--scale" => {
                i += 1;
                scale = parse_flag(args, i, "--scale", "a number of decimal places");
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(args, i, "--output", "a file path"));
            }
            _ => fail(format!("unknown option: {}", args[i])),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    let payer = payer.unwrap_or_else(|| fail("--payer <NAME> is required"));

    let mut event = load_event(&path);
    event.split_evenly(&payer, scale).unwrap_or_else(|e| fail(e));
    write_output(&to_json(&event), output_path);
}

fn cmd_summary(args: &[String]) {
    let mut input_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(flag_value(args, i, "--input", "a file path"));
            }
            _ => fail(format!("unknown option: {}", args[i])),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    let event = load_event(&path);

    println!("=== {} ===", event.event_name());
    if !event.description().is_empty() {
        println!("{}", event.description());
    }
    println!("Total bill: {}", event.total_bill());
    if event.participants().is_empty() {
        println!("No participants.");
    }
    for line in event.summary_lines() {
        println!("  {}", line);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = GroupConfig::default();
    let mut output_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                config.participant_count = parse_flag(args, i, "--participants", "a number");
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_flag(args, i, "--seed", "a number"));
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(args, i, "--output", "a file path"));
            }
            _ => fail(format!("unknown option: {}", args[i])),
        }
        i += 1;
    }

    let sheet = generate_balanced_group(&config);
    let entries: Vec<BalanceEntry> = sheet
        .entries()
        .iter()
        .map(|e| BalanceEntry::new(e.participant.as_str(), money::to_f64(e.balance)))
        .collect();

    let json = to_json(&entries);
    if let Some(path) = &output_path {
        eprintln!("Generated {} participants → {}", entries.len(), path);
    }
    write_output(&json, output_path);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "split" => cmd_split(rest),
        "summary" => cmd_summary(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
