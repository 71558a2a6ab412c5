pub mod balance;
pub mod error;
pub mod event;
pub mod ledger;
pub mod money;
pub mod participant;
pub mod transfer;
