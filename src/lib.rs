/// Accounts, their lifecycle state and the events that change their balance.
pub mod account;

/// Fee percentages per account category and commission computation.
pub mod fee;

/// Append-only transaction history.
pub mod history;

/// Fixed three decimal rendering of monetary amounts.
pub mod money;

/// Deposit, withdraw and transfer. Each operation validates its participants
/// and produces the events applied by the [`ledger`].
pub mod operation;

/// Account registry interface, plus "in memory" implementation.
pub mod ledger;

/// Parsed commands and their dispatch against a [`ledger::Ledger`].
pub mod command;

/// Line-oriented front-end used by the binary and the integration test.
pub mod bin_utils;
