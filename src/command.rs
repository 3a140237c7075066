use std::fmt;

use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{Account, AccountCategory, AccountState},
    ledger::{Ledger, LedgerError},
    money::Money,
    operation::{Operation, OperationOutcome},
};

/// Leading word of a command line.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Deposit,
    Withdraw,
    Transfer,
    View,
    Activate,
    Deactivate,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Malformed command: {0}")]
    Malformed(#[from] csv::Error),
    #[error("{kind:?} is missing argument `{argument}`")]
    MissingArgument {
        kind: CommandKind,
        argument: &'static str,
    },
    #[error("Invalid amount `{value}` for {kind:?}")]
    InvalidAmount {
        kind: CommandKind,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },
    #[error("Amount must not be negative for {kind:?}, got `{value}`")]
    NegativeAmount { kind: CommandKind, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `Create account <category> <name> <initial balance>`
    Create {
        category: String,
        name: String,
        initial_balance: Decimal,
    },
    Deposit {
        name: String,
        amount: Decimal,
    },
    Withdraw {
        name: String,
        amount: Decimal,
    },
    Transfer {
        source: String,
        destination: String,
        amount: Decimal,
    },
    View {
        name: String,
    },
    Activate {
        name: String,
    },
    Deactivate {
        name: String,
    },
}

/// Successful result of a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Created {
        name: String,
        category: AccountCategory,
        initial_balance: Decimal,
    },
    Executed(OperationOutcome),
    Viewed(String),
    StateChanged {
        name: String,
        state: AccountState,
    },
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Created {
                name,
                category,
                initial_balance,
            } => write!(
                f,
                "A new {category} account created for {name} with an initial balance of ${}.",
                Money(*initial_balance)
            ),
            CommandOutput::Executed(outcome) => write!(f, "{outcome}"),
            CommandOutput::Viewed(view) => f.write_str(view),
            CommandOutput::StateChanged { name, state } => {
                write!(f, "{name}'s account is now {}.", state.transition_verb())
            }
        }
    }
}

impl Command {
    /// Parses one tokenized command line. Trailing extra fields are ignored.
    pub fn parse(record: &StringRecord) -> Result<Self, CommandError> {
        let (kind,): (CommandKind,) = record.deserialize(None)?;
        let arg = |idx: usize, argument: &'static str| {
            record
                .get(idx)
                .filter(|value| !value.is_empty())
                .ok_or(CommandError::MissingArgument { kind, argument })
        };
        let amount = |idx: usize, argument: &'static str| -> Result<Decimal, CommandError> {
            let value = arg(idx, argument)?;
            let amount =
                Decimal::from_str_exact(value).map_err(|source| CommandError::InvalidAmount {
                    kind,
                    value: value.to_string(),
                    source,
                })?;
            if amount < Decimal::ZERO {
                return Err(CommandError::NegativeAmount {
                    kind,
                    value: value.to_string(),
                });
            }
            Ok(amount)
        };

        let command = match kind {
            CommandKind::Create => Command::Create {
                category: arg(2, "category")?.to_string(),
                name: arg(3, "name")?.to_string(),
                initial_balance: amount(4, "initial balance")?,
            },
            CommandKind::Deposit => Command::Deposit {
                name: arg(1, "name")?.to_string(),
                amount: amount(2, "amount")?,
            },
            CommandKind::Withdraw => Command::Withdraw {
                name: arg(1, "name")?.to_string(),
                amount: amount(2, "amount")?,
            },
            CommandKind::Transfer => Command::Transfer {
                source: arg(1, "source")?.to_string(),
                destination: arg(2, "destination")?.to_string(),
                amount: amount(3, "amount")?,
            },
            CommandKind::View => Command::View {
                name: arg(1, "name")?.to_string(),
            },
            CommandKind::Activate => Command::Activate {
                name: arg(1, "name")?.to_string(),
            },
            CommandKind::Deactivate => Command::Deactivate {
                name: arg(1, "name")?.to_string(),
            },
        };
        Ok(command)
    }

    /// Runs the command against `ledger`. Domain failures are returned as
    /// values and never affect later commands.
    pub fn execute<L>(self, ledger: &mut L) -> Result<CommandOutput, LedgerError>
    where
        L: Ledger + ?Sized,
    {
        match self {
            Command::Create {
                category,
                name,
                initial_balance,
            } => {
                let account = Account::create(name.clone(), initial_balance, &category)?;
                let category = account.category();
                ledger.register(account)?;
                Ok(CommandOutput::Created {
                    name,
                    category,
                    initial_balance,
                })
            }
            Command::Deposit { name, amount } => ledger
                .dispatch(&name, Operation::Deposit, amount, &[name.as_str()])
                .map(CommandOutput::Executed),
            Command::Withdraw { name, amount } => ledger
                .dispatch(&name, Operation::Withdraw, amount, &[name.as_str()])
                .map(CommandOutput::Executed),
            Command::Transfer {
                source,
                destination,
                amount,
            } => {
                // both ends are resolved before anything is dispatched
                ledger.lookup(&source)?;
                ledger.lookup(&destination)?;
                ledger
                    .dispatch(
                        &source,
                        Operation::Transfer,
                        amount,
                        &[source.as_str(), destination.as_str()],
                    )
                    .map(CommandOutput::Executed)
            }
            Command::View { name } => {
                let view = ledger.lookup(&name)?.view().to_string();
                Ok(CommandOutput::Viewed(view))
            }
            Command::Activate { name } => {
                let state = ledger.set_active(&name, true)?;
                Ok(CommandOutput::StateChanged { name, state })
            }
            Command::Deactivate { name } => {
                let state = ledger.set_active(&name, false)?;
                Ok(CommandOutput::StateChanged { name, state })
            }
        }
    }
}
