use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountState},
    operation::{Operation, OperationError, OperationOutcome},
};

pub mod in_memory_ledger;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {name} does not exist.")]
    AccountNotFound { name: String },
    #[error("Account {name} already exists.")]
    AccountAlreadyExists { name: String },
    #[error("Account {name} is already {}.", state.transition_verb())]
    AccountAlreadyInState { name: String, state: AccountState },
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    OperationErr(#[from] OperationError),
}

/// Registry of accounts for the lifetime of the ledger. Accounts are never
/// removed and a name is registered at most once.
pub trait Ledger {
    /// Registers `account` under its own name, leaving any existing account
    /// with the same name untouched.
    fn register(&mut self, account: Account) -> Result<(), LedgerError>;

    fn lookup(&self, name: &str) -> Result<&Account, LedgerError>;

    /// Moves the account into the active or inactive state and returns the
    /// new state. Requesting the current state is reported as
    /// [`LedgerError::AccountAlreadyInState`].
    fn set_active(&mut self, name: &str, active: bool) -> Result<AccountState, LedgerError>;

    /// Resolves `name`, then executes `operation` against `participants`.
    /// Balances and histories change only if the operation succeeds.
    fn dispatch(
        &mut self,
        name: &str,
        operation: Operation,
        amount: Decimal,
        participants: &[&str],
    ) -> Result<OperationOutcome, LedgerError>;
}
