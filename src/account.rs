use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{history::History, money::Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountCategory {
    Savings,
    Checking,
    Business,
}

impl AccountCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountCategory::Savings => "Savings",
            AccountCategory::Checking => "Checking",
            AccountCategory::Business => "Business",
        }
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountCategory {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Savings" => Ok(AccountCategory::Savings),
            "Checking" => Ok(AccountCategory::Checking),
            "Business" => Ok(AccountCategory::Business),
            _ => Err(AccountError::InvalidCategory {
                category: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    Active,
    Inactive,
}

impl AccountState {
    /// Word used when reporting a transition into this state.
    pub fn transition_verb(self) -> &'static str {
        match self {
            AccountState::Active => "activated",
            AccountState::Inactive => "deactivated",
        }
    }
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountState::Active => f.write_str("Active"),
            AccountState::Inactive => f.write_str("Inactive"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid account type {category}.")]
    InvalidCategory { category: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEventKind {
    Deposited,
    Withdrawn,
    TransferredOut,
    TransferredIn,
}

/// Balance change produced by an operation. Applying an event is the only
/// way an account balance is modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEvent {
    pub(crate) amount: Decimal,
    pub(crate) kind: AccountEventKind,
}

impl AccountEvent {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> AccountEventKind {
        self.kind
    }

    /// History entry for this event, if it is logged on the account it
    /// applies to. Incoming transfers are not logged.
    pub fn description(&self) -> Option<String> {
        let amount = Money(self.amount);
        match self.kind {
            AccountEventKind::Deposited => Some(format!("Deposit ${amount}")),
            AccountEventKind::Withdrawn => Some(format!("Withdrawal ${amount}")),
            AccountEventKind::TransferredOut => Some(format!("Transfer ${amount}")),
            AccountEventKind::TransferredIn => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    balance: Decimal,
    category: AccountCategory,
    state: AccountState,
    history: History,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        initial_balance: Decimal,
        category: AccountCategory,
    ) -> Self {
        let mut history = History::default();
        history.record(format!("Initial Deposit ${}", Money(initial_balance)));
        Self {
            name: name.into(),
            balance: initial_balance,
            category,
            state: AccountState::Active,
            history,
        }
    }

    /// Same as [`Account::new`], with the category given by its name.
    pub fn create(
        name: impl Into<String>,
        initial_balance: Decimal,
        category: &str,
    ) -> Result<Self, AccountError> {
        Ok(Self::new(name, initial_balance, category.parse()?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn category(&self) -> AccountCategory {
        self.category
    }

    pub fn fee_percent(&self) -> Decimal {
        self.category.fee_percent()
    }

    pub fn state(&self) -> AccountState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == AccountState::Active
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn view(&self) -> AccountView<'_> {
        AccountView { account: self }
    }

    pub(crate) fn set_state(&mut self, state: AccountState) {
        self.state = state;
    }

    pub(crate) fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited | AccountEventKind::TransferredIn => {
                self.balance += event.amount;
            }
            AccountEventKind::Withdrawn | AccountEventKind::TransferredOut => {
                self.balance -= event.amount;
            }
        }
        if let Some(description) = event.description() {
            self.history.record(description);
        }
    }
}

/// Read-only snapshot of an account, rendered as a single line.
#[derive(Debug, Clone, Copy)]
pub struct AccountView<'a> {
    account: &'a Account,
}

impl fmt::Display for AccountView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acc = self.account;
        write!(
            f,
            "{}'s Account: Type: {}, Balance: ${}, State: {}, Transactions: [{}].",
            acc.name,
            acc.category,
            Money(acc.balance),
            acc.state,
            acc.history
        )
    }
}
