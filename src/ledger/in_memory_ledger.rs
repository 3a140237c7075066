use std::collections::{HashMap, hash_map::Entry};

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountState},
    operation::{Operation, OperationOutcome},
};

use super::{Ledger, LedgerError};

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    accounts: HashMap<String, Account>,
}

impl InMemoryLedger {
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Ledger for InMemoryLedger {
    fn register(&mut self, account: Account) -> Result<(), LedgerError> {
        match self.accounts.entry(account.name().to_string()) {
            Entry::Occupied(entry) => Err(LedgerError::AccountAlreadyExists {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(
                    name = account.name(),
                    category = %account.category(),
                    balance = %account.balance(),
                    "account registered"
                );
                entry.insert(account);
                Ok(())
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(name)
            .ok_or_else(|| LedgerError::AccountNotFound {
                name: name.to_string(),
            })
    }

    fn set_active(&mut self, name: &str, active: bool) -> Result<AccountState, LedgerError> {
        let acc = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| LedgerError::AccountNotFound {
                name: name.to_string(),
            })?;
        let state = if active {
            AccountState::Active
        } else {
            AccountState::Inactive
        };
        if acc.state() == state {
            return Err(LedgerError::AccountAlreadyInState {
                name: name.to_string(),
                state,
            });
        }
        acc.set_state(state);
        info!(name, %state, "account state changed");
        Ok(state)
    }

    fn dispatch(
        &mut self,
        name: &str,
        operation: Operation,
        amount: Decimal,
        participants: &[&str],
    ) -> Result<OperationOutcome, LedgerError> {
        self.lookup(name)?;
        let resolved = participants
            .iter()
            .map(|participant| self.lookup(participant))
            .collect::<Result<Vec<_>, _>>()?;

        let execution = operation.execute(amount, &resolved)?;

        // every posting refers to a participant resolved above
        for posting in &execution.postings {
            if let Some(acc) = self.accounts.get_mut(&posting.account) {
                acc.apply(&posting.event);
            }
        }
        debug!(name, ?operation, %amount, "operation applied");
        Ok(execution.outcome)
    }
}
