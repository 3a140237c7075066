use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountEvent, AccountEventKind},
    fee::Fee,
    money::Money,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdraw,
    Transfer,
}

impl Operation {
    /// Number of accounts the operation acts on.
    pub fn participant_count(self) -> usize {
        match self {
            Operation::Deposit | Operation::Withdraw => 1,
            Operation::Transfer => 2,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("Account {account} is inactive.")]
    AccountInactive { account: String },
    #[error("Insufficient funds for {account}.")]
    InsufficientFunds { account: String },
    #[error("{operation:?} expects {expected} participant(s), got {actual}.")]
    ParticipantCount {
        operation: Operation,
        expected: usize,
        actual: usize,
    },
    #[error("Balance of account {account} would overflow.")]
    Overflow { account: String },
}

/// Result of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Deposited {
        account: String,
        amount: Decimal,
        balance: Decimal,
    },
    Withdrawn {
        account: String,
        fee: Fee,
        balance: Decimal,
    },
    Transferred {
        source: String,
        destination: String,
        fee: Fee,
        source_balance: Decimal,
        destination_balance: Decimal,
    },
}

impl fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationOutcome::Deposited {
                account,
                amount,
                balance,
            } => write!(
                f,
                "{account} successfully deposited ${}. New Balance: ${}.",
                Money(*amount),
                Money(*balance)
            ),
            OperationOutcome::Withdrawn {
                account,
                fee,
                balance,
            } => write!(
                f,
                "{account} successfully withdrew ${}. New Balance: ${}. \
                 Transaction Fee: ${} ({:.1}%) in the system.",
                Money(fee.net),
                Money(*balance),
                Money(fee.commission),
                fee.percent
            ),
            OperationOutcome::Transferred {
                source,
                destination,
                fee,
                source_balance,
                ..
            } => write!(
                f,
                "{source} successfully transferred ${} to {destination}. New Balance: ${}. \
                 Transaction Fee: ${} ({:.1}%) in the system.",
                Money(fee.net),
                Money(*source_balance),
                Money(fee.commission),
                fee.percent
            ),
        }
    }
}

/// Event addressed to a registered account by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub account: String,
    pub event: AccountEvent,
}

/// Validated operation: the outcome to report and the events that produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub outcome: OperationOutcome,
    pub postings: Vec<Posting>,
}

impl Operation {
    /// Validates the operation against `participants` without modifying them.
    ///
    /// Inactive state is always checked before available funds.
    pub fn execute(
        self,
        amount: Decimal,
        participants: &[&Account],
    ) -> Result<Execution, OperationError> {
        if participants.len() != self.participant_count() {
            return Err(OperationError::ParticipantCount {
                operation: self,
                expected: self.participant_count(),
                actual: participants.len(),
            });
        }

        match self {
            Operation::Deposit => Self::deposit(participants[0], amount),
            Operation::Withdraw => Self::withdraw(participants[0], amount),
            Operation::Transfer => Self::transfer(participants[0], participants[1], amount),
        }
    }

    fn deposit(account: &Account, amount: Decimal) -> Result<Execution, OperationError> {
        let balance = account
            .balance()
            .checked_add(amount)
            .ok_or_else(|| Self::overflow(account))?;

        Ok(Execution {
            outcome: OperationOutcome::Deposited {
                account: account.name().to_string(),
                amount,
                balance,
            },
            postings: vec![Posting {
                account: account.name().to_string(),
                event: AccountEvent {
                    amount,
                    kind: AccountEventKind::Deposited,
                },
            }],
        })
    }

    fn withdraw(account: &Account, amount: Decimal) -> Result<Execution, OperationError> {
        let (fee, balance) = Self::debit(account, amount)?;

        Ok(Execution {
            outcome: OperationOutcome::Withdrawn {
                account: account.name().to_string(),
                fee,
                balance,
            },
            postings: vec![Posting {
                account: account.name().to_string(),
                event: AccountEvent {
                    amount,
                    kind: AccountEventKind::Withdrawn,
                },
            }],
        })
    }

    fn transfer(
        source: &Account,
        destination: &Account,
        amount: Decimal,
    ) -> Result<Execution, OperationError> {
        let (fee, source_balance) = Self::debit(source, amount)?;
        // a self transfer credits the already debited balance
        let (source_balance, destination_balance) = if source.name() == destination.name() {
            let balance = source_balance
                .checked_add(fee.net)
                .ok_or_else(|| Self::overflow(source))?;
            (balance, balance)
        } else {
            let balance = destination
                .balance()
                .checked_add(fee.net)
                .ok_or_else(|| Self::overflow(destination))?;
            (source_balance, balance)
        };

        Ok(Execution {
            outcome: OperationOutcome::Transferred {
                source: source.name().to_string(),
                destination: destination.name().to_string(),
                fee,
                source_balance,
                destination_balance,
            },
            postings: vec![
                Posting {
                    account: source.name().to_string(),
                    event: AccountEvent {
                        amount,
                        kind: AccountEventKind::TransferredOut,
                    },
                },
                Posting {
                    account: destination.name().to_string(),
                    event: AccountEvent {
                        amount: fee.net,
                        kind: AccountEventKind::TransferredIn,
                    },
                },
            ],
        })
    }

    /// Validates an outgoing movement and returns the fee and the balance left
    /// after it.
    fn debit(account: &Account, amount: Decimal) -> Result<(Fee, Decimal), OperationError> {
        if !account.is_active() {
            return Err(OperationError::AccountInactive {
                account: account.name().to_string(),
            });
        }
        // the fee comes out of the gross amount, so only the gross amount is compared
        if amount > account.balance() {
            return Err(OperationError::InsufficientFunds {
                account: account.name().to_string(),
            });
        }
        let fee =
            Fee::charge(amount, account.fee_percent()).ok_or_else(|| Self::overflow(account))?;
        let balance = account
            .balance()
            .checked_sub(amount)
            .ok_or_else(|| Self::overflow(account))?;
        Ok((fee, balance))
    }

    fn overflow(account: &Account) -> OperationError {
        OperationError::Overflow {
            account: account.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::account::{AccountCategory, AccountState};

    use super::*;

    fn account(name: &str, balance: i64, category: AccountCategory) -> Account {
        Account::new(name, Decimal::from(balance), category)
    }

    #[test]
    fn deposit_has_no_fee() {
        let acc = account("A", 100, AccountCategory::Business);
        let execution = Operation::Deposit
            .execute(Decimal::from(50), &[&acc])
            .unwrap();
        assert_eq!(
            execution.outcome,
            OperationOutcome::Deposited {
                account: "A".to_string(),
                amount: Decimal::from(50),
                balance: Decimal::from(150),
            }
        );
        assert_eq!(execution.postings.len(), 1);
        assert_eq!(execution.postings[0].event.kind(), AccountEventKind::Deposited);
        assert_eq!(
            execution.outcome.to_string(),
            "A successfully deposited $50.000. New Balance: $150.000."
        );
    }

    #[test]
    fn withdraw_charges_fee_on_gross_amount() {
        let acc = account("A", 150, AccountCategory::Savings);
        let execution = Operation::Withdraw
            .execute(Decimal::from(50), &[&acc])
            .unwrap();
        let OperationOutcome::Withdrawn { fee, balance, .. } = &execution.outcome else {
            panic!("unexpected outcome {:?}", execution.outcome);
        };
        assert_eq!(fee.commission, Decimal::new(750, 3));
        assert_eq!(fee.net, Decimal::new(49250, 3));
        assert_eq!(*balance, Decimal::from(100));
        assert_eq!(execution.postings[0].event.amount(), Decimal::from(50));
        assert_eq!(
            execution.outcome.to_string(),
            "A successfully withdrew $49.250. New Balance: $100.000. \
             Transaction Fee: $0.750 (1.5%) in the system."
        );
    }

    #[test]
    fn withdraw_whole_balance() {
        let acc = account("A", 20, AccountCategory::Checking);
        let execution = Operation::Withdraw
            .execute(Decimal::from(20), &[&acc])
            .unwrap();
        assert_eq!(
            execution.outcome.to_string(),
            "A successfully withdrew $19.600. New Balance: $0.000. \
             Transaction Fee: $0.400 (2.0%) in the system."
        );
    }

    #[rstest]
    #[case::withdraw(Operation::Withdraw)]
    #[case::transfer(Operation::Transfer)]
    fn inactive_is_checked_before_funds(#[case] operation: Operation) {
        let mut source = account("A", 10, AccountCategory::Savings);
        source.set_state(AccountState::Inactive);
        let destination = account("B", 0, AccountCategory::Savings);
        let participants: Vec<&Account> = match operation {
            Operation::Transfer => vec![&source, &destination],
            _ => vec![&source],
        };

        // both affordable and unaffordable amounts report inactivity
        for amount in [Decimal::ONE, Decimal::from(1000)] {
            let err = operation.execute(amount, &participants).unwrap_err();
            assert_eq!(
                err,
                OperationError::AccountInactive {
                    account: "A".to_string()
                }
            );
        }
    }

    #[rstest]
    #[case::withdraw(Operation::Withdraw)]
    #[case::transfer(Operation::Transfer)]
    fn insufficient_funds(#[case] operation: Operation) {
        let source = account("A", 10, AccountCategory::Savings);
        let destination = account("B", 0, AccountCategory::Savings);
        let participants: Vec<&Account> = match operation {
            Operation::Transfer => vec![&source, &destination],
            _ => vec![&source],
        };
        let err = operation
            .execute(Decimal::new(10001, 3), &participants)
            .unwrap_err();
        assert_eq!(
            err,
            OperationError::InsufficientFunds {
                account: "A".to_string()
            }
        );
        assert_eq!(err.to_string(), "Insufficient funds for A.");
    }

    #[test]
    fn transfer_sinks_fee() {
        let source = account("B", 100, AccountCategory::Business);
        let destination = account("C", 0, AccountCategory::Checking);
        let execution = Operation::Transfer
            .execute(Decimal::from(100), &[&source, &destination])
            .unwrap();

        let OperationOutcome::Transferred {
            fee,
            source_balance,
            destination_balance,
            ..
        } = &execution.outcome
        else {
            panic!("unexpected outcome {:?}", execution.outcome);
        };
        assert_eq!(fee.commission, Decimal::new(25, 1));
        assert_eq!(fee.net, Decimal::new(975, 1));
        assert_eq!(*source_balance, Decimal::ZERO);
        assert_eq!(*destination_balance, Decimal::new(975, 1));
        assert_eq!(
            *source_balance + *destination_balance,
            source.balance() + destination.balance() - fee.commission
        );

        let kinds: Vec<_> = execution
            .postings
            .iter()
            .map(|p| (p.account.as_str(), p.event.kind()))
            .collect();
        assert_eq!(
            kinds,
            [
                ("B", AccountEventKind::TransferredOut),
                ("C", AccountEventKind::TransferredIn)
            ]
        );
        assert_eq!(
            execution.outcome.to_string(),
            "B successfully transferred $97.500 to C. New Balance: $0.000. \
             Transaction Fee: $2.500 (2.5%) in the system."
        );
    }

    #[test]
    fn transfer_to_inactive_destination_is_allowed() {
        let source = account("A", 10, AccountCategory::Checking);
        let mut destination = account("B", 0, AccountCategory::Checking);
        destination.set_state(AccountState::Inactive);
        assert!(
            Operation::Transfer
                .execute(Decimal::from(5), &[&source, &destination])
                .is_ok()
        );
    }

    #[test]
    fn transfer_to_self_only_charges_fee() {
        let acc = account("A", 100, AccountCategory::Savings);
        let execution = Operation::Transfer
            .execute(Decimal::from(10), &[&acc, &acc])
            .unwrap();
        let OperationOutcome::Transferred {
            fee,
            source_balance,
            destination_balance,
            ..
        } = &execution.outcome
        else {
            panic!("unexpected outcome {:?}", execution.outcome);
        };
        assert_eq!(*source_balance, acc.balance() - fee.commission);
        assert_eq!(source_balance, destination_balance);
        assert_eq!(
            execution.outcome.to_string(),
            "A successfully transferred $9.850 to A. New Balance: $99.850. \
             Transaction Fee: $0.150 (1.5%) in the system."
        );
    }

    #[test]
    fn deposit_overflow_is_rejected() {
        let acc = account("A", 1, AccountCategory::Savings);
        let err = Operation::Deposit
            .execute(Decimal::MAX, &[&acc])
            .unwrap_err();
        assert_eq!(
            err,
            OperationError::Overflow {
                account: "A".to_string()
            }
        );
        assert_eq!(err.to_string(), "Balance of account A would overflow.");
    }

    #[test]
    fn withdraw_fee_overflow_is_rejected() {
        let acc = Account::new("A", Decimal::MAX, AccountCategory::Business);
        let err = Operation::Withdraw
            .execute(Decimal::MAX, &[&acc])
            .unwrap_err();
        assert!(matches!(err, OperationError::Overflow { .. }));
    }

    #[test]
    fn transfer_destination_overflow_is_rejected() {
        let source = account("A", 10, AccountCategory::Checking);
        let destination = Account::new("B", Decimal::MAX, AccountCategory::Checking);
        let err = Operation::Transfer
            .execute(Decimal::from(10), &[&source, &destination])
            .unwrap_err();
        assert_eq!(
            err,
            OperationError::Overflow {
                account: "B".to_string()
            }
        );
    }

    #[rstest]
    #[case(Operation::Deposit, 2)]
    #[case(Operation::Withdraw, 0)]
    #[case(Operation::Transfer, 1)]
    fn wrong_participant_count(#[case] operation: Operation, #[case] count: usize) {
        let acc = account("A", 10, AccountCategory::Checking);
        let participants = vec![&acc; count];
        let err = operation.execute(Decimal::ONE, &participants).unwrap_err();
        assert_eq!(
            err,
            OperationError::ParticipantCount {
                operation,
                expected: operation.participant_count(),
                actual: count,
            }
        );
    }
}
