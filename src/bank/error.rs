use thiserror::Error;

use crate::bank::{AccountNumber, CustomerId};

/// Errors that can occur while operating on the ledger.
///
/// None of these are fatal: the ledger is left unchanged by a failed
/// operation and stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Customer {0} not found")]
    CustomerNotFound(CustomerId),
    #[error("Account {0} not found")]
    AccountNotFound(AccountNumber),
    #[error("Amount must be positive")]
    InvalidAmount,
    #[error("Insufficient funds for withdrawal")]
    InsufficientFunds,
    #[error("Withdrawal would exceed the overdraft limit")]
    OverdraftExceeded,
    #[error("Customer {0} already exists")]
    DuplicateCustomer(CustomerId),
    #[error("Unknown account type {0:?}")]
    UnknownAccountType(String),
    #[error("Customer {0} still owns accounts")]
    CustomerHasAccounts(CustomerId),
    #[error("Account {0} is not a savings account")]
    NotSavings(AccountNumber),
    #[error("Account {0} is not a checking account")]
    NotChecking(AccountNumber),
    #[error("Amount is out of range")]
    AmountOutOfRange,
    #[error("Missing field `{0}`")]
    MissingField(&'static str),
}
