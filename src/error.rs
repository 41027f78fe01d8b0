//! Errors raised by the ledger.
//!
//! - [`Rejection`] is the reason a deposit, withdrawal or transfer did not go through. The
//!   boolean `deposit`/`withdraw`/`transfer_funds` calls collapse it to `false`.
//! - [`LedgerError`] covers lookups, date parsing and script input.
use chrono::NaiveDate;
use thiserror::Error;

use crate::{AccountNumber, CustomerId};

/// Why an account operation was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("withdrawal limit reached for the current cycle")]
    WithdrawalLimitReached,
    #[error("account is locked until {0}")]
    TermLocked(NaiveDate),
    #[error("source and destination are the same account")]
    SameAccount,
}

/// Ledger errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid date: \"{0}\"")]
    InvalidDate(String),
    #[error("Account {0} not found!")]
    AccountNotFound(AccountNumber),
    #[error("Customer \"{0}\" not found!")]
    CustomerNotFound(CustomerId),
    #[error("\"{0}\" is not a known name or alias")]
    UnknownAlias(String),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),
}
