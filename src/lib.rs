//! # Bank Ledger
//!
//! `bank_ledger` is a library simulating a retail bank's account ledger: customers owning
//! checking, savings, money-market, certificate-of-deposit and retirement accounts, each with
//! its own interest accrual and withdrawal policy.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod account;
pub mod bank;
pub mod clock;
pub mod customer;
pub mod error;
pub mod ids;
pub mod interest;
pub mod ledger;
pub mod policy;
pub mod simulation;

pub use account::{
    Account, AccountSnapshot, CertificateAccount, CheckingAccount, RetirementAccount,
    SavingsAccount,
};
pub use bank::Bank;
pub use clock::{Clock, ManualClock, SystemClock};
pub use customer::Customer;
pub use error::{LedgerError, Rejection};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use ledger::TransactionLedger;
pub use policy::Policy;
pub use simulation::{Operation, Simulation, Step};

/// Account number, unique within the owning customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(pub u32);

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer ID, a short token issued by the bank
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountKind {
    Checking,
    Savings,
    MoneyMarket,
    #[serde(alias = "cd")]
    CertificateOfDeposit,
    #[serde(alias = "ira")]
    IndividualRetirement,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
            AccountKind::MoneyMarket => "money-market",
            AccountKind::CertificateOfDeposit => "certificate-of-deposit",
            AccountKind::IndividualRetirement => "individual-retirement",
        };
        f.write_str(name)
    }
}
