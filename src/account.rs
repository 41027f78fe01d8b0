//! # Account
//!
//! `account` is a module providing the [`Account`] capability shared by every account variant,
//! plus the state common to all of them ([`AccountCore`]).
//!
//! Variants are flat structs that compose the shared pieces instead of extending one another:
//!
//! - [`CheckingAccount`]: plain deposits and withdrawals, no interest.
//! - [`SavingsAccount`]: monthly withdrawal cycle, balance floor, interest compounded per
//!   deposit. Money-market accounts are savings accounts with a different policy.
//! - [`CertificateAccount`]: locked until the end of its term.
//! - [`RetirementAccount`]: value built from a monthly deposit schedule, penalised early
//!   withdrawals.
//!
//! Every amount is checked against [`Account::principal`]. Interest reported by
//! [`Account::accrued_interest`] is not spendable until it is credited.

use std::fmt::Debug;
use std::rc::Rc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::{AccountKind, AccountNumber, Clock, Rejection, TransactionLedger};

mod certificate;
mod checking;
mod cycle;
mod deposits;
mod retirement;
mod savings;

pub use certificate::CertificateAccount;
pub use checking::CheckingAccount;
pub use cycle::CycleTracker;
pub use deposits::{Deposit, DepositHistory};
pub use retirement::RetirementAccount;
pub use savings::SavingsAccount;

/// State every account carries
#[derive(Debug)]
pub struct AccountCore {
    /// Account number
    number: AccountNumber,
    /// Date the account was opened
    opened: NaiveDate,
    /// Annual interest rate, in percent
    rate: Decimal,
    /// Stored principal
    principal: Decimal,
    /// Record of deposits and withdrawals
    ledger: TransactionLedger,
    /// Shared date source
    clock: Rc<dyn Clock>,
}

impl AccountCore {
    /// Open an account today with the given principal; the opening amount is not a ledger entry
    pub(crate) fn new(
        number: AccountNumber,
        principal: Decimal,
        rate: Decimal,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            number,
            opened: clock.today(),
            rate,
            principal,
            ledger: TransactionLedger::new(),
            clock,
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn opened(&self) -> NaiveDate {
        self.opened
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub(crate) fn set_rate(&mut self, rate: Decimal) {
        self.rate = rate;
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Add to principal and record `+amount` for today, without any check
    pub(crate) fn credit(&mut self, amount: Decimal) {
        self.principal += amount;
        let today = self.today();
        self.ledger.record(today, amount);
    }

    /// Take from principal and record `-amount` for today, without any check
    pub(crate) fn debit(&mut self, amount: Decimal) {
        self.principal -= amount;
        let today = self.today();
        self.ledger.record(today, -amount);
    }

    /// Deposit funds, rejecting non-positive amounts
    pub(crate) fn deposit(&mut self, amount: Decimal) -> Result<(), Rejection> {
        check_amount(amount)?;
        self.credit(amount);
        Ok(())
    }

    /// Withdraw funds, rejecting non-positive amounts and overdrafts
    pub(crate) fn withdraw(&mut self, amount: Decimal) -> Result<(), Rejection> {
        check_amount(amount)?;
        if amount > self.principal {
            return Err(Rejection::InsufficientFunds);
        }
        self.debit(amount);
        Ok(())
    }
}

/// Reject zero and negative amounts
pub(crate) fn check_amount(amount: Decimal) -> Result<(), Rejection> {
    if amount <= Decimal::ZERO {
        return Err(Rejection::InvalidAmount);
    }
    Ok(())
}

mod sealed {
    use super::AccountCore;

    /// Write access to the shared state, only implemented inside the crate
    pub trait CoreMut {
        fn core_mut(&mut self) -> &mut AccountCore;
    }
}

/// Capability set shared by every account variant.
///
/// Balances change only through deposits, withdrawals and interest credits; the trait is sealed
/// so outside code cannot reach the unchecked state underneath.
///
/// ```compile_fail
/// use bank_ledger::{AccountKind, Bank};
///
/// let mut bank = Bank::with_defaults();
/// let id = bank.add_customer("Mallory");
/// let customer = bank.customer_mut(&id).unwrap();
/// let number = customer.open_account(AccountKind::Savings);
/// let account = customer.account_mut(number).unwrap();
/// account.core_mut().debit(rust_decimal::Decimal::ONE);
/// ```
pub trait Account: Debug + sealed::CoreMut {
    /// Variant of this account
    fn kind(&self) -> AccountKind;

    fn core(&self) -> &AccountCore;

    /// Amount contributed and not yet withdrawn; gates every withdrawal
    fn principal(&self) -> Decimal;

    /// Interest earned on top of the principal but not credited to it
    fn accrued_interest(&self) -> Decimal;

    /// Whether a deposit of `amount` would be accepted right now
    fn check_deposit(&self, amount: Decimal) -> Result<(), Rejection>;

    /// Deposit funds, with the reason on refusal
    fn try_deposit(&mut self, amount: Decimal) -> Result<(), Rejection>;

    /// Withdraw funds, with the reason on refusal
    fn try_withdraw(&mut self, amount: Decimal) -> Result<(), Rejection>;

    /// Move accrued interest into the principal, returning the amount credited.
    ///
    /// Variants that report interest only as part of their value credit nothing.
    fn credit_interest(&mut self) -> Result<Decimal, Rejection> {
        Ok(Decimal::ZERO)
    }

    /// Principal plus accrued interest
    fn value_with_interest(&self) -> Decimal {
        self.principal() + self.accrued_interest()
    }

    fn number(&self) -> AccountNumber {
        self.core().number()
    }

    fn opening_date(&self) -> NaiveDate {
        self.core().opened()
    }

    /// Annual interest rate, in percent
    fn interest_rate(&self) -> Decimal {
        self.core().rate()
    }

    fn set_interest_rate(&mut self, rate: Decimal) {
        self.core_mut().set_rate(rate);
    }

    fn ledger(&self) -> &TransactionLedger {
        self.core().ledger()
    }

    /// Deposit funds; `false` if refused
    fn deposit(&mut self, amount: Decimal) -> bool {
        match self.try_deposit(amount) {
            Ok(()) => true,
            Err(rejection) => {
                debug!(account = %self.number(), %amount, "deposit refused: {rejection}");
                false
            }
        }
    }

    /// Withdraw funds; `false` if refused
    fn withdraw(&mut self, amount: Decimal) -> bool {
        match self.try_withdraw(amount) {
            Ok(()) => true,
            Err(rejection) => {
                debug!(account = %self.number(), %amount, "withdrawal refused: {rejection}");
                false
            }
        }
    }

    /// Signed entries recorded on `date`, oldest first
    fn transactions_for_day(&self, date: NaiveDate) -> &[Decimal] {
        self.ledger().for_day(date)
    }

    fn statement_for_day(&self, date: NaiveDate) -> String {
        self.ledger().statement_for_day(date)
    }

    fn check_balance(&self) -> String {
        format!("Your current balance is: ${}", self.principal().round_dp(2))
    }
}

/// Serializable snapshot of an account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    /// Owner's name
    pub customer: String,
    /// Account number
    pub account: AccountNumber,
    /// Account variant
    pub kind: AccountKind,
    /// Principal, rounded to cents
    pub principal: Decimal,
    /// Principal plus accrued interest, rounded to cents
    pub value: Decimal,
    /// Accrued interest, rounded to cents
    pub interest: Decimal,
    /// Annual interest rate, in percent
    pub rate: Decimal,
    /// Opening date
    pub opened: NaiveDate,
}

impl AccountSnapshot {
    /// Take a snapshot of an account owned by `customer`
    pub fn new(customer: &str, account: &dyn Account) -> Self {
        Self {
            customer: customer.to_string(),
            account: account.number(),
            kind: account.kind(),
            principal: account.principal().round_dp(2),
            value: account.value_with_interest().round_dp(2),
            interest: account.accrued_interest().round_dp(2),
            rate: account.interest_rate(),
            opened: account.opening_date(),
        }
    }
}
