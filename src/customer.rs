//! # Customer
//!
//! `customer` is a module providing functionality for managing the accounts owned by one
//! customer and moving funds between them.

use std::rc::Rc;

use rust_decimal::Decimal;
use tracing::{error, info};

use crate::account::{
    check_amount, Account, AccountSnapshot, CertificateAccount, CheckingAccount,
    RetirementAccount, SavingsAccount,
};
use crate::{
    AccountKind, AccountNumber, Clock, CustomerId, IdGenerator, LedgerError, Policy, Rejection,
};

/// Bank customer and their accounts
#[derive(Debug)]
pub struct Customer {
    /// Customer's ID
    id: CustomerId,
    /// Customer's full name
    name: String,
    /// Accounts in the order they were opened
    accounts: Vec<Box<dyn Account>>,
    clock: Rc<dyn Clock>,
    ids: Rc<dyn IdGenerator>,
    policy: Rc<Policy>,
}

impl Customer {
    /// Create a customer without accounts
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        clock: Rc<dyn Clock>,
        ids: Rc<dyn IdGenerator>,
        policy: Rc<Policy>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            accounts: Vec::new(),
            clock,
            ids,
            policy,
        }
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn set_id(&mut self, id: CustomerId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Rules the customer's accounts are opened with
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Open an account of `kind` with the policy's defaults
    pub fn open_account(&mut self, kind: AccountKind) -> AccountNumber {
        let number = self.next_account_number();
        let clock = self.clock.clone();
        let policy = &self.policy;
        let account: Box<dyn Account> = match kind {
            AccountKind::Checking => Box::new(CheckingAccount::new(
                number,
                policy.checking.opening_balance,
                clock,
            )),
            AccountKind::Savings => Box::new(SavingsAccount::savings(
                number,
                policy.savings.opening_balance,
                policy.savings,
                clock,
            )),
            AccountKind::MoneyMarket => Box::new(SavingsAccount::money_market(
                number,
                policy.money_market.opening_balance,
                policy.money_market,
                clock,
            )),
            AccountKind::CertificateOfDeposit => Box::new(CertificateAccount::new(
                number,
                policy.certificate.opening_balance,
                policy.certificate.term_months,
                policy.certificate.rate,
                clock,
            )),
            AccountKind::IndividualRetirement => Box::new(RetirementAccount::new(
                number,
                policy.retirement.monthly_deposit,
                policy.retirement,
                clock,
            )),
        };
        self.push(account)
    }

    /// Open an account of `kind` with an explicit opening amount.
    ///
    /// For retirement accounts `amount` is the monthly deposit. `term_months` only applies to
    /// certificates and defaults to the policy term.
    pub fn open_account_with(
        &mut self,
        kind: AccountKind,
        amount: Decimal,
        term_months: Option<u32>,
    ) -> Result<AccountNumber, LedgerError> {
        if amount.is_sign_negative() {
            return Err(Rejection::InvalidAmount.into());
        }
        let number = self.next_account_number();
        let clock = self.clock.clone();
        let policy = &self.policy;
        let account: Box<dyn Account> = match kind {
            AccountKind::Checking => Box::new(CheckingAccount::new(number, amount, clock)),
            AccountKind::Savings => Box::new(SavingsAccount::savings(
                number,
                amount,
                policy.savings,
                clock,
            )),
            AccountKind::MoneyMarket => Box::new(SavingsAccount::money_market(
                number,
                amount,
                policy.money_market,
                clock,
            )),
            AccountKind::CertificateOfDeposit => Box::new(CertificateAccount::new(
                number,
                amount,
                term_months.unwrap_or(policy.certificate.term_months),
                policy.certificate.rate,
                clock,
            )),
            AccountKind::IndividualRetirement => Box::new(RetirementAccount::new(
                number,
                amount,
                policy.retirement,
                clock,
            )),
        };
        Ok(self.push(account))
    }

    /// Close an account, handing it back; its ledger goes with it
    pub fn close_account(&mut self, number: AccountNumber) -> Option<Box<dyn Account>> {
        let index = self.position(number)?;
        let account = self.accounts.remove(index);
        info!(customer = %self.id, account = %number, "account closed");
        Some(account)
    }

    pub fn accounts(&self) -> &[Box<dyn Account>] {
        &self.accounts
    }

    pub fn account(&self, number: AccountNumber) -> Option<&dyn Account> {
        self.accounts
            .iter()
            .find(|account| account.number() == number)
            .map(|account| &**account)
    }

    pub fn account_mut(&mut self, number: AccountNumber) -> Option<&mut dyn Account> {
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.number() == number)?;
        let account: &mut dyn Account = &mut **account;
        Some(account)
    }

    /// Move `amount` from `source` to `destination`; `false` if nothing moved
    pub fn transfer_funds(
        &mut self,
        source: AccountNumber,
        destination: AccountNumber,
        amount: Decimal,
    ) -> bool {
        self.try_transfer_funds(source, destination, amount).is_ok()
    }

    /// Move `amount` from `source` to `destination`.
    ///
    /// Both sides are checked before anything moves, so a transfer either completes or leaves
    /// both accounts untouched.
    pub fn try_transfer_funds(
        &mut self,
        source: AccountNumber,
        destination: AccountNumber,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if source == destination {
            return Err(Rejection::SameAccount.into());
        }
        check_amount(amount)?;
        let (from, to) = self.pair_mut(source, destination)?;
        if amount > from.principal() {
            return Err(Rejection::InsufficientFunds.into());
        }
        to.check_deposit(amount)?;
        from.try_withdraw(amount)?;
        if let Err(rejection) = to.try_deposit(amount) {
            error!(
                %source,
                %destination,
                %amount,
                "transfer deposit refused after withdrawal: {rejection}"
            );
            if let Err(refund) = from.try_deposit(amount) {
                error!(%source, %amount, "transfer refund refused: {refund}");
            }
            return Err(rejection.into());
        }
        info!(customer = %self.id, %source, %destination, %amount, "funds transferred");
        Ok(())
    }

    /// Credit accrued interest on one account, returning the amount credited
    pub fn credit_interest(&mut self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        let account = self
            .account_mut(number)
            .ok_or(LedgerError::AccountNotFound(number))?;
        Ok(account.credit_interest()?)
    }

    /// Get snapshots of all accounts
    pub fn snapshot_accounts(&self) -> Vec<AccountSnapshot> {
        self.accounts
            .iter()
            .map(|account| AccountSnapshot::new(&self.name, &**account))
            .collect()
    }

    fn position(&self, number: AccountNumber) -> Option<usize> {
        self.accounts
            .iter()
            .position(|account| account.number() == number)
    }

    fn pair_mut(
        &mut self,
        first: AccountNumber,
        second: AccountNumber,
    ) -> Result<(&mut Box<dyn Account>, &mut Box<dyn Account>), LedgerError> {
        let i = self
            .position(first)
            .ok_or(LedgerError::AccountNotFound(first))?;
        let j = self
            .position(second)
            .ok_or(LedgerError::AccountNotFound(second))?;
        if i < j {
            let (left, right) = self.accounts.split_at_mut(j);
            Ok((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.accounts.split_at_mut(i);
            Ok((&mut right[0], &mut left[j]))
        }
    }

    fn next_account_number(&self) -> AccountNumber {
        loop {
            let number = self.ids.account_number();
            if self.position(number).is_none() {
                return number;
            }
        }
    }

    fn push(&mut self, account: Box<dyn Account>) -> AccountNumber {
        let number = account.number();
        info!(customer = %self.id, account = %number, kind = %account.kind(), "account opened");
        self.accounts.push(account);
        number
    }
}
