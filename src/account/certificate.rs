use std::rc::Rc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use super::sealed::CoreMut;
use super::{check_amount, Account, AccountCore};
use crate::clock::add_months;
use crate::interest::compound;
use crate::{AccountKind, AccountNumber, Clock, Rejection};

/// Certificate of deposit: no deposits or withdrawals until the term ends.
///
/// Interest is the principal compounded over the whole term. Crediting it is up to the
/// caller, and crediting twice pays twice.
#[derive(Debug)]
pub struct CertificateAccount {
    core: AccountCore,
    /// Term length, in months
    term_months: u32,
    /// First day the account is unlocked
    term_end: NaiveDate,
}

impl CertificateAccount {
    /// Open a certificate today for a term of `term_months`
    pub fn new(
        number: AccountNumber,
        opening_balance: Decimal,
        term_months: u32,
        rate: Decimal,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let core = AccountCore::new(number, opening_balance, rate, clock);
        let term_end = add_months(core.opened(), term_months);
        Self {
            core,
            term_months,
            term_end,
        }
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn term_end(&self) -> NaiveDate {
        self.term_end
    }

    /// Whether the term is over
    pub fn is_unlocked(&self) -> bool {
        self.core.today() >= self.term_end
    }

    /// Start a new term of `term_months` from today
    pub fn renew_term(&mut self, term_months: u32) {
        self.term_months = term_months;
        self.term_end = add_months(self.core.today(), term_months);
        info!(account = %self.core.number(), term_end = %self.term_end, "certificate term renewed");
    }

    /// Deposit the accrued interest once the term is over, returning the amount credited
    pub fn credit_balance(&mut self) -> Result<Decimal, Rejection> {
        self.ensure_unlocked()?;
        let interest = self.accrued_interest();
        if interest <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        self.core.credit(interest);
        Ok(interest)
    }

    fn ensure_unlocked(&self) -> Result<(), Rejection> {
        if !self.is_unlocked() {
            return Err(Rejection::TermLocked(self.term_end));
        }
        Ok(())
    }
}

impl CoreMut for CertificateAccount {
    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }
}

impl Account for CertificateAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::CertificateOfDeposit
    }

    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn principal(&self) -> Decimal {
        self.core.principal()
    }

    fn accrued_interest(&self) -> Decimal {
        let principal = self.core.principal();
        compound(principal, self.core.rate(), i64::from(self.term_months)) - principal
    }

    fn check_deposit(&self, amount: Decimal) -> Result<(), Rejection> {
        self.ensure_unlocked()?;
        check_amount(amount)
    }

    fn try_deposit(&mut self, amount: Decimal) -> Result<(), Rejection> {
        self.ensure_unlocked()?;
        self.core.deposit(amount)
    }

    fn try_withdraw(&mut self, amount: Decimal) -> Result<(), Rejection> {
        self.ensure_unlocked()?;
        self.core.withdraw(amount)
    }

    fn credit_interest(&mut self) -> Result<Decimal, Rejection> {
        self.credit_balance()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::ManualClock;
    use rust_decimal_macros::dec;

    fn certificate(term_months: u32) -> (Rc<ManualClock>, CertificateAccount) {
        let (manual, clock) = clock();
        let account =
            CertificateAccount::new(AccountNumber(3), dec!(1000), term_months, dec!(1), clock);
        (manual, account)
    }

    #[test]
    fn deposit_before_term_end_fails() {
        let (_, mut account) = certificate(1);
        assert_eq!(
            account.try_deposit(dec!(50)),
            Err(Rejection::TermLocked(date(2022, 2, 6)))
        );
        assert!(!account.deposit(dec!(50)));
        assert_eq!(account.principal(), dec!(1000));
        assert!(account.ledger().is_empty());
    }

    #[test]
    fn every_day_before_term_end_is_locked() {
        let (manual, mut account) = certificate(1);
        while manual.today() < account.term_end() {
            assert!(!account.deposit(dec!(1)));
            assert!(!account.withdraw(dec!(1)));
            manual.advance_days(1);
        }
        assert!(account.deposit(dec!(1)));
        assert!(account.withdraw(dec!(1)));
        assert_eq!(account.principal(), dec!(1000));
    }

    #[test]
    fn lock_wins_over_invalid_amount() {
        let (_, mut account) = certificate(1);
        assert_eq!(
            account.try_withdraw(dec!(-1)),
            Err(Rejection::TermLocked(date(2022, 2, 6)))
        );
    }

    #[test]
    fn unlocked_behaves_like_checking() {
        let (manual, mut account) = certificate(1);
        manual.advance_months(2);
        assert_eq!(account.try_withdraw(dec!(0)), Err(Rejection::InvalidAmount));
        assert_eq!(account.try_withdraw(dec!(1001)), Err(Rejection::InsufficientFunds));
        assert!(account.withdraw(dec!(400)));
        assert_eq!(account.principal(), dec!(600));
    }

    #[test]
    fn interest_covers_whole_term() {
        let (_, account) = certificate(18);
        assert!((account.accrued_interest() - dec!(15.11)).abs() < dec!(0.01));
        assert_eq!(account.term_end(), date(2023, 7, 6));
    }

    #[test]
    fn credit_balance_requires_unlock() {
        let (manual, mut account) = certificate(12);
        assert_eq!(
            account.credit_balance(),
            Err(Rejection::TermLocked(date(2023, 1, 6)))
        );
        manual.advance_months(12);
        let credited = account.credit_balance().unwrap();
        assert!((credited - dec!(10.05)).abs() < dec!(0.01));
        assert_eq!(account.principal(), dec!(1000) + credited);
        assert_eq!(account.transactions_for_day(date(2023, 1, 6)), &[credited]);
    }

    #[test]
    fn credit_balance_twice_pays_twice() {
        let (manual, mut account) = certificate(12);
        manual.advance_months(12);
        let first = account.credit_balance().unwrap();
        let second = account.credit_balance().unwrap();
        assert!(second > first);
        assert_eq!(account.ledger().len(), 2);
    }

    #[test]
    fn renew_term_locks_again() {
        let (manual, mut account) = certificate(1);
        manual.advance_months(1);
        assert!(account.is_unlocked());
        account.renew_term(6);
        assert!(!account.is_unlocked());
        assert_eq!(account.term_months(), 6);
        assert_eq!(account.term_end(), date(2022, 8, 6));
    }
}
