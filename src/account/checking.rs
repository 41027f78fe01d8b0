use std::rc::Rc;

use rust_decimal::Decimal;

use super::sealed::CoreMut;
use super::{check_amount, Account, AccountCore};
use crate::{AccountKind, AccountNumber, Clock, Rejection};

/// Checking account: deposits and withdrawals up to the balance, no interest
#[derive(Debug)]
pub struct CheckingAccount {
    core: AccountCore,
}

impl CheckingAccount {
    /// Open a checking account today
    pub fn new(number: AccountNumber, opening_balance: Decimal, clock: Rc<dyn Clock>) -> Self {
        Self {
            core: AccountCore::new(number, opening_balance, Decimal::ZERO, clock),
        }
    }
}

impl CoreMut for CheckingAccount {
    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }
}

impl Account for CheckingAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::Checking
    }

    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn principal(&self) -> Decimal {
        self.core.principal()
    }

    fn accrued_interest(&self) -> Decimal {
        Decimal::ZERO
    }

    fn check_deposit(&self, amount: Decimal) -> Result<(), Rejection> {
        check_amount(amount)
    }

    fn try_deposit(&mut self, amount: Decimal) -> Result<(), Rejection> {
        self.core.deposit(amount)
    }

    fn try_withdraw(&mut self, amount: Decimal) -> Result<(), Rejection> {
        self.core.withdraw(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> CheckingAccount {
        let (_, clock) = clock();
        CheckingAccount::new(AccountNumber(10_000_000), dec!(25), clock)
    }

    #[test]
    fn deposit_positive_works() {
        let mut account = account();
        assert!(account.deposit(dec!(1.00)));
        assert_eq!(account.principal(), dec!(26.00));
        assert_eq!(account.transactions_for_day(date(2022, 1, 6)), &[dec!(1.00)]);
    }

    #[test]
    fn deposit_negative_ignored() {
        let mut account = account();
        assert!(!account.deposit(dec!(-1.00)));
        assert!(!account.deposit(dec!(0)));
        assert_eq!(account.principal(), dec!(25));
        assert!(account.transactions_for_day(date(2022, 1, 6)).is_empty());
    }

    #[test]
    fn withdraw_positive_works() {
        let mut account = account();
        assert!(account.withdraw(dec!(5.50)));
        assert_eq!(account.principal(), dec!(19.50));
        assert_eq!(account.transactions_for_day(date(2022, 1, 6)), &[dec!(-5.50)]);
    }

    #[test]
    fn withdraw_negative_ignored() {
        let mut account = account();
        assert_eq!(account.try_withdraw(dec!(-0.50)), Err(Rejection::InvalidAmount));
        assert_eq!(account.principal(), dec!(25));
    }

    #[test]
    fn withdraw_insufficient_funds_ignored() {
        let mut account = account();
        assert_eq!(account.try_withdraw(dec!(30)), Err(Rejection::InsufficientFunds));
        assert_eq!(account.principal(), dec!(25));
    }

    #[test]
    fn same_day_transactions_are_kept_in_order() {
        let mut account = account();
        assert!(account.deposit(dec!(100)));
        assert!(account.deposit(dec!(100)));
        assert!(account.withdraw(dec!(40)));
        assert_eq!(
            account.transactions_for_day(date(2022, 1, 6)),
            &[dec!(100), dec!(100), dec!(-40)]
        );
    }

    #[test]
    fn deposit_then_withdraw_round_trips() {
        let mut account = account();
        assert!(account.deposit(dec!(12.34)));
        assert!(account.withdraw(dec!(12.34)));
        assert_eq!(account.principal(), dec!(25));
    }

    #[test]
    fn earns_no_interest() {
        let account = account();
        assert_eq!(account.accrued_interest(), dec!(0));
        assert_eq!(account.value_with_interest(), dec!(25));
        assert_eq!(account.interest_rate(), dec!(0));
    }

    #[test]
    fn check_balance_message() {
        let account = account();
        assert_eq!(account.check_balance(), "Your current balance is: $25");
    }
}
