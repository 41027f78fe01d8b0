use std::rc::Rc;

use rust_decimal::Decimal;
use tracing::debug;

use super::sealed::CoreMut;
use super::{check_amount, Account, AccountCore, CycleTracker, DepositHistory};
use crate::policy::SavingsPolicy;
use crate::{AccountKind, AccountNumber, Clock, Rejection};

/// Savings account, also used for money-market accounts.
///
/// Withdrawals are capped per monthly cycle and may not take the principal below the policy
/// floor. Interest compounds on each surviving deposit from the month it was made.
#[derive(Debug)]
pub struct SavingsAccount {
    core: AccountCore,
    /// Savings or money-market
    kind: AccountKind,
    policy: SavingsPolicy,
    cycle: CycleTracker,
    deposits: DepositHistory,
}

impl SavingsAccount {
    /// Open a savings account today
    pub fn savings(
        number: AccountNumber,
        opening_balance: Decimal,
        policy: SavingsPolicy,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self::new(AccountKind::Savings, number, opening_balance, policy, clock)
    }

    /// Open a money-market account today
    pub fn money_market(
        number: AccountNumber,
        opening_balance: Decimal,
        policy: SavingsPolicy,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self::new(AccountKind::MoneyMarket, number, opening_balance, policy, clock)
    }

    fn new(
        kind: AccountKind,
        number: AccountNumber,
        opening_balance: Decimal,
        policy: SavingsPolicy,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let core = AccountCore::new(number, opening_balance, policy.rate, clock);
        let today = core.opened();
        let mut deposits = DepositHistory::new();
        if opening_balance > Decimal::ZERO {
            deposits.push(opening_balance, today);
        }
        Self {
            core,
            kind,
            policy,
            cycle: CycleTracker::new(today),
            deposits,
        }
    }

    /// Withdrawals made in the current cycle
    pub fn withdraw_count(&self) -> u32 {
        self.cycle.withdrawals()
    }

    pub fn cycle(&self) -> &CycleTracker {
        &self.cycle
    }

    pub fn deposits(&self) -> &DepositHistory {
        &self.deposits
    }

    /// Principal that must remain after a withdrawal
    pub fn minimum_balance(&self) -> Decimal {
        self.policy.minimum_balance
    }
}

impl CoreMut for SavingsAccount {
    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }
}

impl Account for SavingsAccount {
    fn kind(&self) -> AccountKind {
        self.kind
    }

    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn principal(&self) -> Decimal {
        self.core.principal()
    }

    fn accrued_interest(&self) -> Decimal {
        self.value_with_interest() - self.principal()
    }

    fn value_with_interest(&self) -> Decimal {
        self.deposits.compounded(self.core.rate(), self.core.today())
    }

    fn check_deposit(&self, amount: Decimal) -> Result<(), Rejection> {
        check_amount(amount)
    }

    fn try_deposit(&mut self, amount: Decimal) -> Result<(), Rejection> {
        self.core.deposit(amount)?;
        let today = self.core.today();
        self.deposits.push(amount, today);
        Ok(())
    }

    fn try_withdraw(&mut self, amount: Decimal) -> Result<(), Rejection> {
        let today = self.core.today();
        if self.cycle.roll_over(today) {
            debug!(account = %self.core.number(), end = %self.cycle.end(), "new withdrawal cycle");
        }
        check_amount(amount)?;
        if self.cycle.withdrawals() >= self.policy.max_withdrawals {
            return Err(Rejection::WithdrawalLimitReached);
        }
        if self.core.principal() - amount < self.policy.minimum_balance {
            return Err(Rejection::InsufficientFunds);
        }
        self.core.debit(amount);
        self.cycle.record_withdrawal();
        self.deposits.consume(amount);
        Ok(())
    }
}
