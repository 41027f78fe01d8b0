use std::rc::Rc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::sealed::CoreMut;
use super::{check_amount, Account, AccountCore};
use crate::clock::{add_months, months_between};
use crate::interest::compound;
use crate::policy::RetirementPolicy;
use crate::{AccountKind, AccountNumber, Clock, Rejection};

/// Individual retirement account.
///
/// The balance is not stored: it is one monthly deposit for every month since opening, plus any
/// lump-sum deposits, minus everything debited. Each month is paid in at the amount in effect
/// when it was made, so changing the monthly deposit never rewrites past months. Withdrawals
/// before the end of the term are debited with a penalty on top.
#[derive(Debug)]
pub struct RetirementAccount {
    /// Core principal holds lump-sum deposits minus debits
    core: AccountCore,
    /// Monthly deposit amounts and the day each took effect, oldest first
    schedule: Vec<(NaiveDate, Decimal)>,
    /// Total of lump-sum deposits
    lump_sums: Decimal,
    monthly_cap: Decimal,
    /// Surcharge on early withdrawals, as a fraction of the amount
    penalty: Decimal,
    /// First day withdrawals are free of penalty
    term_end: NaiveDate,
}

impl RetirementAccount {
    /// Open a retirement account today; `monthly_deposit` is clamped to the policy cap
    pub fn new(
        number: AccountNumber,
        monthly_deposit: Decimal,
        policy: RetirementPolicy,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let core = AccountCore::new(number, Decimal::ZERO, policy.rate, clock);
        let term_end = add_months(core.opened(), policy.term_years * 12);
        let mut account = Self {
            core,
            schedule: Vec::new(),
            lump_sums: Decimal::ZERO,
            monthly_cap: policy.monthly_cap,
            penalty: policy.penalty,
            term_end,
        };
        account.set_monthly_deposit(monthly_deposit);
        account
    }

    /// Monthly deposit currently in effect
    pub fn monthly_deposit(&self) -> Decimal {
        self.schedule
            .last()
            .map_or(Decimal::ZERO, |&(_, amount)| amount)
    }

    /// Change the monthly deposit from today on, clamped to `0..=cap`
    pub fn set_monthly_deposit(&mut self, amount: Decimal) {
        let applied = amount.max(Decimal::ZERO).min(self.monthly_cap);
        if applied != amount {
            debug!(
                account = %self.core.number(),
                requested = %amount,
                %applied,
                "monthly deposit clamped"
            );
        }
        let today = self.core.today();
        match self.schedule.last_mut() {
            Some((from, current)) if *from >= today => *current = applied,
            _ => self.schedule.push((today, applied)),
        }
    }

    pub fn term_end(&self) -> NaiveDate {
        self.term_end
    }

    pub fn past_term(&self) -> bool {
        self.core.today() >= self.term_end
    }

    /// Monthly deposits made so far
    pub fn months_contributed(&self) -> i64 {
        months_between(self.core.opened(), self.core.today()).max(0)
    }

    /// Amount debited for a withdrawal of `amount` today
    pub fn debit_for(&self, amount: Decimal) -> Decimal {
        if self.past_term() {
            amount
        } else {
            amount * (Decimal::ONE + self.penalty)
        }
    }

    /// Monthly deposit in effect on `date`
    fn deposit_on(&self, date: NaiveDate) -> Decimal {
        self.schedule
            .iter()
            .rev()
            .find(|(from, _)| *from <= date)
            .map_or(Decimal::ZERO, |&(_, amount)| amount)
    }

    /// Every monthly deposit made so far, with the months it has been growing
    fn contributions(&self) -> Vec<(Decimal, i64)> {
        let opened = self.core.opened();
        let months = self.months_contributed();
        (0..months)
            .map(|month| {
                let made = add_months(opened, month as u32);
                (self.deposit_on(made), months - month)
            })
            .collect()
    }

    fn scheduled_contributions(&self) -> Decimal {
        self.contributions()
            .into_iter()
            .map(|(amount, _)| amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Each monthly deposit compounded for the months since it was made
    fn scheduled_value(&self) -> Decimal {
        let rate = self.core.rate();
        self.contributions()
            .into_iter()
            .map(|(amount, months)| compound(amount, rate, months))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Fraction of everything paid in that has not been withdrawn
    fn remaining_share(&self, contributions: Decimal) -> Decimal {
        let paid_in = contributions + self.lump_sums;
        let principal = contributions + self.core.principal();
        if paid_in <= Decimal::ZERO || principal >= paid_in {
            return Decimal::ONE;
        }
        (principal / paid_in).max(Decimal::ZERO)
    }
}

impl CoreMut for RetirementAccount {
    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }
}

impl Account for RetirementAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::IndividualRetirement
    }

    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn principal(&self) -> Decimal {
        self.scheduled_contributions() + self.core.principal()
    }

    /// Growth of the monthly deposits, shrunk in proportion to what has been withdrawn
    fn accrued_interest(&self) -> Decimal {
        let contributions = self.scheduled_contributions();
        let growth = self.scheduled_value() - contributions;
        growth.saturating_mul(self.remaining_share(contributions))
    }

    fn check_deposit(&self, amount: Decimal) -> Result<(), Rejection> {
        check_amount(amount)
    }

    fn try_deposit(&mut self, amount: Decimal) -> Result<(), Rejection> {
        self.core.deposit(amount)?;
        self.lump_sums += amount;
        Ok(())
    }

    fn try_withdraw(&mut self, amount: Decimal) -> Result<(), Rejection> {
        check_amount(amount)?;
        let debit = self.debit_for(amount);
        if debit > self.principal() {
            return Err(Rejection::InsufficientFunds);
        }
        if debit != amount {
            debug!(account = %self.core.number(), %amount, %debit, "early withdrawal penalty");
        }
        self.core.debit(debit);
        Ok(())
    }
}
