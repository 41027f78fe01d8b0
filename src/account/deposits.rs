use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::clock::months_between;
use crate::interest::compound;

/// Principal contributed on a given day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deposit {
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Surviving deposits of an account, oldest first.
///
/// Withdrawals eat into the newest deposits first, so the oldest principal keeps its full
/// compounding time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DepositHistory {
    deposits: Vec<Deposit>,
}

impl DepositHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a deposit; entries are never merged
    pub fn push(&mut self, amount: Decimal, date: NaiveDate) {
        self.deposits.push(Deposit { amount, date });
    }

    /// Remove `amount` from the newest deposits backwards, shrinking the last one touched
    pub fn consume(&mut self, amount: Decimal) {
        let mut remaining = amount;
        while remaining > Decimal::ZERO {
            let Some(newest) = self.deposits.last_mut() else {
                break;
            };
            if remaining >= newest.amount {
                remaining -= newest.amount;
                self.deposits.pop();
            } else {
                newest.amount -= remaining;
                remaining = Decimal::ZERO;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deposit> {
        self.deposits.iter()
    }

    /// Amounts only, oldest first
    pub fn amounts(&self) -> Vec<Decimal> {
        self.deposits.iter().map(|deposit| deposit.amount).collect()
    }

    pub fn total(&self) -> Decimal {
        self.deposits.iter().map(|deposit| deposit.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }

    /// Every deposit compounded from its own month to `today`, summed
    pub fn compounded(&self, rate: Decimal, today: NaiveDate) -> Decimal {
        self.deposits
            .iter()
            .map(|deposit| compound(deposit.amount, rate, months_between(deposit.date, today)))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
