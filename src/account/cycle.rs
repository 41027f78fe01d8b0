use chrono::NaiveDate;

use crate::clock::add_months;

/// Monthly withdrawal window of a savings account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTracker {
    /// Withdrawals made in the current cycle
    withdrawals: u32,
    /// First day of the cycle
    start: NaiveDate,
    /// Day the next cycle begins
    end: NaiveDate,
}

impl CycleTracker {
    /// Start a cycle on `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            withdrawals: 0,
            start: today,
            end: add_months(today, 1),
        }
    }

    /// Reset the count and start a new cycle if `today` has reached the end of the current one.
    /// Returns whether a new cycle began.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today < self.end {
            return false;
        }
        *self = Self::new(today);
        true
    }

    pub fn record_withdrawal(&mut self) {
        self.withdrawals += 1;
    }

    pub fn withdrawals(&self) -> u32 {
        self.withdrawals
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}
