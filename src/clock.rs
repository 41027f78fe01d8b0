//! # Clock
//!
//! `clock` supplies the current calendar date to every account. All cycle and term logic reads
//! the date through [`Clock`] so it can be pinned in tests and scripted simulations.

use std::cell::Cell;
use std::fmt::Debug;

use chrono::{Datelike, Days, Local, Months, NaiveDate};

use crate::LedgerError;

/// Source of the current date
pub trait Clock: Debug {
    /// Today's date, without a time-of-day component
    fn today(&self) -> NaiveDate;
}

/// Clock reading the local system date
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    today: Cell<NaiveDate>,
}

impl ManualClock {
    /// Create a clock pinned to `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    /// Move the clock to `date`
    pub fn set(&self, date: NaiveDate) {
        self.today.set(date);
    }

    /// Move the clock forward by whole days
    pub fn advance_days(&self, days: u64) {
        let today = self.today.get();
        self.today
            .set(today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX));
    }

    /// Move the clock forward by calendar months
    pub fn advance_months(&self, months: u32) {
        self.today.set(add_months(self.today.get(), months));
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

/// Add calendar months, clamping the day to the end of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Number of calendar months from `from` to `to`, ignoring the day of month
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    let months = i64::from(to.month()) - i64::from(from.month());
    years * 12 + months
}

/// Decompose a date into its `(month, day, year)` triple
pub fn date_parts(date: NaiveDate) -> (u32, u32, i32) {
    (date.month(), date.day(), date.year())
}

/// Parse a date written as `M/D/YYYY` (two-digit years are read as 20YY) or `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<NaiveDate, LedgerError> {
    let input = input.trim();
    let invalid = || LedgerError::InvalidDate(input.to_string());

    if !input.contains('/') {
        return NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid());
    }

    let parts: Vec<&str> = input.split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return Err(invalid());
    };
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let mut year: i32 = year.parse().map_err(|_| invalid())?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
