//! # Ledger
//!
//! `ledger` records every deposit and withdrawal of an account as a signed amount filed under
//! the day it happened.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Per-account transaction log
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionLedger {
    /// Signed amounts by day, in the order they were recorded
    entries: BTreeMap<NaiveDate, Vec<Decimal>>,
}

impl TransactionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signed amount to the given day
    pub fn record(&mut self, date: NaiveDate, amount: Decimal) {
        self.entries.entry(date).or_default().push(amount);
    }

    /// Entries recorded on `date`, oldest first
    pub fn for_day(&self, date: NaiveDate) -> &[Decimal] {
        self.entries.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days with at least one entry, in calendar order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.keys().copied()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Printable statement for one day: the date, a rule, then the entries
    pub fn statement_for_day(&self, date: NaiveDate) -> String {
        let entries = self
            .for_day(date)
            .iter()
            .map(|amount| {
                if amount.is_sign_negative() {
                    amount.to_string()
                } else {
                    format!("+{amount}")
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        format!("{}\n{}\n{}", date.format("%-m/%-d/%Y"), "-".repeat(10), entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, d).unwrap()
    }

    #[test]
    fn record_appends_per_day() {
        let mut ledger = TransactionLedger::new();
        ledger.record(day(1), dec!(100));
        ledger.record(day(1), dec!(100));
        ledger.record(day(1), dec!(-50));
        ledger.record(day(2), dec!(10));
        assert_eq!(ledger.for_day(day(1)), &[dec!(100), dec!(100), dec!(-50)]);
        assert_eq!(ledger.for_day(day(2)), &[dec!(10)]);
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.days().collect::<Vec<_>>(), vec![day(1), day(2)]);
    }

    #[test]
    fn unknown_day_is_empty() {
        let ledger = TransactionLedger::new();
        assert!(ledger.for_day(day(3)).is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn statement_lists_signed_entries() {
        let mut ledger = TransactionLedger::new();
        ledger.record(day(6), dec!(100.5));
        ledger.record(day(6), dec!(-20));
        assert_eq!(
            ledger.statement_for_day(day(6)),
            "1/6/2022\n----------\n+100.5,-20"
        );
    }
}
