//! # Policy
//!
//! `policy` holds the numeric rules each account variant follows: opening defaults, interest
//! rates (annual percentages), balance floors, withdrawal caps, terms and penalties.
//!
//! A [`Policy`] deserializes from configuration. Any table left out falls back to the
//! defaults below; a table that is present must be complete.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Checking account rules
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CheckingPolicy {
    /// Balance of an account opened without an explicit amount
    pub opening_balance: Decimal,
}

impl Default for CheckingPolicy {
    fn default() -> Self {
        Self {
            opening_balance: Decimal::new(25, 0),
        }
    }
}

/// Savings and money-market rules
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SavingsPolicy {
    /// Balance of an account opened without an explicit amount
    pub opening_balance: Decimal,
    /// Annual interest rate, in percent
    pub rate: Decimal,
    /// Principal that must remain after a withdrawal
    pub minimum_balance: Decimal,
    /// Withdrawals allowed per monthly cycle
    pub max_withdrawals: u32,
}

impl SavingsPolicy {
    /// Money-market defaults: higher floor and rate, same withdrawal cap
    pub fn money_market() -> Self {
        Self {
            opening_balance: Decimal::new(500, 0),
            rate: Decimal::new(3, 1),
            minimum_balance: Decimal::new(500, 0),
            max_withdrawals: 6,
        }
    }
}

impl Default for SavingsPolicy {
    fn default() -> Self {
        Self {
            opening_balance: Decimal::new(300, 0),
            rate: Decimal::new(1, 1),
            minimum_balance: Decimal::new(300, 0),
            max_withdrawals: 6,
        }
    }
}

/// Certificate-of-deposit rules
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CertificatePolicy {
    /// Balance of an account opened without an explicit amount
    pub opening_balance: Decimal,
    /// Annual interest rate, in percent
    pub rate: Decimal,
    /// Term used when none is given, in months
    pub term_months: u32,
}

impl Default for CertificatePolicy {
    fn default() -> Self {
        Self {
            opening_balance: Decimal::new(1000, 0),
            rate: Decimal::ONE,
            term_months: 18,
        }
    }
}

/// Individual retirement account rules
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RetirementPolicy {
    /// Monthly deposit used when none is given
    pub monthly_deposit: Decimal,
    /// Largest monthly deposit accepted; larger requests are clamped
    pub monthly_cap: Decimal,
    /// Annual interest rate, in percent
    pub rate: Decimal,
    /// Years before withdrawals are free of penalty
    pub term_years: u32,
    /// Early withdrawal surcharge as a fraction of the amount (0.10 = 10%)
    pub penalty: Decimal,
}

impl Default for RetirementPolicy {
    fn default() -> Self {
        Self {
            monthly_deposit: Decimal::new(300, 0),
            monthly_cap: Decimal::new(500, 0),
            rate: Decimal::new(7, 0),
            term_years: 5,
            penalty: Decimal::new(10, 2),
        }
    }
}

/// Rules for every account variant
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub checking: CheckingPolicy,
    pub savings: SavingsPolicy,
    pub money_market: SavingsPolicy,
    pub certificate: CertificatePolicy,
    pub retirement: RetirementPolicy,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            checking: CheckingPolicy::default(),
            savings: SavingsPolicy::default(),
            money_market: SavingsPolicy::money_market(),
            certificate: CertificatePolicy::default(),
            retirement: RetirementPolicy::default(),
        }
    }
}
