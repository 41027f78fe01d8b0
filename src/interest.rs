//! # Interest
//!
//! `interest` holds the compounding formula shared by every interest-bearing account: daily
//! compounding of an annual percentage rate over a period expressed in months,
//! `(1 + rate / 36500) ^ (365 * months / 12)`.
//!
//! Results too large for a [`Decimal`] saturate at [`Decimal::MAX`] (or [`Decimal::MIN`] for
//! negative principals) instead of overflowing.

use rust_decimal::prelude::*;

/// Growth of one unit of principal over `months` months at `rate` percent a year
pub fn growth_factor(rate: Decimal, months: i64) -> Decimal {
    if months <= 0 {
        return Decimal::ONE;
    }
    let daily = rate.to_f64().unwrap_or_default() / 36_500.0;
    let days = 365.0 * months as f64 / 12.0;
    // a daily loss of 100% or more leaves nothing
    let factor = (1.0 + daily).max(0.0).powf(days);
    Decimal::from_f64(factor).unwrap_or(Decimal::MAX)
}

/// `principal` compounded over `months` months at `rate` percent a year
pub fn compound(principal: Decimal, rate: Decimal, months: i64) -> Decimal {
    principal.saturating_mul(growth_factor(rate, months))
}
