//! # IDs
//!
//! `ids` issues account numbers and customer IDs. The generator is injected into the bank so
//! tests and scripted runs can swap random IDs for predictable ones.

use std::cell::Cell;
use std::fmt::Debug;

use uuid::Uuid;

use crate::{AccountNumber, CustomerId};

/// Smallest account number handed out
pub const ACCOUNT_NUMBER_MIN: u32 = 10_000_000;
/// Upper bound (exclusive) of account numbers
pub const ACCOUNT_NUMBER_MAX: u32 = 100_000_000;
/// Length of a customer ID
pub const CUSTOMER_ID_LEN: usize = 6;

/// Source of account numbers and customer IDs
pub trait IdGenerator: Debug {
    /// Next account number, in `ACCOUNT_NUMBER_MIN..ACCOUNT_NUMBER_MAX`
    fn account_number(&self) -> AccountNumber;
    /// Next customer ID
    fn customer_id(&self) -> CustomerId;
}

/// Random IDs derived from v4 UUIDs, practically (not guaranteed) unique
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn account_number(&self) -> AccountNumber {
        let span = u128::from(ACCOUNT_NUMBER_MAX - ACCOUNT_NUMBER_MIN);
        let offset = (Uuid::new_v4().as_u128() % span) as u32;
        AccountNumber(ACCOUNT_NUMBER_MIN + offset)
    }

    fn customer_id(&self) -> CustomerId {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(CUSTOMER_ID_LEN);
        CustomerId(id)
    }
}

/// Counting IDs: `10000000`, `10000001`, ... and `c00001`, `c00002`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    accounts: Cell<u32>,
    customers: Cell<u32>,
}

impl IdGenerator for SequentialIds {
    fn account_number(&self) -> AccountNumber {
        let next = self.accounts.get();
        self.accounts.set(next + 1);
        AccountNumber(ACCOUNT_NUMBER_MIN + next)
    }

    fn customer_id(&self) -> CustomerId {
        let next = self.customers.get() + 1;
        self.customers.set(next);
        CustomerId(format!("c{next:05}"))
    }
}
