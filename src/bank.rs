//! # Bank
//!
//! `bank` is a module providing the registry of customers. It issues customer IDs and hands
//! every customer the shared clock, ID generator and policy.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::info;

use crate::{
    AccountKind, Clock, Customer, CustomerId, IdGenerator, Policy, RandomIds, SystemClock,
};

/// Registry of customers by ID
#[derive(Debug)]
pub struct Bank {
    /// Map of customer ID to customer
    customers: HashMap<CustomerId, Customer>,
    clock: Rc<dyn Clock>,
    ids: Rc<dyn IdGenerator>,
    policy: Rc<Policy>,
}

impl Bank {
    /// Create a bank with no customers
    pub fn new(clock: Rc<dyn Clock>, ids: Rc<dyn IdGenerator>, policy: Policy) -> Self {
        Self {
            customers: HashMap::new(),
            clock,
            ids,
            policy: Rc::new(policy),
        }
    }

    /// Bank on the system date with random IDs and default policy
    pub fn with_defaults() -> Self {
        Self::new(Rc::new(SystemClock), Rc::new(RandomIds), Policy::default())
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Register a new customer, who starts with a default checking account
    pub fn add_customer(&mut self, name: impl Into<String>) -> CustomerId {
        let id = loop {
            let id = self.ids.customer_id();
            if !self.customers.contains_key(&id) {
                break id;
            }
        };
        let mut customer = Customer::new(
            id.clone(),
            name,
            self.clock.clone(),
            self.ids.clone(),
            self.policy.clone(),
        );
        info!(customer = %id, name = customer.name(), "customer added");
        customer.open_account(AccountKind::Checking);
        self.customers.insert(id.clone(), customer);
        id
    }

    /// Remove a customer together with all of their accounts
    pub fn remove_customer(&mut self, id: &CustomerId) -> Option<Customer> {
        let removed = self.customers.remove(id);
        if removed.is_some() {
            info!(customer = %id, "customer removed");
        }
        removed
    }

    pub fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn customer_mut(&mut self, id: &CustomerId) -> Option<&mut Customer> {
        self.customers.get_mut(id)
    }

    /// IDs of every customer, in no particular order
    pub fn customer_ids(&self) -> impl Iterator<Item = &CustomerId> {
        self.customers.keys()
    }

    /// Every customer, in no particular order
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, SequentialIds};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bank() -> Bank {
        let clock = Rc::new(ManualClock::new(NaiveDate::from_ymd_opt(2022, 1, 6).unwrap()));
        Bank::new(clock, Rc::new(SequentialIds::default()), Policy::default())
    }

    #[test]
    fn add_customer_opens_checking() {
        let mut bank = bank();
        let id = bank.add_customer("Grace Hopper");
        assert_eq!(id, CustomerId("c00001".to_string()));
        let customer = bank.customer(&id).unwrap();
        assert_eq!(customer.name(), "Grace Hopper");
        assert_eq!(customer.accounts().len(), 1);
        assert_eq!(customer.accounts()[0].kind(), AccountKind::Checking);
        assert_eq!(customer.accounts()[0].principal(), dec!(25));
    }

    #[test]
    fn remove_customer_works() {
        let mut bank = bank();
        let id = bank.add_customer("Grace Hopper");
        assert!(bank.remove_customer(&id).is_some());
        assert!(bank.customer(&id).is_none());
        assert!(bank.remove_customer(&id).is_none());
    }

    #[test]
    fn lists_customers() {
        let mut bank = bank();
        bank.add_customer("A");
        bank.add_customer("B");
        let mut ids: Vec<_> = bank.customer_ids().cloned().collect();
        ids.sort();
        assert_eq!(
            ids,
            vec![CustomerId("c00001".to_string()), CustomerId("c00002".to_string())]
        );
        assert_eq!(bank.customers().count(), 2);
    }

    #[test]
    fn random_ids_by_default() {
        let mut bank = Bank::with_defaults();
        let id = bank.add_customer("Anonymous");
        assert_eq!(id.0.len(), 6);
        let account = bank.customer(&id).unwrap().accounts()[0].number();
        assert!((10_000_000..100_000_000).contains(&account.0));
    }
}
