//! # Simulation
//!
//! `simulation` replays dated operations against a [`Bank`] whose clock only moves when a step
//! says so. Customers and accounts are referred to by script-local names instead of the
//! generated IDs.

use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    AccountKind, AccountNumber, AccountSnapshot, Bank, Clock, Customer, CustomerId, IdGenerator,
    LedgerError, ManualClock, Policy,
};

/// Alias of the checking account every customer starts with
pub const DEFAULT_ACCOUNT_ALIAS: &str = "checking";

/// One operation of a simulation
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Register a customer under `name`
    Join { name: String },
    /// Remove a customer and all of their accounts
    Leave { customer: String },
    /// Open an account and bind it to `alias`
    Open {
        customer: String,
        alias: String,
        kind: AccountKind,
        amount: Option<Decimal>,
        term_months: Option<u32>,
    },
    Deposit {
        customer: String,
        alias: String,
        amount: Decimal,
    },
    Withdraw {
        customer: String,
        alias: String,
        amount: Decimal,
    },
    Transfer {
        customer: String,
        from: String,
        to: String,
        amount: Decimal,
    },
    /// Credit accrued interest into the principal
    Credit { customer: String, alias: String },
    Close { customer: String, alias: String },
}

/// An operation and the day it happens
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub date: NaiveDate,
    pub operation: Operation,
}

/// Bank driven by a manual clock
#[derive(Debug)]
pub struct Simulation {
    bank: Bank,
    clock: Rc<ManualClock>,
    /// Customer names to IDs
    customers: HashMap<String, CustomerId>,
    /// (customer name, alias) to account number
    aliases: HashMap<(String, String), AccountNumber>,
}

impl Simulation {
    /// Start a simulation on `start`
    pub fn new(start: NaiveDate, ids: Rc<dyn IdGenerator>, policy: Policy) -> Self {
        let clock = Rc::new(ManualClock::new(start));
        let shared: Rc<dyn Clock> = clock.clone();
        Self {
            bank: Bank::new(shared, ids, policy),
            clock,
            customers: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Account bound to `alias` for the customer named `customer`
    pub fn account_number(
        &self,
        customer: &str,
        alias: &str,
    ) -> Result<AccountNumber, LedgerError> {
        self.aliases
            .get(&(customer.to_string(), alias.to_string()))
            .copied()
            .ok_or_else(|| LedgerError::UnknownAlias(format!("{customer}/{alias}")))
    }

    /// Customer registered under `name`
    pub fn customer(&self, name: &str) -> Result<&Customer, LedgerError> {
        let id = self.customer_id(name)?;
        self.bank
            .customer(id)
            .ok_or_else(|| LedgerError::CustomerNotFound(id.clone()))
    }

    /// Move the clock to the step's date and apply its operation
    pub fn apply(&mut self, step: Step) -> Result<(), LedgerError> {
        if step.date < self.clock.today() {
            warn!(from = %self.clock.today(), to = %step.date, "clock moved backwards");
        }
        self.clock.set(step.date);
        debug!(date = %step.date, operation = ?step.operation, "applying step");

        match step.operation {
            Operation::Join { name } => {
                if self.customers.contains_key(&name) {
                    warn!(%name, "customer name reused, earlier customer is no longer reachable");
                    self.aliases.retain(|(owner, _), _| owner != &name);
                }
                let id = self.bank.add_customer(name.clone());
                let checking = self
                    .bank
                    .customer(&id)
                    .and_then(|customer| customer.accounts().first())
                    .map(|account| account.number());
                if let Some(number) = checking {
                    self.aliases
                        .insert((name.clone(), DEFAULT_ACCOUNT_ALIAS.to_string()), number);
                }
                self.customers.insert(name, id);
            }
            Operation::Leave { customer } => {
                let id = self.customer_id(&customer)?.clone();
                self.bank.remove_customer(&id);
                self.customers.remove(&customer);
                self.aliases.retain(|(owner, _), _| owner != &customer);
            }
            Operation::Open {
                customer,
                alias,
                kind,
                amount,
                term_months,
            } => {
                let holder = self.customer_mut(&customer)?;
                let number = match amount {
                    Some(amount) => holder.open_account_with(kind, amount, term_months)?,
                    None if term_months.is_some() => {
                        let amount = Self::default_opening_amount(holder, kind);
                        holder.open_account_with(kind, amount, term_months)?
                    }
                    None => holder.open_account(kind),
                };
                self.aliases.insert((customer, alias), number);
            }
            Operation::Deposit {
                customer,
                alias,
                amount,
            } => {
                let number = self.account_number(&customer, &alias)?;
                let account = self
                    .customer_mut(&customer)?
                    .account_mut(number)
                    .ok_or(LedgerError::AccountNotFound(number))?;
                account.try_deposit(amount)?;
            }
            Operation::Withdraw {
                customer,
                alias,
                amount,
            } => {
                let number = self.account_number(&customer, &alias)?;
                let account = self
                    .customer_mut(&customer)?
                    .account_mut(number)
                    .ok_or(LedgerError::AccountNotFound(number))?;
                account.try_withdraw(amount)?;
            }
            Operation::Transfer {
                customer,
                from,
                to,
                amount,
            } => {
                let source = self.account_number(&customer, &from)?;
                let destination = self.account_number(&customer, &to)?;
                self.customer_mut(&customer)?
                    .try_transfer_funds(source, destination, amount)?;
            }
            Operation::Credit { customer, alias } => {
                let number = self.account_number(&customer, &alias)?;
                self.customer_mut(&customer)?.credit_interest(number)?;
            }
            Operation::Close { customer, alias } => {
                let number = self.account_number(&customer, &alias)?;
                self.customer_mut(&customer)?
                    .close_account(number)
                    .ok_or(LedgerError::AccountNotFound(number))?;
                self.aliases.remove(&(customer, alias));
            }
        }
        Ok(())
    }

    /// Snapshots of every account, ordered by customer name then opening order
    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        let mut customers: Vec<&Customer> = self.bank.customers().collect();
        customers.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        customers
            .into_iter()
            .flat_map(|customer| customer.snapshot_accounts())
            .collect()
    }

    fn customer_id(&self, name: &str) -> Result<&CustomerId, LedgerError> {
        self.customers
            .get(name)
            .ok_or_else(|| LedgerError::UnknownAlias(name.to_string()))
    }

    fn customer_mut(&mut self, name: &str) -> Result<&mut Customer, LedgerError> {
        let id = self
            .customers
            .get(name)
            .ok_or_else(|| LedgerError::UnknownAlias(name.to_string()))?;
        self.bank
            .customer_mut(id)
            .ok_or_else(|| LedgerError::CustomerNotFound(id.clone()))
    }

    fn default_opening_amount(customer: &Customer, kind: AccountKind) -> Decimal {
        let policy = customer.policy();
        match kind {
            AccountKind::Checking => policy.checking.opening_balance,
            AccountKind::Savings => policy.savings.opening_balance,
            AccountKind::MoneyMarket => policy.money_market.opening_balance,
            AccountKind::CertificateOfDeposit => policy.certificate.opening_balance,
            AccountKind::IndividualRetirement => policy.retirement.monthly_deposit,
        }
    }
}
