use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::rc::Rc;

use bank_ledger::{
    Account, AccountKind, Bank, Clock, LedgerError, ManualClock, Operation, Policy, Rejection,
    SavingsAccount, SequentialIds, Simulation, Step,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn bank() -> (Rc<ManualClock>, Bank) {
    let clock = Rc::new(ManualClock::new(date(2022, 1, 6)));
    let shared: Rc<dyn Clock> = clock.clone();
    let bank = Bank::new(shared, Rc::new(SequentialIds::default()), Policy::default());
    (clock, bank)
}

#[test]
fn document_scenarios_pass() {
    let (clock, mut bank) = bank();
    let id = bank.add_customer("Farhan");
    let customer = bank.customer_mut(&id).unwrap();

    // savings: 300 opening, deposit 100, withdraw 50 out of the newest deposit
    let savings = customer
        .open_account_with(AccountKind::Savings, dec!(300), None)
        .unwrap();
    let account = customer.account_mut(savings).unwrap();
    assert!(account.deposit(dec!(100)));
    assert!(account.withdraw(dec!(50)));
    assert_eq!(account.principal(), dec!(350));

    // certificate: locked for a month
    let cd = customer
        .open_account_with(AccountKind::CertificateOfDeposit, dec!(1000), Some(1))
        .unwrap();
    let account = customer.account_mut(cd).unwrap();
    assert!(!account.deposit(dec!(50)));
    assert_eq!(account.principal(), dec!(1000));
    clock.set(date(2022, 2, 6));
    assert!(account.deposit(dec!(50)));
    assert_eq!(account.principal(), dec!(1050));

    // retirement: monthly deposit clamped to 500
    let ira = customer
        .open_account_with(AccountKind::IndividualRetirement, dec!(700), None)
        .unwrap();
    clock.advance_months(2);
    assert_eq!(customer.account(ira).unwrap().principal(), dec!(1000));
}

#[test]
fn savings_history_matches_scenario() {
    let clock: Rc<dyn Clock> = Rc::new(ManualClock::new(date(2022, 1, 6)));
    let mut account = SavingsAccount::savings(
        bank_ledger::AccountNumber(12_345_678),
        dec!(300),
        Policy::default().savings,
        clock,
    );
    assert!(account.deposit(dec!(100)));
    assert_eq!(account.deposits().amounts(), vec![dec!(300), dec!(100)]);
    assert!(account.withdraw(dec!(50)));
    assert_eq!(account.deposits().amounts(), vec![dec!(300), dec!(50)]);
    assert_eq!(account.withdraw_count(), 1);
}

#[test]
fn deposits_of_non_positive_amounts_fail_everywhere() {
    let (clock, mut bank) = bank();
    let id = bank.add_customer("Nobody");
    let customer = bank.customer_mut(&id).unwrap();
    for kind in [
        AccountKind::Savings,
        AccountKind::MoneyMarket,
        AccountKind::CertificateOfDeposit,
        AccountKind::IndividualRetirement,
    ] {
        customer.open_account(kind);
    }
    // past every term
    clock.advance_months(61);

    let numbers: Vec<_> = customer.accounts().iter().map(|a| a.number()).collect();
    for number in numbers {
        let account = customer.account_mut(number).unwrap();
        let before = account.principal();
        for amount in [dec!(0), dec!(-0.01), dec!(-100)] {
            assert!(!account.deposit(amount), "{:?}", account.kind());
        }
        assert_eq!(account.principal(), before);
    }
}

#[test]
fn withdrawals_never_break_floor() {
    let (_, mut bank) = bank();
    let id = bank.add_customer("Saver");
    let customer = bank.customer_mut(&id).unwrap();
    let savings = customer.open_account_with(AccountKind::Savings, dec!(650), None).unwrap();
    let market = customer
        .open_account_with(AccountKind::MoneyMarket, dec!(900), None)
        .unwrap();

    for (number, floor) in [(savings, dec!(300)), (market, dec!(500))] {
        let account = customer.account_mut(number).unwrap();
        for amount in [dec!(120), dec!(95.5), dec!(200), dec!(33), dec!(80), dec!(1)] {
            if account.withdraw(amount) {
                assert!(account.principal() >= floor);
            }
        }
        assert!(account.principal() >= floor);
    }
}

#[test]
fn retirement_penalty_before_and_after_term() {
    let (clock, mut bank) = bank();
    let id = bank.add_customer("Retiree");
    let customer = bank.customer_mut(&id).unwrap();
    let ira = customer.open_account(AccountKind::IndividualRetirement);

    clock.advance_months(24);
    let account = customer.account_mut(ira).unwrap();
    let before = account.principal();
    assert!(account.withdraw(dec!(200)));
    assert_eq!(before - account.principal(), dec!(220));

    clock.advance_months(36);
    let account = customer.account_mut(ira).unwrap();
    let before = account.principal();
    assert!(account.withdraw(dec!(200)));
    assert_eq!(before - account.principal(), dec!(200));
}

#[test]
fn transfers_are_all_or_nothing() {
    let (_, mut bank) = bank();
    let id = bank.add_customer("Mover");
    let customer = bank.customer_mut(&id).unwrap();
    let checking = customer.accounts()[0].number();
    let cd = customer.open_account(AccountKind::CertificateOfDeposit);
    let savings = customer.open_account(AccountKind::Savings);

    assert_eq!(
        customer.try_transfer_funds(checking, cd, dec!(10)),
        Err(LedgerError::Rejected(Rejection::TermLocked(date(2023, 7, 6))))
    );
    assert!(customer.transfer_funds(checking, savings, dec!(25)));

    let balances: HashSet<(AccountKind, Decimal)> = customer
        .accounts()
        .iter()
        .map(|account| (account.kind(), account.principal()))
        .collect();
    assert_eq!(
        balances,
        HashSet::from([
            (AccountKind::Checking, dec!(0)),
            (AccountKind::CertificateOfDeposit, dec!(1000)),
            (AccountKind::Savings, dec!(325)),
        ])
    );
}

#[test]
fn simulation_replays_a_month() {
    let mut simulation = Simulation::new(
        date(2022, 1, 1),
        Rc::new(SequentialIds::default()),
        Policy::default(),
    );
    let customer = || "ada".to_string();
    let steps = vec![
        Step {
            date: date(2022, 1, 1),
            operation: Operation::Join { name: customer() },
        },
        Step {
            date: date(2022, 1, 1),
            operation: Operation::Open {
                customer: customer(),
                alias: "mm".to_string(),
                kind: AccountKind::MoneyMarket,
                amount: Some(dec!(2000)),
                term_months: None,
            },
        },
        Step {
            date: date(2022, 1, 2),
            operation: Operation::Transfer {
                customer: customer(),
                from: "mm".to_string(),
                to: "checking".to_string(),
                amount: dec!(100),
            },
        },
    ];
    for step in steps {
        simulation.apply(step).unwrap();
    }

    let withdraw = |day| Step {
        date: date(2022, 1, day),
        operation: Operation::Withdraw {
            customer: customer(),
            alias: "mm".to_string(),
            amount: dec!(10),
        },
    };
    // one transfer already used a withdrawal this cycle
    for day in 3..8 {
        simulation.apply(withdraw(day)).unwrap();
    }
    assert_eq!(
        simulation.apply(withdraw(20)),
        Err(LedgerError::Rejected(Rejection::WithdrawalLimitReached))
    );
    assert_eq!(
        simulation.apply(Step {
            date: date(2022, 2, 1),
            operation: Operation::Withdraw {
                customer: customer(),
                alias: "mm".to_string(),
                amount: dec!(10),
            },
        }),
        Ok(())
    );

    let snapshots = simulation.snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].kind, AccountKind::Checking);
    assert_eq!(snapshots[0].principal, dec!(125));
    assert_eq!(snapshots[1].kind, AccountKind::MoneyMarket);
    assert_eq!(snapshots[1].principal, dec!(1840));
    assert!(snapshots[1].value > snapshots[1].principal);
}
