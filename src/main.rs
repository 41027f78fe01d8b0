use std::{path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use bank_ledger::clock::parse_date;
use bank_ledger::{
    AccountKind, IdGenerator, LedgerError, Operation, RandomIds, SequentialIds, Simulation, Step,
};
use clap::Parser;
use csv_async::{AsyncDeserializer, AsyncSerializer};
use futures::TryStreamExt;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::fs::File;
use tracing::warn;

mod settings;

/// An operation represented by the CSV field `op`
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum ScriptOp {
    Join,
    Leave,
    Open,
    Deposit,
    Withdraw,
    Transfer,
    Credit,
    Close,
}

/// An operation represented by a CSV row
#[derive(Deserialize)]
struct ScriptRow {
    /// `M/D/YYYY` or `YYYY-MM-DD`
    date: String,
    /// Customer name
    customer: String,
    op: ScriptOp,
    /// Account alias
    account: Option<String>,
    /// Destination alias of a transfer
    target: Option<String>,
    amount: Option<Decimal>,
    kind: Option<AccountKind>,
    /// Certificate term, in months
    term: Option<u32>,
}

impl ScriptRow {
    fn into_step(self) -> Result<Step, LedgerError> {
        let ScriptRow {
            date,
            customer,
            op,
            account,
            target,
            amount,
            kind,
            term,
        } = self;

        use ScriptOp::*;
        let operation = match op {
            Join => Operation::Join { name: customer },
            Leave => Operation::Leave { customer },
            Open => Operation::Open {
                alias: required(account, "account")?,
                kind: required(kind, "kind")?,
                amount,
                term_months: term,
                customer,
            },
            Deposit => Operation::Deposit {
                alias: required(account, "account")?,
                amount: required(amount, "amount")?,
                customer,
            },
            Withdraw => Operation::Withdraw {
                alias: required(account, "account")?,
                amount: required(amount, "amount")?,
                customer,
            },
            Transfer => Operation::Transfer {
                from: required(account, "account")?,
                to: required(target, "target")?,
                amount: required(amount, "amount")?,
                customer,
            },
            Credit => Operation::Credit {
                alias: required(account, "account")?,
                customer,
            },
            Close => Operation::Close {
                alias: required(account, "account")?,
                customer,
            },
        };

        Ok(Step {
            date: parse_date(&date)?,
            operation,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, LedgerError> {
    value.ok_or(LedgerError::MissingField(field))
}

/// Bank ledger simulation
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Operations filename
    #[clap(value_parser, value_name = "SCRIPT_FILE", value_hint = clap::ValueHint::FilePath)]
    script_filename: PathBuf,
    /// Settings filename (TOML)
    #[clap(long, value_parser, value_name = "CONFIG_FILE", value_hint = clap::ValueHint::FilePath)]
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings =
        settings::Settings::new(args.config.as_deref()).context("Failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("bank_ledger={}", settings.level))
        .with_writer(std::io::stderr)
        .init();

    // stream script file
    let script_file = File::open(&args.script_filename)
        .await
        .with_context(|| {
            format!(
                "Failed to read operations from {}",
                args.script_filename.display()
            )
        })?;
    // create async csv deserializer
    let mut reader = AsyncDeserializer::from_reader(script_file);
    let records = reader.deserialize::<ScriptRow>();
    futures::pin_mut!(records);

    let ids: Rc<dyn IdGenerator> = if settings.sequential_ids {
        Rc::new(SequentialIds::default())
    } else {
        Rc::new(RandomIds)
    };
    // the clock starts on the first step's date
    let mut simulation: Option<Simulation> = None;

    // apply operations in order, the header is line 1
    let mut line = 1;
    while let Some(record) = records
        .try_next()
        .await
        .context("Failed to parse operations")?
    {
        line += 1;
        let step = record
            .into_step()
            .with_context(|| format!("Invalid operation on line {line}"))?;
        let simulation = simulation.get_or_insert_with(|| {
            Simulation::new(step.date, ids.clone(), settings.policy.clone())
        });
        match simulation.apply(step) {
            Ok(()) => {}
            Err(LedgerError::Rejected(rejection)) => {
                warn!(line, "operation refused: {rejection}")
            }
            Err(err) => return Err(err).with_context(|| format!("Failed to apply line {line}")),
        }
    }

    // print account snapshots
    let mut writer = AsyncSerializer::from_writer(tokio::io::stdout());
    for snapshot in simulation.iter().flat_map(Simulation::snapshots) {
        writer.serialize(&snapshot).await?;
    }
    writer.flush().await?;

    Ok(())
}
