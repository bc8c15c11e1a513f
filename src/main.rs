mod analytics;
mod engine;
mod locks;
mod models;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{BatchRunner, LedgerEngine};
use crate::models::{Account, AccountKind, Transaction};
use crate::storage::{CsvJournal, MemoryStorage, MirroredStorage, Storage};
use crate::types::Currency;

#[derive(Serialize)]
struct BalanceRow<'a> {
    id: &'a str,
    name: &'a str,
    kind: AccountKind,
    currency: Currency,
    balance: Decimal,
    active: bool
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: ledger-engine [accounts].csv [operations].csv [log_level:optional] [journal].csv:optional > [balances].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let accounts_path = &args[1];
    let operations_path = &args[2];
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    match args.get(4) {
        Some(journal_path) => {
            let journal = CsvJournal::open(journal_path)?;
            let storage = Arc::new(MirroredStorage::new(MemoryStorage::new(), journal));
            run(storage, accounts_path, operations_path).await
        },
        None => run(Arc::new(MemoryStorage::new()), accounts_path, operations_path).await
    }
}

async fn run<S: Storage>(storage: Arc<S>, accounts_path: &str, operations_path: &str) -> Result<()> {
    let engine = Arc::new(LedgerEngine::new(storage));
    let runner = BatchRunner::new(engine.clone());

    for currency in Currency::ALL {
        for target in Currency::ALL.into_iter().filter(|target| *target != currency) {
            if let Some(rate) = engine.rates().rate(currency, target) {
                debug!("Rate [{currency}] -> [{target}]: [{}] ([{}])", rate.value, rate.change);
            }
        }
    }

    let loaded = runner.load_accounts(accounts_path).await?;
    info!("Loaded [{}] accounts, [{}] rejected, [{}] malformed", loaded.applied, loaded.rejected, loaded.malformed);

    let timer = Instant::now();
    let summary = runner.run(operations_path).await?;
    let duration = timer.elapsed();

    info!("Processed operations in: {duration:?}");
    info!("Applied [{}] operations, [{}] rejected, [{}] malformed", summary.applied, summary.rejected, summary.malformed);

    let accounts = engine.accounts().await?;
    let transactions = engine.transactions().await?;

    report_analytics(&accounts, &transactions);
    write_results_to_stdout(&accounts)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Because we are doing stdout redirection, we will need to utilize stderr to display logging
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn report_analytics(accounts: &[Account], transactions: &[Transaction]) {
    let today = Utc::now();

    for currency in Currency::ALL {
        match analytics::total_balance(accounts, currency) {
            Some(total) => info!("Total balance [{currency}]: [{total}]"),
            None => warn!("Total balance [{currency}] overflows")
        }
    }

    info!(
        "This month: income [{}], expense [{}]",
        analytics::monthly_income(transactions, today.month(), today.year()),
        analytics::monthly_expense(transactions, today.month(), today.year())
    );

    for month in analytics::monthly_summary(transactions, today.year()) {
        debug!("Month [{}]: income [{}], expense [{}]", month.month, month.income, month.expense);
    }

    for share in analytics::category_breakdown(transactions) {
        info!("Spending [{:?}]: [{}] ([{}]%)", share.category, share.total, share.percentage);
    }

    for account in accounts {
        let Some(rate) = account.annual_rate else {
            continue;
        };

        match analytics::projected_interest(account.balance, rate, 12) {
            Some(interest) => info!("Deposit [{}] [{}] at [{rate}]% projects [{interest}] over 12 months", account.id, account.name),
            None => warn!("Deposit [{}] [{}] at [{rate}]%: projected interest overflows", account.id, account.name)
        }
    }
}

fn write_results_to_stdout(accounts: &[Account]) -> Result<()> {
    let mut output = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(stdout().lock()));

    //NOTE: The header is written by hand so an empty ledger still produces one
    output.write_record(["id", "name", "kind", "currency", "balance", "active"])?;

    for account in accounts {
        output.serialize(BalanceRow {
            id: &account.id,
            name: &account.name,
            kind: account.kind,
            currency: account.currency,
            balance: account.balance,
            active: account.active
        })?;
    }

    output.flush()?;

    Ok(())
}
