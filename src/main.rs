use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use debtplan::application::engine::AmortizationEngine;
use debtplan::config::PlannerConfig;
use debtplan::domain::debt::Debt;
use debtplan::domain::ports::DebtStoreBox;
use debtplan::domain::schedule::PayoffPolicy;
use debtplan::infrastructure::in_memory::InMemoryDebtStore;
use debtplan::interfaces::csv::debt_reader::DebtReader;
use debtplan::interfaces::csv::schedule_writer::ScheduleWriter;
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{Level, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input debts CSV file
    input: PathBuf,

    /// JSON file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Longest schedule allowed, in months (overrides the config file)
    #[arg(long)]
    max_months: Option<u32>,

    /// Decimal places interest is rounded to (overrides the config file)
    #[arg(long)]
    scale: Option<u32>,

    /// First month of the schedule; payments fall due one month after it. Defaults to today.
    #[arg(long)]
    start: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Log debug events
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Amortize each debt on its own
    Plan {
        /// Added to every monthly payment
        #[arg(long, default_value_t = Decimal::ZERO)]
        extra: Decimal,

        /// Only plan the debt with this id
        #[arg(long)]
        debt: Option<String>,
    },
    /// Pay every debt from one monthly budget
    Strategy {
        #[arg(long)]
        budget: Decimal,

        #[arg(long, default_value_t = PayoffPolicy::Avalanche)]
        policy: PayoffPolicy,
    },
    /// Compare avalanche and snowball against paying only minimums
    Compare {
        #[arg(long)]
        budget: Decimal,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).into_diagnostic()?;

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_path(path).into_diagnostic()?,
        None => PlannerConfig::default(),
    };
    if let Some(max_months) = cli.max_months {
        config.max_months = max_months;
    }
    if let Some(scale) = cli.scale {
        config.money_scale = scale;
    }
    let engine = AmortizationEngine::new(config).into_diagnostic()?;

    // Load debts
    let store: DebtStoreBox = Box::new(InMemoryDebtStore::new());
    let reader = DebtReader::from_path(&cli.input).into_diagnostic()?;
    for debt_result in reader.debts() {
        match debt_result {
            Ok(debt) => {
                if store.get(&debt.id).await.into_diagnostic()?.is_some() {
                    warn!("Duplicate debt id {}, keeping the last record", debt.id);
                }
                store.store(debt).await.into_diagnostic()?;
            }
            Err(e) => {
                warn!("Error reading debt: {}", e);
            }
        }
    }
    let debts = store.all().await.into_diagnostic()?;
    info!(count = debts.len(), "loaded debts");

    let start = cli.start.unwrap_or_else(|| Local::now().date_naive());
    let stdout = io::stdout();
    let out = stdout.lock();

    match cli.command {
        Command::Plan { extra, debt } => {
            let selected: Vec<&Debt> = match &debt {
                Some(id) => {
                    let found: Vec<&Debt> = debts.iter().filter(|d| &d.id == id).collect();
                    if found.is_empty() {
                        return Err(miette!("No debt with id {id}"));
                    }
                    found
                }
                None => debts.iter().collect(),
            };
            let plans = selected
                .into_iter()
                .map(|d| engine.compute_debt_payment_plan(d, extra, start))
                .collect::<Result<Vec<_>, _>>()
                .into_diagnostic()?;
            for plan in &plans {
                info!(
                    debt = %plan.debt_id,
                    months = plan.months,
                    total_interest = %plan.total_interest,
                    payoff_date = %plan.payoff_date,
                    "payment plan"
                );
            }
            match cli.format {
                Format::Csv => {
                    let mut writer = ScheduleWriter::new(out);
                    for plan in &plans {
                        writer.write_plan(plan).into_diagnostic()?;
                    }
                }
                Format::Json => write_json(out, &plans)?,
            }
        }
        Command::Strategy { budget, policy } => {
            let strategy = engine
                .compute_repayment_strategy(&debts, budget, policy, start)
                .into_diagnostic()?;
            info!(
                %policy,
                total_months = strategy.total_months,
                total_interest = %strategy.total_interest_paid,
                payoff_date = %strategy.payoff_date,
                "repayment strategy"
            );
            match cli.format {
                Format::Csv => ScheduleWriter::new(out)
                    .write_strategy(&strategy)
                    .into_diagnostic()?,
                Format::Json => write_json(out, &strategy)?,
            }
        }
        Command::Compare { budget } => {
            let comparison = engine
                .compare_strategies(&debts, budget, start)
                .into_diagnostic()?;
            info!(
                minimum_only_interest = %comparison.minimum_only_interest,
                avalanche_savings = %comparison.avalanche_savings,
                snowball_savings = %comparison.snowball_savings,
                cheapest = %comparison.cheapest().policy,
                "strategy comparison"
            );
            match cli.format {
                Format::Csv => ScheduleWriter::new(out)
                    .write_comparison(&comparison)
                    .into_diagnostic()?,
                Format::Json => write_json(out, &comparison)?,
            }
        }
    }

    Ok(())
}

fn write_json<W: Write, T: Serialize>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value).into_diagnostic()?;
    writeln!(out).into_diagnostic()?;
    Ok(())
}
