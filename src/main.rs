use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, EngineConfig};
use payroll_engine::engine::PayrollCalculator;
use payroll_engine::models::PayrollCalculationInput;
use payroll_engine::store::{CachingDataSource, InMemoryDataSource, PayrollDataSource};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Statutory payroll engine.
///
/// Calculates monthly pay with PF, ESI, professional tax, loss of pay and TDS
/// from a snapshot of HR and statutory data.
#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Sources {
    /// Directory holding statutory_defaults.yaml and engine.yaml.
    #[arg(long, default_value = "./config/default")]
    config: PathBuf,

    /// YAML snapshot of employees, salary structures and statutory configuration.
    #[arg(long, default_value = "./data/sample_snapshot.yaml")]
    snapshot: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        #[command(flatten)]
        sources: Sources,

        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },

    /// Calculate one employee's pay and print it as JSON.
    Calculate {
        #[command(flatten)]
        sources: Sources,

        /// Tenant the employee belongs to.
        #[arg(long)]
        tenant: String,

        /// Employee to calculate.
        #[arg(long)]
        employee: String,

        /// Pay month (1-12).
        #[arg(long)]
        month: u32,

        /// Pay year.
        #[arg(long)]
        year: i32,

        /// Days attended; defaults to full attendance.
        #[arg(long)]
        days_worked: Option<Decimal>,

        /// Working days in the period; defaults to the month's non-Sunday days.
        #[arg(long)]
        total_days: Option<Decimal>,

        /// Loss-of-pay days; defaults to the days not worked.
        #[arg(long)]
        lop_days: Option<Decimal>,

        /// Ad-hoc payment for a salary component, as NAME=AMOUNT. Repeatable.
        #[arg(
            long = "variable-payment",
            value_name = "NAME=AMOUNT",
            value_parser = parse_variable_payment
        )]
        variable_payments: Vec<(String, Decimal)>,
    },
}

/// Parses `NAME=AMOUNT`, splitting on the last `=` so names may contain one.
fn parse_variable_payment(raw: &str) -> Result<(String, Decimal), String> {
    let (name, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing component name in '{}'", raw));
    }
    let amount = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount in '{}': {}", raw, e))?;
    Ok((name.to_string(), amount))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ─── wiring ──────────────────────────────────────────────────────────────────

fn build_calculator(sources: &Sources) -> anyhow::Result<PayrollCalculator> {
    let config: EngineConfig = ConfigLoader::load(&sources.config)
        .with_context(|| format!("Failed to load configuration from '{}'", sources.config.display()))?
        .into_config();
    let snapshot = InMemoryDataSource::from_yaml_file(&sources.snapshot).with_context(|| {
        format!("Failed to load snapshot '{}'", sources.snapshot.display())
    })?;
    debug!(employees = snapshot.employee_count(), "Snapshot loaded");

    let source: Arc<dyn PayrollDataSource> = if config.settings().cache_statutory_configs {
        Arc::new(CachingDataSource::new(snapshot))
    } else {
        Arc::new(snapshot)
    };
    Ok(PayrollCalculator::new(source, config))
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { sources, bind } => {
            let calculator = build_calculator(&sources)?;
            let router = create_router(AppState::new(calculator));

            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            info!(address = %bind, "Payroll engine listening");
            axum::serve(listener, router).await?;
        }
        Command::Calculate {
            sources,
            tenant,
            employee,
            month,
            year,
            days_worked,
            total_days,
            lop_days,
            variable_payments,
        } => {
            let calculator = build_calculator(&sources)?;

            let mut input = PayrollCalculationInput::new(tenant, employee, month, year);
            input.days_worked = days_worked;
            input.total_days = total_days;
            input.lop_days = lop_days;
            for (name, amount) in variable_payments {
                let total = input.variable_payments.entry(name).or_insert(Decimal::ZERO);
                *total = total
                    .checked_add(amount)
                    .context("Repeated variable payments overflow")?;
            }

            let result = calculator.calculate(&input).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
