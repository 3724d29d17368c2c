use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use leadtime_core::table::interval_batch;
use leadtime_core::{RuleConfig, WeekdayRule, annotate, dataset, day_names, has_weekday_in_range};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "leadtime",
    about = "Weekday-in-range checks and day lists for lead-time intervals"
)]
struct Cli {
    /// JSON file with target_weekday / min_offset_days
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
struct RuleArgs {
    /// Target weekday, 0=Monday .. 6=Sunday (default 3)
    #[arg(long, allow_negative_numbers = true)]
    weekday: Option<i64>,

    /// Minimum days after start before the weekday counts (default 5)
    #[arg(long, allow_negative_numbers = true)]
    min_offset_days: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single interval
    Check {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        #[command(flatten)]
        rule: RuleArgs,
    },

    /// Add check and day-list columns to a Parquet table
    Annotate {
        /// Input Parquet file
        #[arg(short, long)]
        input: PathBuf,

        /// Output Parquet file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "start_date")]
        start_col: String,

        #[arg(long, default_value = "end_date")]
        end_col: String,

        /// Name of the boolean result column
        #[arg(long, default_value = "has_weekday")]
        check_col: String,

        /// Name of the day-list column
        #[arg(long, default_value = "days_list")]
        days_col: String,

        #[command(flatten)]
        rule: RuleArgs,
    },

    /// Print sample computations
    Demo,
}

/// Config file values, overridden by any flags given on the command line.
fn resolve_rule(config: Option<&Path>, args: &RuleArgs) -> Result<WeekdayRule> {
    let mut rule_config = match config {
        Some(path) => RuleConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RuleConfig::default(),
    };
    if let Some(weekday) = args.weekday {
        rule_config.target_weekday = weekday;
    }
    if let Some(days) = args.min_offset_days {
        rule_config.min_offset_days = days;
    }
    rule_config.into_rule().context("invalid weekday rule")
}

fn format_days(days: Option<Vec<String>>) -> String {
    match days {
        Some(names) => format!("[{}]", names.join(", ")),
        None => "-".to_string(),
    }
}

fn cmd_check(start: NaiveDate, end: NaiveDate, rule: &WeekdayRule) {
    let hit = has_weekday_in_range(Some(start), Some(end), rule);
    println!(
        "{start} to {end}: {} on or after {} day(s): {hit}",
        rule.target(),
        rule.min_offset_days()
    );
    println!("days: {}", format_days(day_names(Some(start), Some(end))));
}

fn cmd_annotate(
    input: &Path,
    output: &Path,
    start_col: &str,
    end_col: &str,
    check_col: &str,
    days_col: &str,
    rule: &WeekdayRule,
) -> Result<()> {
    let batch = dataset::read_parquet(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    info!("{}: {} row(s)", input.display(), batch.num_rows());

    let annotated = annotate(&batch, start_col, end_col, rule, check_col, days_col)
        .context("failed to annotate table")?;

    dataset::write_parquet(output, &annotated)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {} row(s) to {}", annotated.num_rows(), output.display());

    Ok(())
}

fn cmd_demo(rule: &WeekdayRule) -> Result<()> {
    let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();

    let (start, end) = (date("2023-10-01"), date("2023-10-10"));
    println!(
        "Single check ({} to {}): {}",
        start.map(|d| d.to_string()).unwrap_or_default(),
        end.map(|d| d.to_string()).unwrap_or_default(),
        has_weekday_in_range(start, end, rule)
    );

    let intervals = [
        (date("2023-10-01"), date("2023-10-10")),
        (date("2023-10-01"), date("2023-10-15")),
        (date("2023-11-01"), date("2023-11-02")),
        (None, date("2023-10-15")),
    ];
    println!();
    println!("{}", demo_table(&intervals, rule)?);

    Ok(())
}

/// Annotate the intervals in bulk and render the resulting table.
fn demo_table(
    intervals: &[(Option<NaiveDate>, Option<NaiveDate>)],
    rule: &WeekdayRule,
) -> Result<String> {
    let batch = interval_batch("start_date", "end_date", intervals)?;
    let annotated = annotate(
        &batch,
        "start_date",
        "end_date",
        rule,
        "has_weekday",
        "days_list",
    )?;
    info!("demo table: {} row(s)", annotated.num_rows());

    Ok(pretty_format_batches(&[annotated])
        .context("failed to format demo table")?
        .to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    match &cli.command {
        Commands::Check { start, end, rule } => {
            let rule = resolve_rule(cli.config.as_deref(), rule)?;
            cmd_check(*start, *end, &rule);
        }
        Commands::Annotate {
            input,
            output,
            start_col,
            end_col,
            check_col,
            days_col,
            rule,
        } => {
            let rule = resolve_rule(cli.config.as_deref(), rule)?;
            cmd_annotate(input, output, start_col, end_col, check_col, days_col, &rule)?;
        }
        Commands::Demo => {
            let rule = resolve_rule(cli.config.as_deref(), &RuleArgs::default())?;
            cmd_demo(&rule)?;
        }
    }

    Ok(())
}
