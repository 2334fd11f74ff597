//! Generate credit policy reports from receivable invoice CSV exports
//!
//! One report CSV is written per input ledger. Ledgers are independent
//! engine invocations, so they run in parallel.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;

use receivables_system::{
    config::PolicyConfig,
    engine::CreditPolicyEngine,
    ledger::load_invoices,
    report::{build_report, write_csv},
};

#[derive(Parser, Debug)]
#[command(about = "Derive per-customer credit policy from paid invoice ledgers")]
struct Args {
    /// Input invoice CSV file(s)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory the report CSVs are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Rows to skip above the header (Xero detail exports carry 4)
    #[arg(long, default_value_t = 0)]
    skip_rows: usize,

    /// Baseline credit term in days
    #[arg(long, default_value_t = 30)]
    credit_term_days: u32,

    /// Cost of capital as a fraction (0.10 = 10%)
    #[arg(long, default_value_t = 0.10)]
    wacc: f64,

    /// Day-count convention for the daily financing rate
    #[arg(long, default_value_t = 360)]
    days_in_year: u32,

    /// Fraction of customers, by volume, flagged high-value
    #[arg(long, default_value_t = 0.25)]
    top_value_fraction: f64,

    /// Reminder schedule label for high-risk customers
    #[arg(long)]
    intense_schedule: Option<String>,

    /// Reminder schedule label for everyone else
    #[arg(long)]
    normal_schedule: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let defaults = PolicyConfig::default();
    let config = PolicyConfig {
        credit_term_days: args.credit_term_days,
        wacc: args.wacc,
        days_in_year: args.days_in_year,
        top_value_fraction: args.top_value_fraction,
        intense_schedule_label: args
            .intense_schedule
            .unwrap_or(defaults.intense_schedule_label),
        normal_schedule_label: args
            .normal_schedule
            .unwrap_or(defaults.normal_schedule_label),
    };
    let engine = CreditPolicyEngine::new(config)?;

    let start = Instant::now();
    let results: Vec<anyhow::Result<(PathBuf, usize)>> = args
        .inputs
        .par_iter()
        .map(|input| {
            let ledger = load_invoices(input, args.skip_rows)
                .with_context(|| format!("reading {}", input.display()))?;
            let aggregates = engine.derive_policy(&ledger)?;
            let rows = build_report(&aggregates);

            let out_path = report_path(&args.out_dir, input);
            let file = File::create(&out_path)
                .with_context(|| format!("creating {}", out_path.display()))?;
            write_csv(&rows, file)?;
            Ok((out_path, rows.len()))
        })
        .collect();

    let mut failed = false;
    for result in &results {
        match result {
            Ok((path, contacts)) => println!("{}: {} contacts", path.display(), contacts),
            Err(err) => {
                failed = true;
                eprintln!("error: {err:#}");
            }
        }
    }
    println!("Total time: {:?}", start.elapsed());

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn report_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    out_dir.join(format!("{stem}_credit_policy.csv"))
}
