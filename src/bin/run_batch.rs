//! Run projections for a CSV batch of proposals
//!
//! Writes one summary row per proposal, in input order.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use solar_proposal::{proposal::load_proposals, ProjectionResult, Proposal, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Compute proposal figures for a CSV batch")]
struct Args {
    /// Proposals CSV (proposal_type plus any input columns)
    #[arg(short, long, default_value = "data/sample_batch.csv")]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "batch_results.csv")]
    output: PathBuf,
}

/// One output line per proposal
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    proposal_type: &'static str,
    client_name: &'a str,
    current_monthly_bill: f64,
    monthly_savings: f64,
    investment_amount: f64,
    financing_60: f64,
    financing_90: f64,
    financing_120: f64,
    card_24: f64,
    payback_years: u32,
    cumulative_savings_10: f64,
    cumulative_savings_25: f64,
    net_return_25: f64,
    benchmark_25: f64,
    savings_account_25: f64,
    co2_avoided_tonnes: f64,
    trees_saved: i64,
}

impl<'a> SummaryRow<'a> {
    fn new(proposal: &'a Proposal, result: &ProjectionResult) -> Self {
        Self {
            proposal_type: proposal.proposal_type.as_str(),
            client_name: &proposal.client_name,
            current_monthly_bill: proposal.inputs.current_monthly_bill,
            monthly_savings: result.monthly_savings,
            investment_amount: result.system_price,
            financing_60: result.installments.financing_60,
            financing_90: result.installments.financing_90,
            financing_120: result.installments.financing_120,
            card_24: result.installments.card_24,
            payback_years: result.payback_years,
            cumulative_savings_10: result.cumulative_savings_10,
            cumulative_savings_25: result.cumulative_savings_25,
            net_return_25: result.net_return_25,
            benchmark_25: result.benchmark.year_25,
            savings_account_25: result.savings_account.year_25,
            co2_avoided_tonnes: result.co2_avoided_tonnes,
            trees_saved: result.trees_saved,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let proposals = load_proposals(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    info!("Loaded {} proposals in {:?}", proposals.len(), start.elapsed());

    let runner = ScenarioRunner::new();
    let results = runner.run_batch(&proposals);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    for (proposal, result) in proposals.iter().zip(&results) {
        writer.serialize(SummaryRow::new(proposal, result))?;
    }
    writer.flush()?;

    let not_paid_back = results.iter().filter(|r| r.payback().is_none()).count();
    println!(
        "Wrote {} proposals to {} in {:?} ({} without payback in 25 years)",
        results.len(),
        args.output.display(),
        start.elapsed(),
        not_paid_back
    );

    Ok(())
}
