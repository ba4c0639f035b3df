//! Solar Proposal CLI
//!
//! Builds a proposal from segment defaults, an optional JSON file and
//! `field=value` edits, then prints the rendered proposal or its JSON figures.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use solar_proposal::{
    proposal::load_proposal,
    render_text, ProjectionConfig, ProjectionEngine, ProposalType, SegmentDefaults,
};

#[derive(Parser, Debug)]
#[command(name = "solar_proposal", version, about = "Solar energy proposal calculator")]
struct Cli {
    /// Customer segment (Business, BusinessRenter, Residential, ResidentialRenter, Rural)
    #[arg(short, long)]
    segment: Option<String>,

    /// Proposal JSON file; segment defaults are used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Segment defaults CSV replacing the built-in table
    #[arg(short, long)]
    defaults: Option<PathBuf>,

    /// Field edit as field=value (repeatable, applied in order)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    edits: Vec<String>,

    /// Print proposal and figures as JSON
    #[arg(long)]
    json: bool,

    /// Include the year-by-year savings schedule
    #[arg(long)]
    schedule: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let segment: Option<ProposalType> = cli
        .segment
        .as_deref()
        .map(str::parse::<ProposalType>)
        .transpose()
        .context("invalid --segment")?;

    let loaded;
    let defaults = match &cli.defaults {
        Some(path) => {
            loaded = SegmentDefaults::from_csv_path(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            &loaded
        }
        None => SegmentDefaults::builtin(),
    };

    let mut proposal = match &cli.input {
        Some(path) => {
            info!("Loading proposal from {}", path.display());
            load_proposal(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => defaults.proposal(segment.unwrap_or_default()),
    };

    // An explicit segment relabels a loaded file without resetting its figures
    if let (Some(_), Some(proposal_type)) = (&cli.input, segment) {
        proposal.proposal_type = proposal_type;
    }

    proposal
        .apply_assignments_with(cli.edits.iter().map(String::as_str), defaults)
        .context("invalid --set edit")?;

    let engine = ProjectionEngine::new(ProjectionConfig {
        detailed_schedule: cli.schedule,
        reference_date: None,
    });
    let result = engine.compute(&proposal.inputs);

    if cli.json {
        let doc = serde_json::json!({ "proposal": proposal, "result": result });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render_text(&proposal, &result));
    }

    Ok(())
}
