//! Load proposals from JSON documents or CSV batches

use csv::Reader;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::data::lenient;
use super::{Proposal, ProposalType};
use crate::error::Result;

/// Load one proposal from a JSON file
pub fn load_proposal<P: AsRef<Path>>(path: P) -> Result<Proposal> {
    let file = File::open(path)?;
    load_proposal_from_reader(BufReader::new(file))
}

/// Load one proposal from any JSON reader
pub fn load_proposal_from_reader<R: std::io::Read>(reader: R) -> Result<Proposal> {
    Ok(serde_json::from_reader(reader)?)
}

/// Raw CSV row for batch runs
///
/// Blank numeric cells keep the segment default for that column.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    proposal_type: String,
    #[serde(default)]
    client_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    monthly_consumption_kwh: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    tariff_per_kwh: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    current_monthly_bill: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    minimum_monthly_fee: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    investment_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    financing_monthly_rate_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    card_monthly_rate_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    panel_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    price_per_panel: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    annual_energy_readjustment_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    annual_benchmark_rate_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    annual_savings_rate_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    co2_emission_factor: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    co2_absorbed_per_tree_per_year: Option<f64>,
}

impl CsvRow {
    fn to_proposal(self) -> Result<Proposal> {
        let proposal_type: ProposalType = self.proposal_type.parse()?;
        let mut proposal = Proposal::for_segment(proposal_type);

        if let Some(name) = self.client_name.filter(|n| !n.trim().is_empty()) {
            proposal.client_name = name;
        }

        // Same order as the form: consumption and tariff first, then the bill
        let inputs = &mut proposal.inputs;
        if let Some(v) = self.monthly_consumption_kwh {
            inputs.set_monthly_consumption(v);
        }
        if let Some(v) = self.tariff_per_kwh {
            inputs.set_tariff(v);
        }
        if let Some(v) = self.current_monthly_bill {
            inputs.set_current_bill(v);
        }

        let overrides = [
            (self.minimum_monthly_fee, &mut inputs.minimum_monthly_fee),
            (self.investment_amount, &mut inputs.investment_amount),
            (self.financing_monthly_rate_pct, &mut inputs.financing_monthly_rate_pct),
            (self.card_monthly_rate_pct, &mut inputs.card_monthly_rate_pct),
            (self.annual_energy_readjustment_pct, &mut inputs.annual_energy_readjustment_pct),
            (self.annual_benchmark_rate_pct, &mut inputs.annual_benchmark_rate_pct),
            (self.annual_savings_rate_pct, &mut inputs.annual_savings_rate_pct),
            (self.co2_emission_factor, &mut inputs.co2_emission_factor),
            (self.co2_absorbed_per_tree_per_year, &mut inputs.co2_absorbed_per_tree_per_year),
        ];
        for (value, target) in overrides {
            if let Some(v) = value {
                *target = v;
            }
        }

        if self.panel_count.is_some() {
            inputs.panel_count = self.panel_count;
        }
        if self.price_per_panel.is_some() {
            inputs.price_per_panel = self.price_per_panel;
        }

        Ok(proposal)
    }
}

/// Load a batch of proposals from a CSV file
pub fn load_proposals<P: AsRef<Path>>(path: P) -> Result<Vec<Proposal>> {
    let reader = Reader::from_path(path.as_ref())?;
    let proposals = read_rows(reader)?;
    info!("Loaded {} proposals from {}", proposals.len(), path.as_ref().display());
    Ok(proposals)
}

/// Load a batch of proposals from any CSV reader
pub fn load_proposals_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Proposal>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Proposal>> {
    let mut proposals = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        proposals.push(row.to_proposal()?);
    }
    Ok(proposals)
}
