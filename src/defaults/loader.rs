//! CSV-based segment defaults loader
//!
//! One row per segment; columns follow the serialized proposal field names.

use csv::Reader;
use log::{debug, info};
use std::path::Path;

use crate::error::Result;
use crate::proposal::{ContactDetails, FinancialInputs, Proposal, ProposalType};

/// Default path to the segment defaults table
pub const DEFAULT_SEGMENTS_PATH: &str = "data/segment_defaults.csv";

#[derive(Debug, serde::Deserialize)]
struct SegmentRow {
    proposal_type: String,
    client_name: String,
    monthly_consumption_kwh: f64,
    tariff_per_kwh: f64,
    minimum_monthly_fee: f64,
    investment_amount: f64,
    financing_monthly_rate_pct: f64,
    card_monthly_rate_pct: f64,
    #[serde(default)]
    panel_count: Option<f64>,
    #[serde(default)]
    price_per_panel: Option<f64>,
    annual_energy_readjustment_pct: f64,
    annual_benchmark_rate_pct: f64,
    annual_savings_rate_pct: f64,
    co2_emission_factor: f64,
    co2_absorbed_per_tree_per_year: f64,
    whatsapp_link: String,
    alternative_contact: String,
    clients_served: u32,
    testimonial: String,
    include_final_cta: bool,
}

impl SegmentRow {
    fn to_proposal(self) -> Result<Proposal> {
        let proposal_type: ProposalType = self.proposal_type.parse()?;

        let inputs = FinancialInputs {
            monthly_consumption_kwh: self.monthly_consumption_kwh,
            tariff_per_kwh: self.tariff_per_kwh,
            current_monthly_bill: self.monthly_consumption_kwh * self.tariff_per_kwh,
            minimum_monthly_fee: self.minimum_monthly_fee,
            investment_amount: self.investment_amount,
            financing_monthly_rate_pct: self.financing_monthly_rate_pct,
            card_monthly_rate_pct: self.card_monthly_rate_pct,
            panel_count: self.panel_count,
            price_per_panel: self.price_per_panel,
            annual_energy_readjustment_pct: self.annual_energy_readjustment_pct,
            annual_benchmark_rate_pct: self.annual_benchmark_rate_pct,
            annual_savings_rate_pct: self.annual_savings_rate_pct,
            co2_emission_factor: self.co2_emission_factor,
            co2_absorbed_per_tree_per_year: self.co2_absorbed_per_tree_per_year,
        };

        Ok(Proposal {
            proposal_type,
            client_name: self.client_name,
            inputs,
            contact: ContactDetails {
                whatsapp_link: self.whatsapp_link,
                alternative_contact: self.alternative_contact,
                clients_served: self.clients_served,
                testimonial: self.testimonial,
                include_final_cta: self.include_final_cta,
            },
        })
    }
}

/// Load segment rows from a CSV file
pub fn load_segment_rows(path: &Path) -> Result<Vec<Proposal>> {
    let reader = Reader::from_path(path)?;
    let rows = read_segment_rows(reader)?;
    info!("Loaded {} segment defaults from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load segment rows from any reader
pub fn load_segment_rows_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Proposal>> {
    read_segment_rows(Reader::from_reader(reader))
}

fn read_segment_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Proposal>> {
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: SegmentRow = result?;
        let proposal = row.to_proposal()?;
        debug!("segment defaults for {}", proposal.proposal_type);
        rows.push(proposal);
    }
    Ok(rows)
}
