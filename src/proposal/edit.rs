//! Field-level editing of a proposal
//!
//! Mirrors what the proposal form does on every keystroke: coerce the raw text,
//! apply the bill/consumption/tariff rule, and reset everything when the
//! segment changes.

use std::fmt;
use std::str::FromStr;

use log::debug;

use super::data::{normalize_key, Proposal, ProposalType};
use crate::defaults::SegmentDefaults;
use crate::error::{ProposalError, Result};

/// An editable field of the proposal form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    ProposalType,
    ClientName,
    MonthlyConsumption,
    Tariff,
    CurrentBill,
    MinimumFee,
    InvestmentAmount,
    FinancingRate,
    CardRate,
    PanelCount,
    PricePerPanel,
    EnergyReadjustment,
    BenchmarkRate,
    SavingsRate,
    Co2EmissionFactor,
    Co2PerTree,
    WhatsappLink,
    AlternativeContact,
    ClientsServed,
    Testimonial,
    IncludeFinalCta,
}

const FIELD_NAMES: [(InputField, &str); 21] = [
    (InputField::ProposalType, "proposal_type"),
    (InputField::ClientName, "client_name"),
    (InputField::MonthlyConsumption, "monthly_consumption_kwh"),
    (InputField::Tariff, "tariff_per_kwh"),
    (InputField::CurrentBill, "current_monthly_bill"),
    (InputField::MinimumFee, "minimum_monthly_fee"),
    (InputField::InvestmentAmount, "investment_amount"),
    (InputField::FinancingRate, "financing_monthly_rate_pct"),
    (InputField::CardRate, "card_monthly_rate_pct"),
    (InputField::PanelCount, "panel_count"),
    (InputField::PricePerPanel, "price_per_panel"),
    (InputField::EnergyReadjustment, "annual_energy_readjustment_pct"),
    (InputField::BenchmarkRate, "annual_benchmark_rate_pct"),
    (InputField::SavingsRate, "annual_savings_rate_pct"),
    (InputField::Co2EmissionFactor, "co2_emission_factor"),
    (InputField::Co2PerTree, "co2_absorbed_per_tree_per_year"),
    (InputField::WhatsappLink, "whatsapp_link"),
    (InputField::AlternativeContact, "alternative_contact"),
    (InputField::ClientsServed, "clients_served"),
    (InputField::Testimonial, "testimonial"),
    (InputField::IncludeFinalCta, "include_final_cta"),
];

impl InputField {
    /// Canonical snake_case name (same as the serialized field name)
    pub fn name(&self) -> &'static str {
        FIELD_NAMES
            .iter()
            .find(|(field, _)| field == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }

    /// Fields whose raw text is coerced to a number
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            InputField::ProposalType
                | InputField::ClientName
                | InputField::WhatsappLink
                | InputField::AlternativeContact
                | InputField::Testimonial
                | InputField::IncludeFinalCta
        )
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputField {
    type Err = ProposalError;

    /// Accepts snake_case (`investment_amount`) or camelCase (`investmentAmount`)
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = normalize_key(s);
        FIELD_NAMES
            .iter()
            .find(|(_, name)| normalize_key(name) == key)
            .map(|(field, _)| *field)
            .ok_or_else(|| ProposalError::UnknownField(s.to_string()))
    }
}

/// Coerce form text to a number: blank is zero, anything else must parse
pub fn parse_number(field: InputField, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(|_| ProposalError::InvalidNumber {
        field: field.name().to_string(),
        value: raw.to_string(),
    })
}

fn parse_flag(field: InputField, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ProposalError::InvalidFlag {
            field: field.name().to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Split a `field=value` pair
pub fn parse_assignment(edit: &str) -> Result<(InputField, &str)> {
    let (field, value) = edit
        .split_once('=')
        .ok_or_else(|| ProposalError::MalformedEdit(edit.to_string()))?;
    Ok((field.parse()?, value))
}

impl Proposal {
    /// Apply one raw edit; segment switches use the built-in defaults
    pub fn apply_edit(&mut self, field: InputField, raw: &str) -> Result<()> {
        self.apply_edit_with(field, raw, SegmentDefaults::builtin())
    }

    /// Apply one raw edit; segment switches reset from `defaults`
    pub fn apply_edit_with(&mut self, field: InputField, raw: &str, defaults: &SegmentDefaults) -> Result<()> {
        debug!("edit {} = {:?}", field, raw);

        if field == InputField::ProposalType {
            let proposal_type: ProposalType = raw.parse()?;
            self.switch_segment(proposal_type, defaults);
            return Ok(());
        }

        if !field.is_numeric() {
            match field {
                InputField::ClientName => self.client_name = raw.to_string(),
                InputField::WhatsappLink => self.contact.whatsapp_link = raw.to_string(),
                InputField::AlternativeContact => self.contact.alternative_contact = raw.to_string(),
                InputField::Testimonial => self.contact.testimonial = raw.to_string(),
                InputField::IncludeFinalCta => self.contact.include_final_cta = parse_flag(field, raw)?,
                _ => {}
            }
            return Ok(());
        }

        let value = parse_number(field, raw)?;
        let inputs = &mut self.inputs;
        match field {
            InputField::MonthlyConsumption => inputs.set_monthly_consumption(value),
            InputField::Tariff => inputs.set_tariff(value),
            InputField::CurrentBill => inputs.set_current_bill(value),
            InputField::MinimumFee => inputs.minimum_monthly_fee = value,
            InputField::InvestmentAmount => inputs.investment_amount = value,
            InputField::FinancingRate => inputs.financing_monthly_rate_pct = value,
            InputField::CardRate => inputs.card_monthly_rate_pct = value,
            InputField::PanelCount => inputs.panel_count = Some(value),
            InputField::PricePerPanel => inputs.price_per_panel = Some(value),
            InputField::EnergyReadjustment => inputs.annual_energy_readjustment_pct = value,
            InputField::BenchmarkRate => inputs.annual_benchmark_rate_pct = value,
            InputField::SavingsRate => inputs.annual_savings_rate_pct = value,
            InputField::Co2EmissionFactor => inputs.co2_emission_factor = value,
            InputField::Co2PerTree => inputs.co2_absorbed_per_tree_per_year = value,
            InputField::ClientsServed => self.contact.clients_served = value.max(0.0) as u32,
            _ => {}
        }
        Ok(())
    }

    /// Apply a sequence of `field=value` edits in order
    pub fn apply_assignments<'a, I>(&mut self, edits: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.apply_assignments_with(edits, SegmentDefaults::builtin())
    }

    /// Apply `field=value` edits in order, resetting from `defaults` on a segment switch
    pub fn apply_assignments_with<'a, I>(&mut self, edits: I, defaults: &SegmentDefaults) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for edit in edits {
            let (field, value) = parse_assignment(edit)?;
            self.apply_edit_with(field, value, defaults)?;
        }
        Ok(())
    }
}
