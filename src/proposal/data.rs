//! Proposal data structures matching the proposal editor form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::defaults::SegmentDefaults;
use crate::error::ProposalError;

/// Customer segment a proposal is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProposalType {
    /// Business that owns its premises
    #[default]
    Business,
    /// Business renting its premises
    BusinessRenter,
    /// Home owner
    Residential,
    /// Home tenant (panels move with the customer)
    ResidentialRenter,
    /// Farm or rural property
    Rural,
}

impl ProposalType {
    pub const ALL: [ProposalType; 5] = [
        ProposalType::Business,
        ProposalType::BusinessRenter,
        ProposalType::Residential,
        ProposalType::ResidentialRenter,
        ProposalType::Rural,
    ];

    /// Variant name, as used in JSON and CSV files
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalType::Business => "Business",
            ProposalType::BusinessRenter => "BusinessRenter",
            ProposalType::Residential => "Residential",
            ProposalType::ResidentialRenter => "ResidentialRenter",
            ProposalType::Rural => "Rural",
        }
    }

    /// Whether the customer rents the property the system is installed on
    pub fn is_renter(&self) -> bool {
        matches!(self, ProposalType::BusinessRenter | ProposalType::ResidentialRenter)
    }
}

impl fmt::Display for ProposalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalType {
    type Err = ProposalError;

    /// Accepts `BusinessRenter`, `business_renter` or `business-renter`, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        ProposalType::ALL
            .iter()
            .copied()
            .find(|t| normalize_key(t.as_str()) == key)
            .ok_or_else(|| ProposalError::UnknownSegment(s.to_string()))
    }
}

impl TryFrom<String> for ProposalType {
    type Error = ProposalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lowercase and strip separators so `fooBar`, `foo_bar` and `foo-bar` compare equal
pub(crate) fn normalize_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Commercial and environmental inputs consumed by the projection engine
///
/// Every numeric field defaults to zero when absent. Values may arrive as
/// numbers, numeric strings or blanks; blanks count as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialInputs {
    /// Average monthly energy consumption (kWh)
    #[serde(deserialize_with = "lenient::number")]
    pub monthly_consumption_kwh: f64,

    /// Energy tariff (currency per kWh)
    #[serde(deserialize_with = "lenient::number")]
    pub tariff_per_kwh: f64,

    /// Current monthly electricity bill
    #[serde(deserialize_with = "lenient::number")]
    pub current_monthly_bill: f64,

    /// Fixed utility fee still charged after installation
    #[serde(deserialize_with = "lenient::number")]
    pub minimum_monthly_fee: f64,

    /// Upfront system price
    #[serde(deserialize_with = "lenient::number")]
    pub investment_amount: f64,

    /// Monthly financing interest rate (percent)
    #[serde(deserialize_with = "lenient::number")]
    pub financing_monthly_rate_pct: f64,

    /// Monthly credit card interest rate (percent)
    #[serde(deserialize_with = "lenient::number")]
    pub card_monthly_rate_pct: f64,

    /// Number of panels, used for the tenant relocation estimate
    #[serde(deserialize_with = "lenient::optional_number", skip_serializing_if = "Option::is_none")]
    pub panel_count: Option<f64>,

    /// Cost to move one panel
    #[serde(deserialize_with = "lenient::optional_number", skip_serializing_if = "Option::is_none")]
    pub price_per_panel: Option<f64>,

    /// Annual energy tariff readjustment (percent)
    #[serde(deserialize_with = "lenient::number")]
    pub annual_energy_readjustment_pct: f64,

    /// Annual yield of the bond-like benchmark (percent)
    #[serde(deserialize_with = "lenient::number")]
    pub annual_benchmark_rate_pct: f64,

    /// Annual yield of a savings account (percent)
    #[serde(deserialize_with = "lenient::number")]
    pub annual_savings_rate_pct: f64,

    /// Grid emission factor (t CO2 per MWh)
    #[serde(deserialize_with = "lenient::number")]
    pub co2_emission_factor: f64,

    /// CO2 absorbed by one tree in a year (t)
    #[serde(deserialize_with = "lenient::number")]
    pub co2_absorbed_per_tree_per_year: f64,
}

impl FinancialInputs {
    /// Bill implied by consumption and tariff
    pub fn estimated_bill(&self) -> f64 {
        self.monthly_consumption_kwh * self.tariff_per_kwh
    }

    /// Set consumption; the bill follows as consumption x tariff
    pub fn set_monthly_consumption(&mut self, kwh: f64) {
        self.monthly_consumption_kwh = kwh;
        self.current_monthly_bill = self.estimated_bill();
    }

    /// Set tariff; the bill follows as consumption x tariff
    pub fn set_tariff(&mut self, tariff: f64) {
        self.tariff_per_kwh = tariff;
        self.current_monthly_bill = self.estimated_bill();
    }

    /// Set the bill directly and back-solve consumption when the tariff is positive
    pub fn set_current_bill(&mut self, bill: f64) {
        self.current_monthly_bill = bill;
        if self.tariff_per_kwh > 0.0 {
            self.monthly_consumption_kwh = bill / self.tariff_per_kwh;
        }
    }
}

/// Contact and marketing options printed on the proposal
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub whatsapp_link: String,

    /// Phone number shown when the call-to-action section is left out
    pub alternative_contact: String,

    /// Number of customers already served in this segment
    pub clients_served: u32,

    pub testimonial: String,

    /// Include the "schedule a visit" section with QR link
    pub include_final_cta: bool,
}

/// A complete proposal as edited by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(default)]
    pub proposal_type: ProposalType,

    #[serde(default)]
    pub client_name: String,

    #[serde(flatten)]
    pub inputs: FinancialInputs,

    #[serde(flatten)]
    pub contact: ContactDetails,
}

impl Proposal {
    /// Fresh proposal for a segment, seeded from the built-in defaults
    pub fn for_segment(proposal_type: ProposalType) -> Self {
        SegmentDefaults::builtin().proposal(proposal_type)
    }

    /// Replace the whole proposal by the defaults of another segment
    pub fn switch_segment(&mut self, proposal_type: ProposalType, defaults: &SegmentDefaults) {
        *self = defaults.proposal(proposal_type);
    }
}

/// Tolerant number decoding for form-like inputs
pub(crate) mod lenient {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use std::fmt;

    struct NumberVisitor;

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string or a blank value")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(NumberVisitor)
        }
    }

    /// Number where blank or null means zero
    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(d.deserialize_any(NumberVisitor)?.unwrap_or(0.0))
    }

    /// Number where blank or null means absent
    pub fn optional_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        d.deserialize_any(NumberVisitor)
    }
}
