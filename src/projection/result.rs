//! Output structures for proposal projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monthly installments quoted on the proposal
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Installments {
    pub financing_60: f64,
    pub financing_90: f64,
    pub financing_120: f64,
    pub card_24: f64,
}

/// Value of the same money left in an alternative investment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InvestmentComparison {
    pub year_10: f64,
    pub year_25: f64,
}

/// One year of the savings schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRow {
    pub year: u32,

    /// Savings credited this year
    pub contribution: f64,

    /// Savings accumulated through this year
    pub cumulative_savings: f64,

    /// Investment amount grown at the benchmark rate
    pub benchmark_value: f64,

    /// Investment amount grown at the savings-account rate
    pub savings_account_value: f64,
}

/// Non-fatal notices raised while projecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionWarning {
    /// CO2 absorbed per tree was zero or not a number; 1 t/year was used
    TreeAbsorptionDefaulted,
}

impl fmt::Display for ProjectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionWarning::TreeAbsorptionDefaulted => {
                f.write_str("CO2 absorbed per tree is zero or missing; trees saved assumes 1 t per tree per year")
            }
        }
    }
}

/// Complete set of figures derived for a proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Date printed on the proposal (display only)
    pub proposal_date: NaiveDate,

    /// Upfront system price
    pub system_price: f64,

    pub monthly_savings: f64,
    pub annual_base_savings: f64,

    pub installments: Installments,

    /// Years until savings cover the investment; 0 when not reached within the horizon
    pub payback_years: u32,

    pub cumulative_savings_10: f64,
    pub cumulative_savings_25: f64,

    /// Cumulative savings at year 25 minus the investment (negative when never paid back)
    pub net_return_25: f64,

    /// Bond-like benchmark
    pub benchmark: InvestmentComparison,

    /// Savings account
    pub savings_account: InvestmentComparison,

    pub annual_generation_mwh: f64,

    /// Lifetime CO2 avoided (t), two decimals
    pub co2_avoided_tonnes: f64,

    pub trees_saved: i64,

    /// Cost of moving the panels to a new address (tenant proposals)
    pub relocation_cost: f64,

    /// Per-year rows, only filled for detailed projections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<SavingsRow>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ProjectionWarning>,
}

impl ProjectionResult {
    pub fn new(proposal_date: NaiveDate) -> Self {
        Self {
            proposal_date,
            system_price: 0.0,
            monthly_savings: 0.0,
            annual_base_savings: 0.0,
            installments: Installments::default(),
            payback_years: 0,
            cumulative_savings_10: 0.0,
            cumulative_savings_25: 0.0,
            net_return_25: 0.0,
            benchmark: InvestmentComparison::default(),
            savings_account: InvestmentComparison::default(),
            annual_generation_mwh: 0.0,
            co2_avoided_tonnes: 0.0,
            trees_saved: 0,
            relocation_cost: 0.0,
            schedule: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Payback year, or None when savings never cover the investment
    pub fn payback(&self) -> Option<u32> {
        (self.payback_years > 0).then_some(self.payback_years)
    }

    /// Compare numeric content, ignoring the date stamp
    pub fn same_figures(&self, other: &ProjectionResult) -> bool {
        ProjectionResult { proposal_date: other.proposal_date, ..self.clone() } == *other
    }

    /// Rows of the solar vs. alternatives comparison (10 and 25 years)
    pub fn comparison(&self) -> [ComparisonRow; 2] {
        [
            ComparisonRow {
                years: 10,
                solar: self.cumulative_savings_10,
                benchmark: self.benchmark.year_10,
                savings_account: self.savings_account.year_10,
            },
            ComparisonRow {
                years: 25,
                solar: self.cumulative_savings_25,
                benchmark: self.benchmark.year_25,
                savings_account: self.savings_account.year_25,
            },
        ]
    }
}

/// One row of the solar vs. alternatives comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub years: u32,
    pub solar: f64,
    pub benchmark: f64,
    pub savings_account: f64,
}
