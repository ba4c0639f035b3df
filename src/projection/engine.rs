//! Core projection engine for proposal financial and environmental figures

use chrono::{Local, NaiveDate};
use log::{debug, warn};

use super::annuity::{future_value, installment, pct_to_rate};
use super::result::{Installments, InvestmentComparison, ProjectionResult, ProjectionWarning, SavingsRow};
use super::state::SavingsState;
use crate::proposal::FinancialInputs;

/// Projection horizon in years (panel lifetime)
pub const PROJECTION_YEARS: u32 = 25;

/// Intermediate year reported alongside the full horizon
pub const MILESTONE_YEAR: u32 = 10;

/// Financing terms quoted, in months
pub const FINANCING_TERMS: [u32; 3] = [60, 90, 120];

/// Credit card term, in months
pub const CARD_TERM: u32 = 24;

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Fill the per-year savings schedule
    pub detailed_schedule: bool,

    /// Date stamped on the result; today's local date when None
    pub reference_date: Option<NaiveDate>,
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Derive every proposal figure from one input snapshot
    pub fn compute(&self, inputs: &FinancialInputs) -> ProjectionResult {
        let date = self
            .config
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let mut result = ProjectionResult::new(date);

        let price = inputs.investment_amount;
        result.system_price = price;
        result.monthly_savings = (inputs.current_monthly_bill - inputs.minimum_monthly_fee).max(0.0);
        result.annual_base_savings = result.monthly_savings * 12.0;

        result.installments = self.calculate_installments(inputs);
        self.accumulate_savings(inputs, &mut result);
        result.net_return_25 = result.cumulative_savings_25 - price;

        let benchmark_rate = pct_to_rate(inputs.annual_benchmark_rate_pct);
        let savings_rate = pct_to_rate(inputs.annual_savings_rate_pct);
        result.benchmark = InvestmentComparison {
            year_10: future_value(price, benchmark_rate, MILESTONE_YEAR),
            year_25: future_value(price, benchmark_rate, PROJECTION_YEARS),
        };
        result.savings_account = InvestmentComparison {
            year_10: future_value(price, savings_rate, MILESTONE_YEAR),
            year_25: future_value(price, savings_rate, PROJECTION_YEARS),
        };

        self.calculate_environment(inputs, &mut result);

        result.relocation_cost = inputs.panel_count.unwrap_or(0.0) * inputs.price_per_panel.unwrap_or(0.0);

        debug!(
            "projected price={:.2} monthly_savings={:.2} payback={} net_return={:.2}",
            price, result.monthly_savings, result.payback_years, result.net_return_25
        );

        result
    }

    fn calculate_installments(&self, inputs: &FinancialInputs) -> Installments {
        let price = inputs.investment_amount;
        let financing_rate = pct_to_rate(inputs.financing_monthly_rate_pct);
        let card_rate = pct_to_rate(inputs.card_monthly_rate_pct);
        let [short, medium, long] = FINANCING_TERMS;

        Installments {
            financing_60: installment(price, financing_rate, short),
            financing_90: installment(price, financing_rate, medium),
            financing_120: installment(price, financing_rate, long),
            card_24: installment(price, card_rate, CARD_TERM),
        }
    }

    /// Step through the horizon recording milestones and the payback year
    fn accumulate_savings(&self, inputs: &FinancialInputs, result: &mut ProjectionResult) {
        let price = inputs.investment_amount;
        let growth = pct_to_rate(inputs.annual_energy_readjustment_pct);
        let benchmark_rate = pct_to_rate(inputs.annual_benchmark_rate_pct);
        let savings_rate = pct_to_rate(inputs.annual_savings_rate_pct);

        let mut state = SavingsState::new(result.annual_base_savings, growth, price);

        for _year in 1..=PROJECTION_YEARS {
            state.advance_year();

            if state.year == MILESTONE_YEAR {
                result.cumulative_savings_10 = state.cumulative;
            }

            if self.config.detailed_schedule {
                result.schedule.push(SavingsRow {
                    year: state.year,
                    contribution: state.contribution,
                    cumulative_savings: state.cumulative,
                    benchmark_value: future_value(price, benchmark_rate, state.year),
                    savings_account_value: future_value(price, savings_rate, state.year),
                });
            }
        }

        result.cumulative_savings_25 = state.cumulative;
        result.payback_years = state.payback_year;
    }

    /// Generation, CO2 avoided and equivalent trees over the horizon
    fn calculate_environment(&self, inputs: &FinancialInputs, result: &mut ProjectionResult) {
        result.annual_generation_mwh = inputs.monthly_consumption_kwh * 12.0 / 1000.0;

        let co2_avoided = result.annual_generation_mwh * inputs.co2_emission_factor * PROJECTION_YEARS as f64;
        result.co2_avoided_tonnes = (co2_avoided * 100.0).round() / 100.0;

        let per_tree = inputs.co2_absorbed_per_tree_per_year;
        // Only a zero or missing divisor falls back; negatives divide as given
        let per_tree = if per_tree != 0.0 && !per_tree.is_nan() {
            per_tree
        } else {
            warn!("CO2 absorbed per tree is {per_tree}; assuming 1 t/year for trees saved");
            result.warnings.push(ProjectionWarning::TreeAbsorptionDefaulted);
            1.0
        };
        // Trees use the unrounded CO2 figure
        result.trees_saved = (co2_avoided / per_tree).round() as i64;
    }
}

/// Compute a result with the default configuration
pub fn compute(inputs: &FinancialInputs) -> ProjectionResult {
    ProjectionEngine::default().compute(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::{Proposal, ProposalType};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig {
            detailed_schedule: true,
            reference_date: NaiveDate::from_ymd_opt(2026, 10, 16),
        })
    }

    fn business_inputs() -> FinancialInputs {
        Proposal::for_segment(ProposalType::Business).inputs
    }

    #[test]
    fn test_business_defaults() {
        // investment 85000, bill 3360, fee 250
        let result = engine().compute(&business_inputs());

        assert_eq!(result.system_price, 85000.0);
        assert_abs_diff_eq!(result.monthly_savings, 3110.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.annual_base_savings, 37320.0, epsilon = 1e-9);
        assert_eq!(result.payback_years, 3);
        assert_eq!(result.payback(), Some(3));

        let g = 1.06_f64;
        assert_relative_eq!(result.cumulative_savings_10, 37320.0 * (g.powi(10) - 1.0) / 0.06, max_relative = 1e-10);
        assert_relative_eq!(result.cumulative_savings_25, 37320.0 * (g.powi(25) - 1.0) / 0.06, max_relative = 1e-10);
        assert_abs_diff_eq!(result.cumulative_savings_10, 491907.27, epsilon = 0.01);

        assert_abs_diff_eq!(result.benchmark.year_10, 220468.11, epsilon = 0.01);
        assert_abs_diff_eq!(result.benchmark.year_25, 920950.01, epsilon = 0.01);
        assert_abs_diff_eq!(result.savings_account.year_10, 152222.05, epsilon = 0.01);
        assert_abs_diff_eq!(result.savings_account.year_25, 364809.01, epsilon = 0.01);

        assert_abs_diff_eq!(result.installments.financing_60, 2380.59, epsilon = 0.01);
        assert_abs_diff_eq!(result.installments.financing_120, 1796.44, epsilon = 0.01);

        assert_abs_diff_eq!(result.annual_generation_mwh, 42.0, epsilon = 1e-9);
        assert_eq!(result.co2_avoided_tonnes, 39.9);
        assert_eq!(result.trees_saved, 1814);
        assert_eq!(result.relocation_cost, 0.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_tenant_defaults() {
        let inputs = Proposal::for_segment(ProposalType::ResidentialRenter).inputs;
        let result = engine().compute(&inputs);

        assert_abs_diff_eq!(result.monthly_savings, 618.0, epsilon = 1e-9);
        assert_eq!(result.payback_years, 3);
        assert_abs_diff_eq!(result.installments.financing_60, 465.81, epsilon = 0.01);
        assert_abs_diff_eq!(result.installments.financing_90, 385.90, epsilon = 0.01);
        assert_abs_diff_eq!(result.installments.card_24, 3035.46, epsilon = 0.01);
        assert_eq!(result.relocation_cost, 1800.0);
        assert_eq!(result.co2_avoided_tonnes, 9.12);
        assert_eq!(result.trees_saved, 415);
    }

    #[test]
    fn test_bill_below_fee_saves_nothing() {
        let inputs = FinancialInputs {
            current_monthly_bill: 100.0,
            minimum_monthly_fee: 250.0,
            investment_amount: 10000.0,
            ..Default::default()
        };
        let result = compute(&inputs);

        assert_eq!(result.monthly_savings, 0.0);
        assert_eq!(result.cumulative_savings_25, 0.0);
        assert_eq!(result.payback_years, 0);
        assert_eq!(result.payback(), None);
        assert_eq!(result.net_return_25, -10000.0);
    }

    #[test]
    fn test_flat_tariff_accumulates_linearly() {
        // annual savings 1608, no readjustment, investment 45000
        let inputs = FinancialInputs {
            current_monthly_bill: 134.0,
            investment_amount: 45000.0,
            ..Default::default()
        };
        let result = engine().compute(&inputs);

        assert_abs_diff_eq!(result.annual_base_savings, 1608.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.cumulative_savings_10, 16080.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.cumulative_savings_25, 40200.0, epsilon = 1e-6);
        for row in &result.schedule {
            assert_eq!(row.contribution, 1608.0);
            assert_abs_diff_eq!(row.cumulative_savings, 1608.0 * row.year as f64, epsilon = 1e-6);
        }
        assert_eq!(result.payback_years, 0);
        assert_abs_diff_eq!(result.net_return_25, -4800.0, epsilon = 1e-6);
    }

    #[test]
    fn test_net_return_is_exact_difference() {
        for investment in [0.0, 1000.0, 85000.0, 5_000_000.0] {
            let inputs = FinancialInputs { investment_amount: investment, ..business_inputs() };
            let result = compute(&inputs);
            assert_eq!(result.net_return_25, result.cumulative_savings_25 - investment);
        }
    }

    #[test]
    fn test_payback_monotonic_in_investment() {
        let mut previous = 1;
        let mut reached_never = false;
        for step in 0..300 {
            let investment = step as f64 * 10_000.0;
            let inputs = FinancialInputs { investment_amount: investment, ..business_inputs() };
            let payback = compute(&inputs).payback_years;

            if payback == 0 {
                reached_never = true;
            } else {
                assert!(!reached_never, "payback came back after being unreachable");
                assert!(payback >= previous, "investment {investment}: {payback} < {previous}");
                previous = payback;
            }
        }
        assert!(reached_never);
    }

    #[test]
    fn test_milestone_not_above_horizon_total() {
        for readjustment in [0.0, 2.5, 6.0, 15.0] {
            let inputs = FinancialInputs {
                annual_energy_readjustment_pct: readjustment,
                ..business_inputs()
            };
            let result = compute(&inputs);
            assert!(result.cumulative_savings_10 <= result.cumulative_savings_25);
        }
    }

    #[test]
    fn test_schedule_matches_totals() {
        let result = engine().compute(&business_inputs());

        assert_eq!(result.schedule.len(), PROJECTION_YEARS as usize);
        assert_eq!(result.schedule[9].cumulative_savings, result.cumulative_savings_10);
        assert_eq!(result.schedule[24].cumulative_savings, result.cumulative_savings_25);
        assert_abs_diff_eq!(result.schedule[9].benchmark_value, result.benchmark.year_10, epsilon = 1e-6);

        let summary_only = compute(&business_inputs());
        assert!(summary_only.schedule.is_empty());
    }

    #[test]
    fn test_zero_tree_absorption_falls_back_with_warning() {
        let inputs = FinancialInputs {
            co2_absorbed_per_tree_per_year: 0.0,
            ..business_inputs()
        };
        let result = compute(&inputs);

        assert_eq!(result.trees_saved, 40); // 39.9 t / 1 t per tree
        assert_eq!(result.warnings, vec![ProjectionWarning::TreeAbsorptionDefaulted]);

        let nan = FinancialInputs {
            co2_absorbed_per_tree_per_year: f64::NAN,
            ..business_inputs()
        };
        assert_eq!(compute(&nan).trees_saved, 40);
    }

    #[test]
    fn test_negative_tree_absorption_divides_as_given() {
        let inputs = FinancialInputs {
            co2_absorbed_per_tree_per_year: -0.022,
            ..business_inputs()
        };
        let result = compute(&inputs);

        assert_eq!(result.trees_saved, -1814);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_all_zero_inputs() {
        let result = compute(&FinancialInputs::default());

        assert_eq!(result.monthly_savings, 0.0);
        assert_eq!(result.installments.financing_60, 0.0);
        assert_eq!(result.installments.card_24, 0.0);
        // Nothing to recover, so the first year already pays back
        assert_eq!(result.payback_years, 1);
        assert_eq!(result.trees_saved, 0);
        assert_eq!(result.relocation_cost, 0.0);
    }

    #[test]
    fn test_tiny_financing_rate_gives_finite_installments() {
        let inputs = FinancialInputs {
            financing_monthly_rate_pct: 1e-15,
            ..business_inputs()
        };
        let installments = compute(&inputs).installments;

        assert!(installments.financing_60.is_finite());
        assert_relative_eq!(installments.financing_60, 85000.0 / 60.0, max_relative = 1e-9);
        assert_relative_eq!(installments.financing_120, 85000.0 / 120.0, max_relative = 1e-9);
    }

    #[test]
    fn test_negative_rates_do_not_fail() {
        let inputs = FinancialInputs {
            financing_monthly_rate_pct: -1.0,
            annual_energy_readjustment_pct: -5.0,
            annual_benchmark_rate_pct: -2.0,
            ..business_inputs()
        };
        let result = compute(&inputs);

        assert_eq!(result.installments.financing_60, 85000.0 / 60.0);
        assert!(result.cumulative_savings_25.is_finite());
        assert!(result.benchmark.year_25 < 85000.0);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let first = engine().compute(&business_inputs());
        let second = engine().compute(&business_inputs());
        assert_eq!(first, second);

        let mut detailed_today = ProjectionEngine::new(ProjectionConfig {
            detailed_schedule: true,
            reference_date: None,
        })
        .compute(&business_inputs());
        assert!(detailed_today.same_figures(&first));
        detailed_today.trees_saved += 1;
        assert!(!detailed_today.same_figures(&first));
    }
}
