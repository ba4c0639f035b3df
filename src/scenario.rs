//! Scenario runner for batch and sweep projections
//!
//! Holds one configured engine and evaluates many proposals, or many
//! investment amounts for a single proposal, in parallel.

use rayon::prelude::*;

use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::proposal::{FinancialInputs, Proposal};

/// Pre-configured runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let proposals = load_proposals("data/sample_batch.csv")?;
/// let results = runner.run_batch(&proposals);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, inputs: &FinancialInputs) -> ProjectionResult {
        self.engine.compute(inputs)
    }

    /// Run projections for many proposals, preserving input order
    pub fn run_batch(&self, proposals: &[Proposal]) -> Vec<ProjectionResult> {
        proposals.par_iter().map(|p| self.engine.compute(&p.inputs)).collect()
    }

    /// Re-run one proposal at each investment amount
    pub fn sweep_investment(&self, inputs: &FinancialInputs, amounts: &[f64]) -> Vec<ProjectionResult> {
        amounts
            .par_iter()
            .map(|&amount| {
                let mut scenario = inputs.clone();
                scenario.investment_amount = amount;
                self.engine.compute(&scenario)
            })
            .collect()
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}
