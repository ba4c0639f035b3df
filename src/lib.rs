//! Solar Proposal - financial projection engine for solar-energy sales proposals
//!
//! This library provides:
//! - Proposal inputs for five customer segments with built-in defaults
//! - Field edits with the bill/consumption/tariff coupling of the proposal form
//! - Installment, payback, 10/25-year comparison and environmental figures
//! - pt-BR text rendering of the finished proposal
//! - Parallel batch and investment-sweep runs

pub mod error;
pub mod proposal;
pub mod defaults;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProposalError, Result};
pub use proposal::{FinancialInputs, InputField, Proposal, ProposalType};
pub use defaults::SegmentDefaults;
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use report::render_text;
pub use scenario::ScenarioRunner;
