//! Projection engine for proposal financial and environmental figures

mod state;
mod engine;
mod result;
pub mod annuity;

pub use state::SavingsState;
pub use engine::{
    compute, ProjectionConfig, ProjectionEngine, CARD_TERM, FINANCING_TERMS, MILESTONE_YEAR, PROJECTION_YEARS,
};
pub use result::{
    ComparisonRow, Installments, InvestmentComparison, ProjectionResult, ProjectionWarning, SavingsRow,
};
pub use annuity::{future_value, installment};
