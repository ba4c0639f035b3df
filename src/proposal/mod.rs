//! Proposal inputs: segment discriminator, form data, edits and loading

mod data;
mod edit;
pub mod loader;

pub use data::{ContactDetails, FinancialInputs, Proposal, ProposalType};
pub use edit::{parse_assignment, parse_number, InputField};
pub use loader::{load_proposal, load_proposal_from_reader, load_proposals, load_proposals_from_reader};
