//! Default proposal inputs per customer segment
//!
//! The built-in table is created once and shared; every lookup hands out an
//! owned copy that the caller is free to edit.

pub mod loader;

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::Result;
use crate::proposal::{ContactDetails, FinancialInputs, Proposal, ProposalType};

pub use loader::DEFAULT_SEGMENTS_PATH;

const WHATSAPP_LINK: &str = "https://wa.me/5569993291920";
const ALTERNATIVE_CONTACT: &str = "69 99329-1920";

/// Default proposal record for each segment
#[derive(Debug, Clone)]
pub struct SegmentDefaults {
    segments: HashMap<ProposalType, Proposal>,
}

impl SegmentDefaults {
    /// Shared built-in table
    pub fn builtin() -> &'static SegmentDefaults {
        static BUILTIN: OnceLock<SegmentDefaults> = OnceLock::new();
        BUILTIN.get_or_init(Self::default_table)
    }

    /// Built-in values, as quoted to customers in Rondônia
    pub fn default_table() -> Self {
        let segments = ProposalType::ALL
            .iter()
            .map(|&t| (t, builtin_proposal(t)))
            .collect();
        Self { segments }
    }

    /// Load the table from CSV files in the default location (data/segment_defaults.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_SEGMENTS_PATH))
    }

    /// Load the table from a CSV file; segments missing from the file keep built-in values
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut table = Self::default_table();
        for proposal in loader::load_segment_rows(path)? {
            table.insert(proposal);
        }
        Ok(table)
    }

    /// Replace the record of the proposal's segment
    pub fn insert(&mut self, proposal: Proposal) {
        self.segments.insert(proposal.proposal_type, proposal);
    }

    /// Fresh proposal for a segment, with the bill recomputed from consumption and tariff
    pub fn proposal(&self, proposal_type: ProposalType) -> Proposal {
        let mut proposal = self
            .segments
            .get(&proposal_type)
            .cloned()
            .unwrap_or_else(|| builtin_proposal(proposal_type));
        proposal.inputs.current_monthly_bill = proposal.inputs.estimated_bill();
        proposal
    }

    /// Raw stored record, without the bill recomputation
    pub fn get(&self, proposal_type: ProposalType) -> Option<&Proposal> {
        self.segments.get(&proposal_type)
    }
}

impl Default for SegmentDefaults {
    fn default() -> Self {
        Self::default_table()
    }
}

/// Market parameters shared by every segment
fn base_inputs() -> FinancialInputs {
    FinancialInputs {
        tariff_per_kwh: 0.96,
        financing_monthly_rate_pct: 1.89,
        card_monthly_rate_pct: 17.90,
        annual_energy_readjustment_pct: 6.0,
        annual_benchmark_rate_pct: 10.0,
        annual_savings_rate_pct: 6.0,
        co2_emission_factor: 0.038,
        co2_absorbed_per_tree_per_year: 0.022,
        ..Default::default()
    }
}

fn contact(clients_served: u32, testimonial: &str) -> ContactDetails {
    ContactDetails {
        whatsapp_link: WHATSAPP_LINK.to_string(),
        alternative_contact: ALTERNATIVE_CONTACT.to_string(),
        clients_served,
        testimonial: testimonial.to_string(),
        include_final_cta: true,
    }
}

fn builtin_proposal(proposal_type: ProposalType) -> Proposal {
    let mut inputs = base_inputs();
    let (client_name, clients_served, testimonial) = match proposal_type {
        ProposalType::Business => {
            inputs.monthly_consumption_kwh = 3500.0;
            inputs.current_monthly_bill = 3360.0;
            inputs.minimum_monthly_fee = 250.0;
            inputs.investment_amount = 85000.0;
            (
                "[Nome da Empresa]",
                22,
                "\"O investimento na usina solar foi a melhor decisão estratégica que tomamos. Reduzimos um custo enorme, o que nos deu fôlego para expandir a operação.\" - Diretor, Supermercado",
            )
        }
        ProposalType::BusinessRenter => {
            inputs.monthly_consumption_kwh = 3500.0;
            inputs.current_monthly_bill = 3360.0;
            inputs.minimum_monthly_fee = 250.0;
            inputs.investment_amount = 85000.0;
            (
                "[Nome da Empresa Inquilina]",
                22,
                "\"Como inquilinos, sempre hesitamos em fazer grandes investimentos no imóvel. A GTECH nos mostrou que a usina solar é um ativo nosso, que podemos levar conosco.\" - Sócio-Diretor, Indústria",
            )
        }
        ProposalType::Residential => {
            inputs.monthly_consumption_kwh = 1800.0;
            inputs.current_monthly_bill = 1728.0;
            inputs.minimum_monthly_fee = 120.0;
            inputs.investment_amount = 45000.0;
            (
                "[Nome do Cliente]",
                85,
                "\"Nossa casa é outra depois da GTEC. Usamos os ares-condicionados sem peso na consciência... A paz de viver sem se assustar com a conta de luz não tem preço.\" - Cliente, Porto Velho",
            )
        }
        ProposalType::ResidentialRenter => {
            inputs.monthly_consumption_kwh = 800.0;
            inputs.current_monthly_bill = 768.0;
            inputs.minimum_monthly_fee = 150.0;
            inputs.investment_amount = 16632.0;
            inputs.panel_count = Some(12.0);
            inputs.price_per_panel = Some(150.0);
            inputs.annual_benchmark_rate_pct = 10.5;
            inputs.annual_savings_rate_pct = 6.17;
            (
                "[Nome do Inquilino]",
                47,
                "\"Eu achava que, por morar de aluguel, estava refém da conta de luz. A equipe mudou isso. Comprei minha usina, e na minha última mudança, eles cuidaram de todo o processo.\" - Marcos R., Inquilino",
            )
        }
        ProposalType::Rural => {
            inputs.monthly_consumption_kwh = 3500.0;
            inputs.current_monthly_bill = 3360.0;
            inputs.minimum_monthly_fee = 250.0;
            inputs.investment_amount = 85000.0;
            (
                "[Nome do Cliente / Propriedade]",
                27,
                "\"Depois que o resfriador de leite parou por falta de energia e quase perdi a produção do dia, decidi investir. Hoje, não tenho mais essa dor de cabeça.\" - José da Silva, Produtor de Leite",
            )
        }
    };

    Proposal {
        proposal_type,
        client_name: client_name.to_string(),
        inputs,
        contact: contact(clients_served, testimonial),
    }
}
