//! Segment-specific copy and KPI layout
//!
//! Business owners and business tenants share one template; every other
//! segment has its own.

use crate::proposal::ProposalType;

/// Figure shown on a dashboard card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kpi {
    Consumption,
    CurrentBill,
    NewBill,
    MonthlySavings,
    NetReturn,
    Payback,
    RelocationCost,
    /// Fixed text card (performance or generation guarantee)
    Guarantee(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Business,
    Rural,
    Residential,
    Renter,
}

#[derive(Debug, Clone)]
pub struct ProposalTemplate {
    pub kind: TemplateKind,
    pub cover_title: &'static str,
    pub cover_subtitle: &'static str,
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub dashboard_title: &'static str,
    pub kpis: &'static [(Kpi, &'static str)],
    /// Plural noun used in the social proof line
    pub audience: &'static str,
    pub disclaimer: Option<&'static str>,
}

const BUSINESS: ProposalTemplate = ProposalTemplate {
    kind: TemplateKind::Business,
    cover_title: "Proposta de Investimento em",
    cover_subtitle: "Usina Fotovoltaica",
    hero_title: "TRANSFORME SEU CUSTO DE ENERGIA EM UM ATIVO ESTRATÉGICO",
    hero_subtitle: "Aumente sua margem de lucro, proteja seu caixa da inflação energética e tenha previsibilidade orçamentária pelos próximos 25 anos.",
    dashboard_title: "Dashboard Executivo: Análise de Viabilidade",
    kpis: &[
        (Kpi::CurrentBill, "Custo Operacional (Energia)"),
        (Kpi::NewBill, "Custo Pós-Investimento"),
        (Kpi::MonthlySavings, "Redução Imediata de Custo"),
        (Kpi::NetReturn, "Lucro Líquido (25 anos)"),
        (Kpi::Payback, "Payback do Investimento"),
        (Kpi::Guarantee("25 anos"), "Garantia de Performance"),
    ],
    audience: "empresas",
    disclaimer: None,
};

const RURAL: ProposalTemplate = ProposalTemplate {
    kind: TemplateKind::Rural,
    cover_title: "Proposta de Investimento em",
    cover_subtitle: "Autonomia Energética Rural",
    hero_title: "BLINDE SUA PROPRIEDADE CONTRA OS AUMENTOS E QUEDAS DE ENERGIA",
    hero_subtitle: "Aumente a margem da sua produção, proteja seu caixa da inflação energética e tenha custos previsíveis pelos próximos 25 anos.",
    dashboard_title: "Sua Propriedade em Números: Panorama Financeiro",
    kpis: &[
        (Kpi::CurrentBill, "Custo Atual com Energia"),
        (Kpi::NewBill, "Fatura Pós Investimento"),
        (Kpi::MonthlySavings, "Lucro Mensal Imediato"),
        (Kpi::NetReturn, "Lucro Líquido (25 anos)"),
        (Kpi::Payback, "Payback do Investimento"),
        (Kpi::Guarantee("25 anos"), "Garantia de Geração"),
    ],
    audience: "propriedades",
    disclaimer: None,
};

const RESIDENTIAL: ProposalTemplate = ProposalTemplate {
    kind: TemplateKind::Residential,
    cover_title: "Proposta de Autonomia e",
    cover_subtitle: "Conforto Energético",
    hero_title: "A LIBERDADE DE APROVEITAR SEU LAR SEM SE PREOCUPAR COM A CONTA DE LUZ",
    hero_subtitle: "Ligue os ares-condicionados, aqueça a piscina e aproveite cada momento. A energia? Deixa que o sol paga.",
    dashboard_title: "Raio-X do Seu Novo Estilo de Vida",
    kpis: &[
        (Kpi::Consumption, "Consumo Médio Mensal"),
        (Kpi::CurrentBill, "Sua Conta de Luz Atual"),
        (Kpi::NewBill, "Nova Conta de Luz"),
        (Kpi::MonthlySavings, "Economia Mensal Imediata"),
    ],
    audience: "famílias",
    disclaimer: None,
};

const RENTER: ProposalTemplate = ProposalTemplate {
    kind: TemplateKind::Renter,
    cover_title: "Estudo Preliminar de Economia",
    cover_subtitle: "para Inquilinos",
    hero_title: "SUA PRÓPRIA USINA DE ENERGIA, ONDE QUER QUE VOCÊ MORE",
    hero_subtitle: "A economia que acompanha você a cada mudança, mesmo morando de aluguel.",
    dashboard_title: "Dashboard de Viabilidade",
    kpis: &[
        (Kpi::CurrentBill, "Sua Conta Atual"),
        (Kpi::NewBill, "Sua Nova Conta"),
        (Kpi::MonthlySavings, "Economia no Bolso"),
        (Kpi::NetReturn, "Lucro Líquido (25 anos)"),
        (Kpi::Payback, "Payback do Ativo"),
        (Kpi::RelocationCost, "Custo Médio de Mudança"),
    ],
    audience: "famílias",
    disclaimer: Some(
        "Atenção: estes números são uma estimativa inicial. A proposta oficial com garantia de economia é formalizada após a visita técnica.",
    ),
};

/// Template used to present a proposal of the given segment
pub fn template_for(proposal_type: ProposalType) -> &'static ProposalTemplate {
    match proposal_type {
        ProposalType::Business | ProposalType::BusinessRenter => &BUSINESS,
        ProposalType::Rural => &RURAL,
        ProposalType::Residential => &RESIDENTIAL,
        ProposalType::ResidentialRenter => &RENTER,
    }
}

impl ProposalTemplate {
    pub fn shows(&self, kpi: Kpi) -> bool {
        self.kpis.iter().any(|(k, _)| *k == kpi)
    }
}
