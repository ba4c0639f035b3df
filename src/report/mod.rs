//! Plain-text rendering of a proposal
//!
//! The engine only produces numbers; this module picks the segment template
//! and formats every figure for the printed document.

mod format;
mod template;

pub use format::{format_currency, format_long_date, format_number, format_percent};
pub use template::{template_for, Kpi, ProposalTemplate, TemplateKind};

use std::fmt::{self, Write};

use crate::projection::{ProjectionResult, PROJECTION_YEARS};
use crate::proposal::Proposal;

/// Render the proposal document as text
pub fn render_text(proposal: &Proposal, result: &ProjectionResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, proposal, result);
    out
}

fn payback_text(result: &ProjectionResult) -> String {
    match result.payback() {
        Some(1) => "1 ano".to_string(),
        Some(years) => format!("{years} anos"),
        None => format!("acima de {PROJECTION_YEARS} anos"),
    }
}

fn kpi_value(kpi: Kpi, proposal: &Proposal, result: &ProjectionResult) -> String {
    match kpi {
        Kpi::Consumption => format!("{} kWh", format_number(proposal.inputs.monthly_consumption_kwh, 0)),
        Kpi::CurrentBill => format_currency(proposal.inputs.current_monthly_bill),
        Kpi::NewBill => format_currency(proposal.inputs.minimum_monthly_fee),
        Kpi::MonthlySavings => format_currency(result.monthly_savings),
        Kpi::NetReturn => format_currency(result.net_return_25),
        Kpi::Payback => payback_text(result),
        Kpi::RelocationCost => format_currency(result.relocation_cost),
        Kpi::Guarantee(text) => text.to_string(),
    }
}

fn heading<W: Write>(out: &mut W, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

/// Write the full report to any text sink
pub fn write_report<W: Write>(out: &mut W, proposal: &Proposal, result: &ProjectionResult) -> fmt::Result {
    let template = template_for(proposal.proposal_type);

    // Cover
    writeln!(out, "{} {}", template.cover_title, template.cover_subtitle)?;
    writeln!(out, "Preparada para: {}", proposal.client_name)?;
    writeln!(out, "Data: {}", format_long_date(result.proposal_date))?;

    // Hero
    heading(out, template.hero_title)?;
    writeln!(out, "{}", template.hero_subtitle)?;
    writeln!(out, "Retorno Líquido Projetado: {}", format_currency(result.net_return_25))?;

    heading(out, template.dashboard_title)?;
    for (kpi, label) in template.kpis {
        writeln!(out, "  {:<32} {}", label, kpi_value(*kpi, proposal, result))?;
    }
    if let Some(disclaimer) = template.disclaimer {
        writeln!(out, "{disclaimer}")?;
    }

    heading(out, "Investimento e Condições de Pagamento")?;
    writeln!(out, "  Valor do investimento (à vista)  {}", format_currency(result.system_price))?;
    let installments = &result.installments;
    writeln!(out, "  Financiamento em 60x             {}", format_currency(installments.financing_60))?;
    writeln!(out, "  Financiamento em 90x             {}", format_currency(installments.financing_90))?;
    writeln!(out, "  Financiamento em 120x            {}", format_currency(installments.financing_120))?;
    writeln!(out, "  Cartão de crédito em 24x         {}", format_currency(installments.card_24))?;
    writeln!(
        out,
        "  Taxas: financiamento {} a.m., cartão {} a.m.",
        format_percent(proposal.inputs.financing_monthly_rate_pct),
        format_percent(proposal.inputs.card_monthly_rate_pct),
    )?;

    heading(out, "Análise Financeira")?;
    writeln!(out, "  {:<10} {:>20} {:>20} {:>20}", "Projeção", "Energia Solar", "Tesouro/CDB", "Poupança")?;
    for row in result.comparison() {
        writeln!(
            out,
            "  {:<10} {:>20} {:>20} {:>20}",
            format!("{} anos", row.years),
            format_currency(row.solar),
            format_currency(row.benchmark),
            format_currency(row.savings_account),
        )?;
    }
    writeln!(out, "  Payback: {}", payback_text(result))?;

    if !result.schedule.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {:<5} {:>18} {:>20}", "Ano", "Economia no ano", "Economia acumulada")?;
        for row in &result.schedule {
            writeln!(
                out,
                "  {:<5} {:>18} {:>20}",
                row.year,
                format_currency(row.contribution),
                format_currency(row.cumulative_savings),
            )?;
        }
    }

    heading(out, "Impacto Ambiental")?;
    writeln!(out, "  Geração anual estimada           {} MWh", format_number(result.annual_generation_mwh, 1))?;
    writeln!(out, "  CO₂ evitado em {PROJECTION_YEARS} anos           {} t", format_number(result.co2_avoided_tonnes, 2))?;
    writeln!(out, "  Equivalente em árvores           {}", format_number(result.trees_saved as f64, 0))?;
    for warning in &result.warnings {
        writeln!(out, "  Aviso: {warning}")?;
    }

    heading(out, "Nossa Experiência")?;
    writeln!(
        out,
        "Mais de {} {} em Rondônia já otimizam seus custos conosco.",
        proposal.contact.clients_served, template.audience
    )?;
    if !proposal.contact.testimonial.is_empty() {
        writeln!(out, "{}", proposal.contact.testimonial)?;
    }

    if proposal.contact.include_final_cta {
        heading(out, "AGENDE SUA VISITA TÉCNICA")?;
        writeln!(out, "Fale com nosso especialista: {}", proposal.contact.whatsapp_link)?;
    } else {
        writeln!(out)?;
        let digits: String = proposal.contact.alternative_contact.chars().filter(char::is_ascii_digit).collect();
        writeln!(
            out,
            "Para agendar a visita ou tirar dúvidas: WhatsApp {} (https://wa.me/55{digits})",
            proposal.contact.alternative_contact
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use crate::proposal::ProposalType;
    use chrono::NaiveDate;

    fn render(proposal: &Proposal) -> String {
        let engine = ProjectionEngine::new(ProjectionConfig {
            detailed_schedule: false,
            reference_date: NaiveDate::from_ymd_opt(2026, 10, 16),
        });
        render_text(proposal, &engine.compute(&proposal.inputs))
    }

    #[test]
    fn test_business_report() {
        let mut proposal = Proposal::for_segment(ProposalType::Business);
        proposal.client_name = "Supermercado Avenida".to_string();
        let text = render(&proposal);

        assert!(text.contains("Preparada para: Supermercado Avenida"));
        assert!(text.contains("Data: 16 de outubro de 2026"));
        assert!(text.contains("Usina Fotovoltaica"));
        assert!(text.contains("R$ 3.110,00"));
        assert!(text.contains("3 anos"));
        assert!(text.contains("R$ 85.000,00"));
        assert!(text.contains("financiamento 1,89% a.m., cartão 17,90% a.m."));
        assert!(text.contains("AGENDE SUA VISITA"));
        assert!(!text.contains("Custo Médio de Mudança"));
    }

    #[test]
    fn test_renter_report_shows_relocation() {
        let proposal = Proposal::for_segment(ProposalType::ResidentialRenter);
        let text = render(&proposal);

        assert!(text.contains("Custo Médio de Mudança"));
        assert!(text.contains("R$ 1.800,00"));
        assert!(text.contains("Atenção:"));
    }

    #[test]
    fn test_alternative_contact_without_cta() {
        let mut proposal = Proposal::for_segment(ProposalType::Rural);
        proposal.contact.include_final_cta = false;
        let text = render(&proposal);

        assert!(!text.contains("AGENDE SUA VISITA"));
        assert!(text.contains("https://wa.me/5569993291920"));
    }

    #[test]
    fn test_unreached_payback_wording() {
        let mut proposal = Proposal::for_segment(ProposalType::Residential);
        proposal.inputs.investment_amount = 10_000_000.0;
        let text = render(&proposal);
        assert!(text.contains("acima de 25 anos"));
    }
}
