//! Per-contact aggregation, classification, and credit-term derivation
//!
//! Stages 3-5 of the pipeline: group scored invoices by contact, classify
//! each contact against the population, and derive the revised terms.

use std::collections::BTreeMap;

use serde::Serialize;

use super::pipeline::ScoredInvoice;
use super::stats::{quantile, round2};
use crate::config::PolicyConfig;

/// Risk tier assigned to a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Normal,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Normal => "Normal",
        }
    }
}

/// One output row per distinct contact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactAggregate {
    pub contact: String,
    /// Sum of paid invoice totals
    pub total_invoice_amount: f64,
    /// Sum of per-invoice cost-of-capital losses from late payment
    pub late_impact_amount: f64,
    /// Number of invoices paid after their due date
    pub delay_count: u32,
    /// Contact sits in the configured top fraction by invoice volume
    pub high_value: bool,
    /// Late impact as a percentage of the largest late impact observed
    pub relative_impact_pct: f64,
    pub late_fee_applicable: bool,
    /// Days removed from the baseline credit term
    pub term_reduction_days: u32,
    pub revised_credit_term_days: u32,
    pub risk_level: RiskLevel,
    pub reminder_schedule: String,
}

#[derive(Default)]
struct ContactGroup {
    total: f64,
    impact: f64,
    delays: u32,
}

/// Stages 3-5 over scored invoices. Output is sorted by contact so a given
/// input always produces the same table.
pub(crate) fn aggregate_contacts(
    invoices: &[ScoredInvoice],
    config: &PolicyConfig,
) -> Vec<ContactAggregate> {
    // Stage 3: group by contact
    let mut groups: BTreeMap<&str, ContactGroup> = BTreeMap::new();
    for invoice in invoices {
        let group = groups.entry(invoice.contact.as_str()).or_default();
        group.total += invoice.invoice_total;
        group.impact += invoice.late_impact;
        if invoice.is_late {
            group.delays += 1;
        }
    }

    // Stage 4 thresholds need the whole population before any row is classified
    let totals: Vec<f64> = groups.values().map(|g| g.total).collect();
    let high_value_threshold =
        quantile(&totals, 1.0 - config.top_value_fraction).unwrap_or(0.0);
    let max_impact = groups.values().map(|g| g.impact).fold(0.0_f64, f64::max);

    groups
        .into_iter()
        .map(|(contact, group)| {
            // Stage 4: classification. Contacts exactly at the volume
            // threshold count as high-value.
            let high_value = group.total >= high_value_threshold;
            let relative_impact_pct = if max_impact > 0.0 {
                round2(100.0 * group.impact / max_impact)
            } else {
                0.0
            };
            let late_fee_applicable = group.delays > 1;

            // Stage 5: policy derivation
            let (term_reduction_days, revised_credit_term_days) =
                derive_terms(relative_impact_pct, group.delays, config.credit_term_days);
            let risk_level = if !high_value && group.delays > 0 {
                RiskLevel::High
            } else {
                RiskLevel::Normal
            };
            // Kept as an independent condition rather than reusing risk_level
            let reminder_schedule = if risk_level == RiskLevel::High && !high_value {
                config.intense_schedule_label.clone()
            } else {
                config.normal_schedule_label.clone()
            };

            ContactAggregate {
                contact: contact.to_string(),
                total_invoice_amount: group.total,
                late_impact_amount: group.impact,
                delay_count: group.delays,
                high_value,
                relative_impact_pct,
                late_fee_applicable,
                term_reduction_days,
                revised_credit_term_days,
                risk_level,
                reminder_schedule,
            }
        })
        .collect()
}

/// Raw reduction is `relative_impact_pct * delay_count / 100` days, rounded
/// up to the next multiple of 5, then capped at the full credit term.
fn derive_terms(relative_impact_pct: f64, delay_count: u32, credit_term_days: u32) -> (u32, u32) {
    let raw = relative_impact_pct * delay_count as f64 / 100.0;
    let stepped = ((raw / 5.0).ceil() * 5.0) as u32;
    let reduction = stepped.min(credit_term_days);
    (reduction, credit_term_days - reduction)
}
