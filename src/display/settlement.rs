//! Settlement report display

use crate::config::Settings;
use crate::models::SettlementReport;

/// Format balances and the payments that settle them
pub fn format_settlement_report(report: &SettlementReport, settings: &Settings) -> String {
    if report.individual_balances.is_empty() {
        return "No expenses recorded. Nothing to settle.".to_string();
    }

    let names: Vec<String> = report
        .individual_balances
        .keys()
        .map(|p| settings.format_person(p))
        .collect();
    let name_width = names.iter().map(String::len).max().unwrap_or(6).max(6);

    let mut output = String::from("Balances:\n");
    for (name, balance) in names.iter().zip(report.individual_balances.values()) {
        let status = if balance.is_positive() {
            "gets back"
        } else if balance.is_negative() {
            "owes"
        } else {
            "settled"
        };
        output.push_str(&format!(
            "  {:<name_width$}  {:>12}  {}\n",
            name,
            settings.format_money(*balance),
            status,
        ));
    }

    output.push('\n');
    if report.is_settled() {
        output.push_str("Everyone is settled up.\n");
        return output;
    }

    output.push_str("Settlements:\n");
    for s in &report.settlements {
        output.push_str(&format!(
            "  {} pays {} {}\n",
            settings.format_person(&s.from),
            settings.format_person(&s.to),
            settings.format_money(s.amount),
        ));
    }

    output
}
