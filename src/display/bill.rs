//! Bill breakdown display

use crate::config::Settings;
use crate::services::BillCalculation;

/// Format a per-person breakdown of a single bill
pub fn format_bill(bill: &BillCalculation, settings: &Settings) -> String {
    let money = |m| settings.format_money(m);

    let names: Vec<String> = bill
        .per_person_breakdown
        .keys()
        .map(|p| settings.format_person(p))
        .collect();
    let name_width = names.iter().map(String::len).max().unwrap_or(6).max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>10}  {:>10}  {:>10}  {:>12}\n",
        "Person", "Subtotal", "Tax", "Service", "Discount", "Total",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->10}  {:->10}  {:->10}  {:->12}\n",
        "", "", "", "", "", "",
    ));

    for (name, b) in names.iter().zip(bill.per_person_breakdown.values()) {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>10}  {:>10}  {:>10}  {:>12}\n",
            name,
            money(b.subtotal),
            money(b.tax),
            money(b.service_charge),
            money(b.discount),
            money(b.total),
        ));
    }

    output.push('\n');
    output.push_str(&format!("  Subtotal:        {}\n", money(bill.subtotal)));
    output.push_str(&format!("  Tax:             {}\n", money(bill.tax)));
    output.push_str(&format!("  Service charge:  {}\n", money(bill.service_charge)));
    output.push_str(&format!("  Discount:        {}\n", money(bill.total_discount)));
    output.push_str(&format!("  Bill total:      {}\n", money(bill.amount)));

    output
}
