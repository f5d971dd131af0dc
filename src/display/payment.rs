//! Payment display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Payment;

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    description: String,
}

/// Format recorded payments as a table
pub fn format_payment_list(payments: &[Payment], settings: &Settings) -> String {
    if payments.is_empty() {
        return "No payments recorded.".to_string();
    }

    let rows = payments.iter().map(|p| PaymentRow {
        id: p.id.to_string(),
        date: p.paid_at.format("%Y-%m-%d").to_string(),
        from: settings.format_person(&p.from),
        to: settings.format_person(&p.to),
        amount: settings.format_money(p.amount),
        description: p.description.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}
