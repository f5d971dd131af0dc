//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Expense, ExpenseSplit, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Paid by")]
    paid_by: String,
    #[tabled(rename = "Split")]
    split: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a trip's expenses as a table
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.created_at.format("%Y-%m-%d").to_string(),
        description: e.description.clone(),
        paid_by: settings.format_person(&e.paid_by),
        split: match &e.split {
            ExpenseSplit::Equal { split_among, .. } => format!("equal/{}", split_among.len()),
            ExpenseSplit::Itemized { items } => format!("{} items", items.len()),
        },
        amount: settings.format_money(e.amount()),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());

    let total: Money = expenses.iter().map(Expense::amount).sum();
    format!("{}\n\nTotal: {}\n", table, settings.format_money(total))
}

/// Format a single expense with its lines
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let money = |m| settings.format_money(m);
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.description));
    output.push_str(&format!("  ID:        {}\n", expense.id));
    output.push_str(&format!("  Paid by:   {}\n", settings.format_person(&expense.paid_by)));

    match &expense.split {
        ExpenseSplit::Equal { split_among, .. } => {
            let names: Vec<String> = split_among.iter().map(|p| settings.format_person(p)).collect();
            output.push_str(&format!("  Split:     {}\n", names.join(", ")));
        }
        ExpenseSplit::Itemized { items } => {
            output.push_str("  Items:\n");
            for item in items {
                let consumers: Vec<String> =
                    item.consumers.iter().map(|p| settings.format_person(p)).collect();
                output.push_str(&format!(
                    "    {} x{}  {}  paid by {}  for {}\n",
                    item.description,
                    item.quantity,
                    money(item.amount()),
                    settings.format_person(&item.paid_by),
                    consumers.join(", "),
                ));
            }
        }
    }

    output.push_str(&format!("  Subtotal:  {}\n", money(expense.subtotal())));
    if !expense.extras.net().is_zero() {
        output.push_str(&format!("  Tax:       {}\n", money(expense.extras.tax)));
        output.push_str(&format!("  Service:   {}\n", money(expense.extras.service_charge)));
        output.push_str(&format!("  Discount:  {}\n", money(expense.extras.total_discount)));
    }
    output.push_str(&format!("  Amount:    {}\n", money(expense.amount())));

    output
}
