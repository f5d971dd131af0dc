//! Balance aggregation across a trip's expenses
//!
//! Every expense credits whoever paid and debits whoever benefited. The
//! result is one signed net balance per person: positive means the person is
//! owed money, negative means they owe money.

use tracing::debug;

use crate::error::SharetabResult;
use crate::models::{Balances, Expense, ExpenseSplit, ExtraCharges, Item, Money, Person};

/// Running totals kept in first-seen order
///
/// The order matters: the last person of the extra-charge loop absorbs the
/// rounding residual, so it has to be deterministic.
#[derive(Debug, Default)]
struct OrderedTotals(Vec<(Person, Money)>);

impl OrderedTotals {
    fn add(&mut self, person: &Person, amount: Money) {
        match self.0.iter_mut().find(|(p, _)| p == person) {
            Some((_, total)) => *total += amount,
            None => self.0.push((person.clone(), amount)),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &(Person, Money)> {
        self.0.iter()
    }

    /// Entry with the largest total; ties go to the earliest entry
    fn largest(&self) -> Option<&Person> {
        let mut best: Option<&(Person, Money)> = None;
        for entry in &self.0 {
            if entry.1.is_positive() && best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(person, _)| person)
    }
}

fn credit(balances: &mut Balances, person: &Person, amount: Money) {
    *balances.entry(person.clone()).or_default() += amount;
}

fn debit(balances: &mut Balances, person: &Person, amount: Money) {
    *balances.entry(person.clone()).or_default() -= amount;
}

/// Compute every person's net balance over a list of expenses
///
/// All expenses are validated first; an invalid expense fails the whole call
/// with its 1-based position and no balances are returned. An empty list
/// yields an empty map.
pub fn aggregate_balances(expenses: &[Expense]) -> SharetabResult<Balances> {
    for (i, expense) in expenses.iter().enumerate() {
        expense.validate().map_err(|e| e.in_expense(i + 1))?;
    }

    let mut balances = Balances::new();

    for expense in expenses {
        match &expense.split {
            ExpenseSplit::Equal { split_among, .. } => {
                apply_equal_split(&mut balances, expense.amount(), &expense.paid_by, split_among)
            }
            ExpenseSplit::Itemized { items } => {
                apply_itemized(&mut balances, items, &expense.extras, &expense.paid_by)
            }
        }
    }

    Ok(balances)
}

/// Payer is credited the full amount; everyone in the split owes an equal share
///
/// The shares are rounded individually and not reconciled against the amount.
fn apply_equal_split(balances: &mut Balances, amount: Money, paid_by: &Person, split_among: &[Person]) {
    credit(balances, paid_by, amount);

    let share = amount.split_even(split_among.len());
    debug!(
        amount = %amount,
        paid_by = %paid_by,
        people = split_among.len(),
        share = %share,
        "equal split"
    );

    for person in split_among {
        debit(balances, person, share);
    }
}

fn apply_itemized(
    balances: &mut Balances,
    items: &[Item],
    extras: &ExtraCharges,
    recorded_payer: &Person,
) {
    let mut item_totals = OrderedTotals::default();
    let mut paid_totals = OrderedTotals::default();
    let mut total_item_amount = Money::zero();

    for item in items {
        let amount = item.amount();
        credit(balances, &item.paid_by, amount);
        paid_totals.add(&item.paid_by, amount);

        let share = amount.split_even(item.consumers.len());
        for consumer in &item.consumers {
            debit(balances, consumer, share);
            item_totals.add(consumer, share);
        }

        total_item_amount += amount;
    }

    let extra_charges = extras.net();
    if extra_charges.is_zero() || !total_item_amount.is_positive() {
        return;
    }

    let primary_payer = paid_totals.largest().unwrap_or(recorded_payer);
    credit(balances, primary_payer, extra_charges);

    let mut allocated = Money::zero();
    let mut last_person = None;
    for (person, item_total) in item_totals.iter() {
        let share = extra_charges.prorate(*item_total, total_item_amount);
        debit(balances, person, share);
        allocated += share;
        last_person = Some(person);
    }

    let residual = extra_charges - allocated;
    debug!(
        extras = %extra_charges,
        primary_payer = %primary_payer,
        allocated = %allocated,
        residual = %residual,
        "distributed extra charges"
    );

    if let Some(person) = last_person {
        if !residual.is_zero() {
            debit(balances, person, residual);
        }
    }
}
