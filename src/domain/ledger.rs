use std::collections::BTreeMap;

use chrono::Datelike;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Category, Cents, Transaction, TransactionKind};

/// Income, expenses and net for a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyNet {
    pub year: i32,
    pub month: u32,
    pub income: Cents,
    pub expenses: Cents,
    pub net: Cents,
}

/// In-memory ledger of transactions. Append-only; every query is read-only.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction. Inputs are assumed valid; duplicates are kept.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        debug!(
            "Recording {} of {} cents ({}) on {}",
            transaction.kind, transaction.amount_cents, transaction.category, transaction.date
        );
        self.transactions.push(transaction);
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn total_income(&self) -> Cents {
        self.total_for(TransactionKind::Income)
    }

    pub fn total_expenses(&self) -> Cents {
        self.total_for(TransactionKind::Expense)
    }

    /// Total income minus total expenses. May be negative.
    pub fn net_savings(&self) -> Cents {
        self.total_income() - self.total_expenses()
    }

    fn total_for(&self, kind: TransactionKind) -> Cents {
        sum_cents(
            self.transactions
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.amount_cents),
        )
    }

    /// All transactions ordered by date, oldest first.
    /// Equal dates keep their insertion order.
    pub fn sorted_by_date(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        // sort_by_key is stable
        sorted.sort_by_key(|t| t.date);
        sorted
    }

    /// Sum of expenses recorded against a category.
    pub fn expenses_in(&self, category: Category) -> Cents {
        sum_cents(self.expenses_for(category).map(|t| t.amount_cents))
    }

    /// Number of expense transactions recorded against a category.
    pub fn expense_count(&self, category: Category) -> usize {
        self.expenses_for(category).count()
    }

    fn expenses_for(&self, category: Category) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |t| t.is_expense() && t.category == category)
    }

    /// The category with the highest expense total, or `None` when nothing was spent.
    /// Ties go to whichever category comes first in `Category::ALL`.
    pub fn most_spent_category(&self) -> Option<Category> {
        let mut best: Option<(Category, Cents)> = None;
        for category in Category::ALL {
            if self.expense_count(category) == 0 {
                continue;
            }
            let total = self.expenses_in(category);
            match best {
                Some((_, best_total)) if best_total >= total => {}
                _ => best = Some((category, total)),
            }
        }
        best.map(|(category, _)| category)
    }

    /// Expense totals per category, covering only categories with at least one expense.
    /// Ordered by descending total, ties broken by category name.
    pub fn category_breakdown(&self) -> Vec<(Category, Cents)> {
        let mut breakdown: Vec<(Category, Cents)> = Category::ALL
            .into_iter()
            .filter(|c| self.expense_count(*c) > 0)
            .map(|c| (c, self.expenses_in(c)))
            .collect();

        breakdown.sort_by(|(a_cat, a_total), (b_cat, b_total)| {
            b_total
                .cmp(a_total)
                .then_with(|| a_cat.as_str().cmp(b_cat.as_str()))
        });
        breakdown
    }

    /// Per-month income, expenses and net, in chronological order.
    /// Only months containing at least one transaction appear.
    pub fn monthly_savings(&self) -> Vec<MonthlyNet> {
        let mut months: BTreeMap<(i32, u32), (Cents, Cents)> = BTreeMap::new();

        for t in &self.transactions {
            let entry = months
                .entry((t.date.year(), t.date.month()))
                .or_insert((0, 0));
            match t.kind {
                TransactionKind::Income => entry.0 = entry.0.saturating_add(t.amount_cents),
                TransactionKind::Expense => entry.1 = entry.1.saturating_add(t.amount_cents),
            }
        }

        months
            .into_iter()
            .map(|((year, month), (income, expenses))| MonthlyNet {
                year,
                month,
                income,
                expenses,
                net: income - expenses,
            })
            .collect()
    }

    /// Mean of the monthly net values, rounded half away from zero to whole cents.
    /// Fails on an empty ledger, since there are no months to average.
    pub fn average_monthly_savings(&self) -> Result<Cents, AggregateError> {
        let months = self.monthly_savings();
        if months.is_empty() {
            return Err(AggregateError::Empty("average monthly savings"));
        }

        // Each net fits in Cents, so the mean does too; only the running sum needs i128
        let total: i128 = months.iter().map(|m| i128::from(m.net)).sum();
        let average = div_round(total, months.len() as i128) as Cents;
        debug!(
            "Average monthly savings over {} month(s): {} cents",
            months.len(),
            average
        );
        Ok(average)
    }
}

/// Sum non-negative amounts, saturating at `Cents::MAX` instead of overflowing.
/// Totals stay within `[0, Cents::MAX]`, so differences of two totals cannot overflow.
fn sum_cents(amounts: impl Iterator<Item = Cents>) -> Cents {
    amounts.fold(0, Cents::saturating_add)
}

/// Integer division rounding half away from zero. `divisor` must be positive.
fn div_round(value: i128, divisor: i128) -> i128 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder.abs() * 2 >= divisor {
        quotient + value.signum()
    } else {
        quotient
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// An aggregate was requested over zero qualifying transactions
    Empty(&'static str),
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateError::Empty(what) => {
                write!(f, "Cannot compute {} over an empty ledger", what)
            }
        }
    }
}

impl std::error::Error for AggregateError {}
