use serde::{Deserialize, Serialize};

use crate::domain::{Category, Cents, Ledger, MonthlyNet};

/// Headline totals, printed after every new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Cents,
    pub total_expenses: Cents,
    pub net_savings: Cents,
}

impl Summary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            total_income: ledger.total_income(),
            total_expenses: ledger.total_expenses(),
            net_savings: ledger.net_savings(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
    pub average: Cents,
    /// Share of total expenses, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// "YYYY-MM"
    pub month: String,
    pub income: Cents,
    pub expenses: Cents,
    pub net: Cents,
}

impl From<MonthlyNet> for MonthlySummary {
    fn from(m: MonthlyNet) -> Self {
        Self {
            month: format!("{:04}-{:02}", m.year, m.month),
            income: m.income,
            expenses: m.expenses,
            net: m.net,
        }
    }
}

/// Everything shown by "View Insights".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    pub summary: Summary,
    pub most_spent_category: Option<Category>,
    /// `None` when the ledger holds no transactions
    pub average_monthly_savings: Option<Cents>,
    pub categories: Vec<CategorySummary>,
    pub months: Vec<MonthlySummary>,
}

impl InsightsReport {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            summary: Summary::from_ledger(ledger),
            most_spent_category: ledger.most_spent_category(),
            average_monthly_savings: ledger.average_monthly_savings().ok(),
            categories: category_summaries(ledger),
            months: ledger
                .monthly_savings()
                .into_iter()
                .map(MonthlySummary::from)
                .collect(),
        }
    }
}

/// Per-category expense summaries in `Ledger::category_breakdown` order.
pub fn category_summaries(ledger: &Ledger) -> Vec<CategorySummary> {
    let total_expenses = ledger.total_expenses();

    ledger
        .category_breakdown()
        .into_iter()
        .map(|(category, total)| {
            let count = ledger.expense_count(category);
            let percentage = if total_expenses > 0 {
                total as f64 / total_expenses as f64 * 100.0
            } else {
                0.0
            };
            CategorySummary {
                category,
                total,
                count,
                average: if count > 0 { total / count as Cents } else { 0 },
                percentage,
            }
        })
        .collect()
}
