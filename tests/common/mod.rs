// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use budget_tracker::domain::{Category, Cents, Ledger, Transaction};
use chrono::NaiveDate;

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn income(amount: Cents, date: &str) -> Transaction {
    Transaction::income("Income", amount, Category::Others, parse_date(date))
}

pub fn expense(amount: Cents, category: Category, date: &str) -> Transaction {
    Transaction::expense(category.as_str(), amount, category, parse_date(date))
}

/// Test fixture: Standard ledgers
pub struct StandardLedgers;

impl StandardLedgers {
    /// Two months: +1000 / -300 Food in January, -200 Rent / +500 in February
    pub fn two_months() -> Ledger {
        Self::from_transactions(vec![
            income(100000, "2024-01-05"),
            expense(30000, Category::Food, "2024-01-10"),
            expense(20000, Category::Rent, "2024-02-01"),
            income(50000, "2024-02-15"),
        ])
    }

    /// A mixed ledger spread over a year boundary, inserted out of date order
    pub fn mixed() -> Ledger {
        Self::from_transactions(vec![
            expense(4500, Category::Transportation, "2024-01-03"),
            income(250000, "2023-12-28"),
            expense(120000, Category::Rent, "2023-12-01"),
            expense(3275, Category::Food, "2024-01-03"),
            expense(999, Category::Others, "2024-01-20"),
            income(250000, "2024-01-28"),
            expense(120000, Category::Rent, "2024-01-01"),
            expense(8110, Category::Food, "2023-12-15"),
        ])
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Ledger {
        let mut ledger = Ledger::new();
        for t in transactions {
            ledger.add_transaction(t);
        }
        ledger
    }
}
