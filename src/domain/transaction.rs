use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, gifts, refunds)
    Income,
    /// Money going out
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(ParseEnumError::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Rent,
    Transportation,
    Others,
}

impl Category {
    /// Fixed enumeration order. Also the tie-break order for spending queries.
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Rent,
        Category::Transportation,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Transportation => "Transportation",
            Category::Others => "Others",
        }
    }

    /// Map a 1-based menu choice to a category. Anything unrecognised lands in `Others`.
    pub fn from_menu_choice(choice: &str) -> Self {
        match choice.trim() {
            "1" => Category::Food,
            "2" => Category::Rent,
            "3" => Category::Transportation,
            _ => Category::Others,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "rent" => Ok(Category::Rent),
            "transportation" => Ok(Category::Transportation),
            "others" => Ok(Category::Others),
            _ => Err(ParseEnumError::UnknownCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    UnknownKind(String),
    UnknownCategory(String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseEnumError::UnknownKind(s) => {
                write!(f, "unknown transaction kind '{}' (expected income or expense)", s)
            }
            ParseEnumError::UnknownCategory(s) => write!(
                f,
                "unknown category '{}' (expected food, rent, transportation or others)",
                s
            ),
        }
    }
}

impl std::error::Error for ParseEnumError {}

/// A single recorded income or expense.
/// Transactions are immutable once created; the amount is never negative and
/// the kind alone decides whether it counts as income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Amount in cents (never negative)
    pub amount_cents: Cents,
    pub kind: TransactionKind,
    pub category: Category,
    /// Calendar date the transaction happened on
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount_cents: Cents,
        kind: TransactionKind,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        assert!(amount_cents >= 0, "Transaction amount cannot be negative");
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount_cents,
            kind,
            category,
            date,
        }
    }

    pub fn income(
        description: impl Into<String>,
        amount_cents: Cents,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self::new(description, amount_cents, TransactionKind::Income, category, date)
    }

    pub fn expense(
        description: impl Into<String>,
        amount_cents: Cents,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self::new(description, amount_cents, TransactionKind::Expense, category, date)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_transaction() {
        let t = Transaction::expense("Groceries", 4250, Category::Food, date(2024, 3, 1));

        assert_eq!(t.description, "Groceries");
        assert_eq!(t.amount_cents, 4250);
        assert_eq!(t.kind, TransactionKind::Expense);
        assert_eq!(t.category, Category::Food);
        assert!(t.is_expense());
        assert!(!t.is_income());
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        let t = Transaction::income("Nothing", 0, Category::Others, date(2024, 3, 1));
        assert_eq!(t.amount_cents, 0);
    }

    #[test]
    fn test_identical_transactions_get_distinct_ids() {
        let a = Transaction::income("Salary", 100000, Category::Others, date(2024, 1, 1));
        let b = Transaction::income("Salary", 100000, Category::Others, date(2024, 1, 1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    #[should_panic(expected = "Transaction amount cannot be negative")]
    fn test_transaction_rejects_negative_amount() {
        Transaction::expense("Refund?", -1, Category::Food, date(2024, 1, 1));
    }

    #[test]
    fn test_category_menu_choice() {
        assert_eq!(Category::from_menu_choice("1"), Category::Food);
        assert_eq!(Category::from_menu_choice("2"), Category::Rent);
        assert_eq!(Category::from_menu_choice(" 3\n"), Category::Transportation);
        assert_eq!(Category::from_menu_choice("4"), Category::Others);
        assert_eq!(Category::from_menu_choice("9"), Category::Others);
        assert_eq!(Category::from_menu_choice(""), Category::Others);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("FOOD".parse::<Category>(), Ok(Category::Food));
        assert_eq!("transportation".parse::<Category>(), Ok(Category::Transportation));
        assert_eq!("Income".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert!("salary".parse::<Category>().is_err());
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_display_matches_as_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
        assert_eq!(TransactionKind::Expense.to_string(), "Expense");
    }
}
