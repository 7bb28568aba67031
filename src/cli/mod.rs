pub mod render;
pub mod shell;

use std::io;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;

use crate::domain::{Category, Ledger, Transaction};
use shell::{Shell, ShellOptions};

/// Budget Tracker - Personal income and expense tracking
#[derive(Parser)]
#[command(name = "budget-tracker")]
#[command(about = "An interactive, in-memory personal budget tracker")]
#[command(version)]
pub struct Cli {
    /// Width of the ASCII bar graphs, in characters
    #[arg(long, env = "BUDGET_BAR_WIDTH", default_value_t = 50)]
    pub bar_width: usize,

    /// Output format for insights: table, json
    #[arg(long, env = "BUDGET_FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Start with a few sample transactions already recorded
    #[arg(long)]
    pub demo: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    pub fn run(self) -> Result<()> {
        let mut ledger = Ledger::new();
        if self.demo {
            load_demo(&mut ledger).context("Failed to load demo transactions")?;
            info!("Loaded {} demo transaction(s)", ledger.len());
        }

        let options = ShellOptions {
            bar_width: self.bar_width,
            format: self.format,
        };

        let stdin = io::stdin();
        let stdout = io::stdout();
        Shell::new(&mut ledger, stdin.lock(), stdout.lock(), options)
            .run()
            .context("Interactive session failed")?;

        Ok(())
    }
}

/// Sample data: two months of income with a couple of expenses.
pub fn load_demo(ledger: &mut Ledger) -> Result<()> {
    let entries = [
        ("Salary", 100000, true, Category::Others, "2024-01-05"),
        ("Groceries", 30000, false, Category::Food, "2024-01-10"),
        ("Rent", 20000, false, Category::Rent, "2024-02-01"),
        ("Freelance", 50000, true, Category::Others, "2024-02-15"),
    ];

    for (description, amount_cents, is_income, category, date) in entries {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid demo date '{}'", date))?;
        let transaction = if is_income {
            Transaction::income(description, amount_cents, category, date)
        } else {
            Transaction::expense(description, amount_cents, category, date)
        };
        ledger.add_transaction(transaction);
    }
    Ok(())
}
