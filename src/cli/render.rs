use std::io::Write;

use crate::application::{AppError, CategorySummary, InsightsReport, MonthlySummary, Summary};
use crate::domain::{Cents, Ledger, format_cents};

/// Length of a bar for `value`, scaled so that `max` fills `width`.
pub fn bar_length(value: Cents, max: Cents, width: usize) -> usize {
    if max <= 0 || value <= 0 {
        return 0;
    }
    let len = (value as f64 / max as f64 * width as f64).floor() as usize;
    len.min(width)
}

fn bar(value: Cents, max: Cents, width: usize) -> String {
    "*".repeat(bar_length(value, max, width))
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> Result<(), AppError> {
    writeln!(out, "\n--- Updated Summary ---")?;
    writeln!(out, "Total Income: {}", format_cents(summary.total_income))?;
    writeln!(out, "Total Expenses: {}", format_cents(summary.total_expenses))?;
    writeln!(out, "Net Savings: {}", format_cents(summary.net_savings))?;
    Ok(())
}

pub fn write_insights_table<W: Write>(
    out: &mut W,
    report: &InsightsReport,
    bar_width: usize,
) -> Result<(), AppError> {
    writeln!(out, "\n--- Financial Insights ---")?;
    writeln!(
        out,
        "Most Spent Category: {}",
        report
            .most_spent_category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "None".to_string())
    )?;
    writeln!(
        out,
        "Average Monthly Savings: {}",
        report
            .average_monthly_savings
            .map(format_cents)
            .unwrap_or_else(|| "n/a".to_string())
    )?;

    write_category_breakdown(out, &report.categories)?;
    write_category_graph(out, &report.categories, bar_width)?;
    write_financial_graph(out, &report.summary, bar_width)?;
    write_monthly_table(out, &report.months)?;
    Ok(())
}

pub fn write_insights_json<W: Write>(out: &mut W, report: &InsightsReport) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

fn write_category_breakdown<W: Write>(
    out: &mut W,
    categories: &[CategorySummary],
) -> Result<(), AppError> {
    writeln!(out, "\n--- Expense Breakdown by Category ---")?;
    if categories.is_empty() {
        writeln!(out, "No expenses recorded.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<15} {:>12} {:>6} {:>12} {:>7}",
        "CATEGORY", "TOTAL", "COUNT", "AVERAGE", "%"
    )?;
    writeln!(out, "{}", "-".repeat(56))?;
    for c in categories {
        writeln!(
            out,
            "{:<15} {:>12} {:>6} {:>12} {:>6.1}%",
            c.category.as_str(),
            format_cents(c.total),
            c.count,
            format_cents(c.average),
            c.percentage
        )?;
    }
    Ok(())
}

fn write_category_graph<W: Write>(
    out: &mut W,
    categories: &[CategorySummary],
    bar_width: usize,
) -> Result<(), AppError> {
    writeln!(out, "\n--- Expense Graph by Category ---")?;
    let Some(max) = categories.iter().map(|c| c.total).max() else {
        writeln!(out, "No expenses recorded.")?;
        return Ok(());
    };

    for c in categories {
        writeln!(
            out,
            "{:<15}: {:<10} | {}",
            c.category.as_str(),
            format_cents(c.total),
            bar(c.total, max, bar_width)
        )?;
    }
    Ok(())
}

fn write_financial_graph<W: Write>(
    out: &mut W,
    summary: &Summary,
    bar_width: usize,
) -> Result<(), AppError> {
    writeln!(out, "\n--- Financial Overview Graph ---")?;
    let max = summary.total_income.max(summary.net_savings);

    writeln!(
        out,
        "Total Income:  {:<10} | {}",
        format_cents(summary.total_income),
        bar(summary.total_income, max, bar_width)
    )?;
    writeln!(
        out,
        "Net Savings:   {:<10} | {}",
        format_cents(summary.net_savings),
        bar(summary.net_savings, max, bar_width)
    )?;
    Ok(())
}

fn write_monthly_table<W: Write>(out: &mut W, months: &[MonthlySummary]) -> Result<(), AppError> {
    writeln!(out, "\n--- Monthly Savings ---")?;
    if months.is_empty() {
        writeln!(out, "No transactions recorded.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<8} {:>12} {:>12} {:>12}",
        "MONTH", "INCOME", "EXPENSES", "NET"
    )?;
    writeln!(out, "{}", "-".repeat(47))?;
    for m in months {
        writeln!(
            out,
            "{:<8} {:>12} {:>12} {:>12}",
            m.month,
            format_cents(m.income),
            format_cents(m.expenses),
            format_cents(m.net)
        )?;
    }
    Ok(())
}

/// Write every transaction as CSV, oldest first. Returns the number of rows written.
pub fn write_transactions_csv<W: Write>(out: W, ledger: &Ledger) -> Result<usize, AppError> {
    let mut csv_writer = csv::Writer::from_writer(out);

    csv_writer.write_record(["id", "date", "kind", "category", "description", "amount"])?;

    let mut count = 0;
    for t in ledger.sorted_by_date() {
        csv_writer.write_record([
            t.id.to_string(),
            t.date.format("%Y-%m-%d").to_string(),
            t.kind.to_string(),
            t.category.to_string(),
            t.description.clone(),
            format_cents(t.amount_cents),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{Category, Transaction};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn render_table(ledger: &Ledger, width: usize) -> String {
        let mut out = Vec::new();
        write_insights_table(&mut out, &InsightsReport::from_ledger(ledger), width).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(50, 100, 50), 25);
        assert_eq!(bar_length(100, 100, 50), 50);
        assert_eq!(bar_length(1, 3, 50), 16); // floor(16.67)
        assert_eq!(bar_length(0, 100, 50), 0);
        assert_eq!(bar_length(-10, 100, 50), 0);
        assert_eq!(bar_length(10, 0, 50), 0);
        assert_eq!(bar_length(200, 100, 50), 50);
    }

    #[test]
    fn test_insights_on_empty_ledger() {
        let output = render_table(&Ledger::new(), 50);

        assert!(output.contains("Most Spent Category: None"));
        assert!(output.contains("Average Monthly Savings: n/a"));
        assert!(output.contains("No expenses recorded."));
        assert!(output.contains("No transactions recorded."));
    }

    #[test]
    fn test_category_graph_scales_to_largest() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::expense("a", 30000, Category::Food, date("2024-01-10")));
        ledger.add_transaction(Transaction::expense("b", 15000, Category::Rent, date("2024-02-01")));

        let output = render_table(&ledger, 10);

        assert!(output.contains(&format!("{:<15}: {:<10} | {}", "Food", "300.00", "*".repeat(10))));
        assert!(output.contains(&format!("{:<15}: {:<10} | {}", "Rent", "150.00", "*".repeat(5))));
    }

    #[test]
    fn test_financial_graph_with_negative_savings() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::income("pay", 1000, Category::Others, date("2024-01-01")));
        ledger.add_transaction(Transaction::expense("rent", 3000, Category::Rent, date("2024-01-02")));

        let output = render_table(&ledger, 20);

        assert!(output.contains(&format!("Total Income:  {:<10} | {}", "10.00", "*".repeat(20))));
        assert!(output.contains(&format!("Net Savings:   {:<10} | \n", "-20.00")));
    }

    #[test]
    fn test_insights_json() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::expense("lunch", 1250, Category::Food, date("2024-01-10")));

        let mut out = Vec::new();
        write_insights_json(&mut out, &InsightsReport::from_ledger(&ledger)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["summary"]["total_expenses"], 1250);
        assert_eq!(value["most_spent_category"], "food");
        assert_eq!(value["average_monthly_savings"], -1250);
        assert_eq!(value["months"][0]["month"], "2024-01");
    }

    #[test]
    fn test_transactions_csv_sorted_by_date() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::expense("late", 100, Category::Food, date("2024-03-01")));
        ledger.add_transaction(Transaction::income("early", 200, Category::Others, date("2024-01-01")));

        let mut out = Vec::new();
        let count = write_transactions_csv(&mut out, &ledger).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(count, 2);
        assert_eq!(lines[0], "id,date,kind,category,description,amount");
        assert!(lines[1].ends_with(",2024-01-01,Income,Others,early,2.00"));
        assert!(lines[2].ends_with(",2024-03-01,Expense,Food,late,1.00"));
    }
}
