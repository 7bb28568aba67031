use std::io::{BufRead, Write};

use chrono::NaiveDate;
use log::{debug, warn};

use super::OutputFormat;
use super::render;
use crate::application::{AppError, InsightsReport, Summary};
use crate::domain::{Category, Cents, Ledger, Transaction, TransactionKind, parse_cents};

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(input.to_string()))
}

/// Parse a non-negative amount such as "12.50" into cents.
pub fn parse_amount(input: &str) -> Result<Cents, AppError> {
    let input = input.trim();
    parse_cents(input).map_err(|reason| AppError::InvalidAmount {
        input: input.to_string(),
        reason,
    })
}

/// Where the interactive session currently is.
#[derive(Debug, Clone, PartialEq)]
enum State {
    MainMenu,
    AwaitingDate {
        kind: TransactionKind,
    },
    AwaitingCategory {
        kind: TransactionKind,
        date: NaiveDate,
    },
    AwaitingDescription {
        kind: TransactionKind,
        date: NaiveDate,
        category: Category,
    },
    AwaitingAmount {
        kind: TransactionKind,
        date: NaiveDate,
        category: Category,
        description: String,
    },
    Exiting,
}

#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    pub bar_width: usize,
    pub format: OutputFormat,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            bar_width: 50,
            format: OutputFormat::Table,
        }
    }
}

/// Interactive menu over a borrowed ledger.
/// Reads prompts' answers line by line from `input`; end of input exits.
pub struct Shell<'a, R, W> {
    ledger: &'a mut Ledger,
    input: R,
    output: W,
    options: ShellOptions,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ledger: &'a mut Ledger, input: R, output: W, options: ShellOptions) -> Self {
        Self {
            ledger,
            input,
            output,
            options,
        }
    }

    pub fn run(mut self) -> Result<(), AppError> {
        let mut state = State::MainMenu;
        while state != State::Exiting {
            state = self.step(state)?;
        }
        Ok(())
    }

    fn step(&mut self, state: State) -> Result<State, AppError> {
        let next = match state {
            State::MainMenu => {
                self.print_menu()?;
                let Some(choice) = self.prompt("Choose an option: ")? else {
                    return Ok(State::Exiting);
                };
                match choice.as_str() {
                    "1" => State::AwaitingDate {
                        kind: TransactionKind::Expense,
                    },
                    "2" => State::AwaitingDate {
                        kind: TransactionKind::Income,
                    },
                    "3" => {
                        self.view_insights()?;
                        State::MainMenu
                    }
                    "4" => {
                        writeln!(self.output, "Exiting... Goodbye!")?;
                        State::Exiting
                    }
                    "5" => {
                        self.list_transactions()?;
                        State::MainMenu
                    }
                    other => match other.parse::<TransactionKind>() {
                        Ok(kind) => State::AwaitingDate { kind },
                        Err(e) => {
                            debug!("Unrecognised menu choice: {}", e);
                            writeln!(self.output, "Invalid choice, please try again.")?;
                            State::MainMenu
                        }
                    },
                }
            }

            State::AwaitingDate { kind } => {
                let Some(line) = self.prompt(&format!("Enter date (YYYY-MM-DD) for {}: ", kind))?
                else {
                    return Ok(State::Exiting);
                };
                match parse_date(&line) {
                    Ok(date) => State::AwaitingCategory { kind, date },
                    Err(e) => {
                        warn!("Rejected date input: {}", e);
                        writeln!(self.output, "{}", e)?;
                        State::AwaitingDate { kind }
                    }
                }
            }

            State::AwaitingCategory { kind, date } => {
                writeln!(self.output, "\nChoose Category:")?;
                for (i, category) in Category::ALL.iter().enumerate() {
                    writeln!(self.output, "{}. {}", i + 1, category)?;
                }
                let Some(choice) = self.prompt("Enter choice (1-4): ")? else {
                    return Ok(State::Exiting);
                };
                // Accept either a menu digit or a category name
                let category = choice
                    .parse::<Category>()
                    .unwrap_or_else(|_| Category::from_menu_choice(&choice));
                State::AwaitingDescription {
                    kind,
                    date,
                    category,
                }
            }

            State::AwaitingDescription {
                kind,
                date,
                category,
            } => {
                let Some(description) = self.prompt("Enter description: ")? else {
                    return Ok(State::Exiting);
                };
                State::AwaitingAmount {
                    kind,
                    date,
                    category,
                    description,
                }
            }

            State::AwaitingAmount {
                kind,
                date,
                category,
                description,
            } => {
                let Some(line) = self.prompt("Enter amount: ")? else {
                    return Ok(State::Exiting);
                };
                match parse_amount(&line) {
                    Ok(amount_cents) => {
                        self.ledger.add_transaction(Transaction::new(
                            description,
                            amount_cents,
                            kind,
                            category,
                            date,
                        ));
                        writeln!(self.output, "\n{} transaction added successfully!", kind)?;
                        render::write_summary(&mut self.output, &Summary::from_ledger(self.ledger))?;
                        State::MainMenu
                    }
                    Err(e) => {
                        warn!("Rejected amount input: {}", e);
                        writeln!(self.output, "{}", e)?;
                        State::AwaitingAmount {
                            kind,
                            date,
                            category,
                            description,
                        }
                    }
                }
            }

            State::Exiting => State::Exiting,
        };
        Ok(next)
    }

    fn print_menu(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\n--- Personal Budget Tracker ---")?;
        writeln!(self.output, "1. Add Transaction (Expense)")?;
        writeln!(self.output, "2. Add Income")?;
        writeln!(self.output, "3. View Insights")?;
        writeln!(self.output, "4. Exit")?;
        writeln!(self.output, "5. List Transactions")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line. `None` means end of input.
    /// Bytes that are not valid UTF-8 become replacement characters, so the
    /// answer is rejected by the usual validation rather than ending the session.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            debug!("End of input reached");
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn view_insights(&mut self) -> Result<(), AppError> {
        let report = InsightsReport::from_ledger(self.ledger);
        match self.options.format {
            OutputFormat::Table => {
                render::write_insights_table(&mut self.output, &report, self.options.bar_width)
            }
            OutputFormat::Json => render::write_insights_json(&mut self.output, &report),
        }
    }

    fn list_transactions(&mut self) -> Result<(), AppError> {
        if self.ledger.is_empty() {
            writeln!(self.output, "No transactions recorded.")?;
            return Ok(());
        }
        let count = render::write_transactions_csv(&mut self.output, self.ledger)?;
        debug!("Listed {} transaction(s)", count);
        Ok(())
    }
}
