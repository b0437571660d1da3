//! Interactive console menu
//!
//! Reads from any `BufRead` and writes to any `Write`, so the same loop drives
//! a terminal session and the tests.

use crate::calculation::{PensionCalculator, PensionQuote};
use crate::error::{PensionError, PensionResult};
use crate::format::{format_currency, format_rate};
use crate::request::parse::{
    parse_age, parse_base_income, parse_gender, parse_loss_percent, parse_weeks,
};
use crate::request::{Gender, PensionRequest, PensionType, RequestFields};
use log::debug;
use std::io::{self, BufRead, Write};

/// Menu option that ends the session
pub const EXIT_OPTION: u8 = 4;

/// Why a prompt sequence stopped early
enum PromptError {
    /// Input reached end of file
    Closed,
    Io(io::Error),
    Rejected(PensionError),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        PromptError::Io(err)
    }
}

impl From<PensionError> for PromptError {
    fn from(err: PensionError) -> Self {
        PromptError::Rejected(err)
    }
}

/// User-facing message for each failure kind
pub fn user_message(err: &PensionError) -> String {
    match err {
        PensionError::InvalidIncome { .. } => {
            "Error: the base income must be greater than 0.".to_string()
        }
        PensionError::InsufficientWeeks { required, .. } => {
            format!("Error: the minimum of {} contributed weeks is not met.", required)
        }
        PensionError::BelowMinimumAgeMale { required, .. } => {
            format!("Error: men must be at least {} years old.", required)
        }
        PensionError::BelowMinimumAgeFemale { required, .. } => {
            format!("Error: women must be at least {} years old.", required)
        }
        PensionError::InvalidDisabilityLoss { threshold, .. } => {
            format!("Error: the disability loss must be greater than {}%.", threshold)
        }
        PensionError::InvalidRequestShape(_) => {
            "Error: invalid input. Please check the data.".to_string()
        }
    }
}

/// Render a quote the way the console prints it
pub fn render_quote(quote: &PensionQuote) -> String {
    let mut text = String::new();
    text.push_str("\n----------- RESULT -----------\n");
    text.push_str(&format!("{}\n", quote.pension_type.label()));
    text.push_str(&format!("Replacement rate: {}\n", format_rate(quote.rate_percent())));
    text.push_str(&format!("Monthly payment: {}\n", format_currency(quote.monthly_payment())));
    if quote.payment.minimum_wage_floor_applied {
        text.push_str("(raised to the legal minimum wage)\n");
    }
    text.push_str("------------------------------\n");
    text
}

/// Interactive menu loop over a calculator
pub struct ConsoleSession<R, W> {
    input: R,
    output: W,
    calculator: PensionCalculator,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(input: R, output: W, calculator: PensionCalculator) -> Self {
        Self {
            input,
            output,
            calculator,
        }
    }

    /// Run until the exit option is chosen or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;

            let Some(choice) = self.prompt("\nSelect an option: ")? else {
                writeln!(self.output, "\nExiting...")?;
                return Ok(());
            };

            let option = choice.trim().parse::<u8>().ok();
            if option == Some(EXIT_OPTION) {
                writeln!(self.output, "\nExiting...")?;
                return Ok(());
            }

            let Some(pension_type) = option.and_then(PensionType::from_menu_option) else {
                writeln!(self.output, "Invalid option.")?;
                continue;
            };

            match self.read_request(pension_type) {
                Ok(request) => self.report(&request)?,
                Err(PromptError::Rejected(err)) => {
                    debug!("Console input rejected: {}", err);
                    writeln!(self.output, "{}", user_message(&err))?;
                }
                Err(PromptError::Closed) => {
                    writeln!(self.output, "\nExiting...")?;
                    return Ok(());
                }
                Err(PromptError::Io(err)) => return Err(err),
            }
        }
    }

    /// Consume the session and hand back the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n==============================")?;
        writeln!(self.output, "   PENSION CALCULATION SYSTEM")?;
        writeln!(self.output, "==============================")?;
        for pension_type in PensionType::ALL {
            writeln!(self.output, "{}. {}", pension_type.menu_option(), pension_type.label())?;
        }
        writeln!(self.output, "{}. Exit", EXIT_OPTION)
    }

    /// Print a prompt and read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask<T>(&mut self, label: &str, parse: fn(&str) -> PensionResult<T>) -> Result<T, PromptError> {
        let line = self.prompt(label)?.ok_or(PromptError::Closed)?;
        Ok(parse(&line)?)
    }

    fn ask_gender(&mut self) -> Result<Gender, PromptError> {
        writeln!(self.output, "\nSelect gender:")?;
        writeln!(self.output, "{}. Male", Gender::Male.menu_option())?;
        writeln!(self.output, "{}. Female", Gender::Female.menu_option())?;
        self.ask("Option: ", parse_gender)
    }

    fn read_request(&mut self, pension_type: PensionType) -> Result<PensionRequest, PromptError> {
        let mut fields = RequestFields {
            base_income: Some(self.ask("\nEnter the base income: ", parse_base_income)?),
            weeks_contributed: Some(self.ask("Enter weeks contributed: ", parse_weeks)?),
            ..Default::default()
        };

        if pension_type.requires_gender() {
            fields.gender = Some(self.ask_gender()?);
        }
        if pension_type.requires_age() {
            fields.age = Some(self.ask("Enter the age: ", parse_age)?);
        }
        if pension_type.requires_loss_percent() {
            fields.loss_percent = Some(self.ask("Enter the disability loss percentage: ", parse_loss_percent)?);
        }

        Ok(fields.build(pension_type)?)
    }

    fn report(&mut self, request: &PensionRequest) -> io::Result<()> {
        match self.calculator.calculate(request) {
            Ok(quote) => write!(self.output, "{}", render_quote(&quote)),
            Err(err) => writeln!(self.output, "{}", user_message(&err)),
        }
    }
}
