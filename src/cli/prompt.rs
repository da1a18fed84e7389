//! Interactive prompt
//!
//! Reads commands line by line and applies them to a register until the
//! customer checks out or input ends. Rejected input is reported and the loop
//! carries on.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::DealListError,
    cli::command::Command,
    display::{write_centered, write_rule},
    register::Register,
};

const WELCOME: &str = "Welcome to Supermarket Checkout Simulator!";
const WELCOME_WIDTH: usize = 55;

const OPTIONS: [&str; 7] = [
    "- Scan items by typing an item name followed by a single space and the quantity.",
    "- To remove an item from your cart type 'remove <item>' (removes every unit).",
    "- To view the items currently in your cart, type 'cart'.",
    "- To view every item sold in the Supermarket, type 'items'.",
    "- To view every deal in the Supermarket, type 'deals'.",
    "- When you are finished, type 'checkout' to print your receipt.",
    "- To repeat these options, type 'options'.",
];

/// Errors that end the prompt early.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The deal list could not be shown.
    #[error(transparent)]
    DealList(#[from] DealListError),
}

/// Line based command loop over any reader and writer.
#[derive(Debug)]
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Create a prompt reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until `checkout` or end of input. The cart is left for the caller to check out.
    ///
    /// # Errors
    ///
    /// Returns a [`PromptError`] if the input or output fails.
    pub fn run(&mut self, register: &mut Register<'_>) -> Result<(), PromptError> {
        self.write_welcome()?;
        self.write_options()?;

        let mut line = String::new();

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();

            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                debug!("input closed, checking out");
                break;
            }

            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Checkout) => break,
                Ok(command) => self.execute(register, command)?,
                Err(err) => self.report(&err)?,
            }
        }

        Ok(())
    }

    fn execute(
        &mut self,
        register: &mut Register<'_>,
        command: Command,
    ) -> Result<(), PromptError> {
        match command {
            Command::Scan { name, quantity } => {
                if let Err(err) = register.scan_item(&name, quantity) {
                    self.report(&err)?;
                }
            }
            Command::Remove(name) => {
                if let Err(err) = register.remove_item(&name) {
                    self.report(&err)?;
                }
            }
            Command::Cart => register.write_cart_to(&mut self.output)?,
            Command::Items => register.catalog().write_items_to(&mut self.output)?,
            Command::Deals => register.catalog().write_deals_to(&mut self.output)?,
            Command::Options => self.write_options()?,
            Command::Checkout => {}
        }

        Ok(())
    }

    fn report(&mut self, err: &dyn std::error::Error) -> io::Result<()> {
        debug!(error = %err, "rejected input");

        writeln!(self.output, "Error: {err}")
    }

    fn write_welcome(&mut self) -> io::Result<()> {
        write_rule(&mut self.output, WELCOME_WIDTH)?;
        write_centered(&mut self.output, WELCOME, WELCOME_WIDTH)?;
        write_rule(&mut self.output, WELCOME_WIDTH)
    }

    fn write_options(&mut self) -> io::Result<()> {
        for option in OPTIONS {
            writeln!(self.output, "{option}")?;
        }

        Ok(())
    }
}
