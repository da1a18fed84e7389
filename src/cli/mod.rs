//! Command line interface
//!
//! Loads the catalog, fills the cart from a shopping list or the interactive
//! prompt, then checks out and writes the receipt to stdout or a file.

use std::{
    fs::{self, File},
    io::{self, BufRead, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::{
    catalog::Catalog,
    loader::{load_deals_from_path, load_items_from_path, load_shopping_list_from_path},
    observability::LoggingConfig,
    receipt::Receipt,
    register::Register,
};

pub mod command;
pub mod prompt;

pub use command::{Command, CommandError};
pub use prompt::{Prompt, PromptError};

/// Supermarket checkout simulator.
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Supermarket checkout simulator", long_about = None)]
pub struct Cli {
    /// Catalog items CSV (`name,price`)
    #[arg(long, env = "CHECKOUT_ITEMS", default_value = "data/items.csv")]
    pub items: PathBuf,

    /// Catalog deals CSV (one deal per row, item names separated by commas)
    #[arg(long, env = "CHECKOUT_DEALS", default_value = "data/deals.csv")]
    pub deals: PathBuf,

    /// Read the cart from a shopping list CSV (`name,quantity`) instead of prompting
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = "input/shopping_list.csv"
    )]
    pub input: Option<PathBuf>,

    /// Write the receipt to a file instead of stdout
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = "output/receipt.txt"
    )]
    pub output: Option<PathBuf>,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Cli {
    /// Run against the process's stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or shopping list cannot be loaded, or the
    /// receipt cannot be written.
    pub fn run(&self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();

        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run with explicit input and output streams. The prompt reads `input`;
    /// prompt output and (unless `--output` is set) the receipt go to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or shopping list cannot be loaded, or the
    /// receipt cannot be written.
    pub fn run_with(&self, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        let catalog = self.load_catalog()?;
        let mut register = Register::new(&catalog);

        if let Some(path) = &self.input {
            load_shopping_list_from_path(&mut register, path)
                .context("failed to read shopping list")?;
        } else {
            Prompt::new(input, &mut output).run(&mut register)?;
        }

        let receipt = register.checkout().context("failed to check out")?;

        if let Some(path) = &self.output {
            write_receipt_file(&receipt, path)?;
        } else {
            receipt.write_to(&mut output)?;
            output.flush()?;
        }

        Ok(())
    }

    /// Load items then deals.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file and row that failed.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let mut catalog = Catalog::new();

        load_items_from_path(&mut catalog, &self.items).context("failed to load items")?;
        load_deals_from_path(&mut catalog, &self.deals).context("failed to load deals")?;

        Ok(catalog)
    }
}

fn write_receipt_file(receipt: &Receipt, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("could not create directory '{}'", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("could not create or open file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    receipt.write_to(&mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), "wrote receipt");

    Ok(())
}
