//! CSV Loaders
//!
//! Bulk loading of catalog items (`name,price`), deals (one comma separated
//! list of item names per row) and shopping lists (`name,quantity`). Every
//! source starts with a header row, which is skipped. Names are canonicalized
//! before they reach the catalog or register. The first bad row aborts the load.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{Catalog, CatalogError},
    names::canonicalize,
    pricing::{PriceError, parse_price},
    register::{Register, RegisterError},
};

/// Errors raised while loading a CSV source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("cannot open file '{}': {source}", path.display())]
    Open {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// A row in the named file failed to load.
    #[error("in file '{}': {source}", path.display())]
    File {
        /// File path
        path: PathBuf,
        /// The row error
        source: Box<LoadError>,
    },

    /// The CSV itself is malformed or unreadable.
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing.
    #[error("row {row}: missing {column}")]
    MissingColumn {
        /// 1-based line number
        row: u64,
        /// Column name
        column: &'static str,
    },

    /// The price column is not a valid price.
    #[error("row {row}: invalid price for item '{item}': {source}")]
    InvalidPrice {
        /// 1-based line number
        row: u64,
        /// Item name
        item: String,
        /// Parse error
        source: PriceError,
    },

    /// The quantity column is not a positive whole number.
    #[error("row {row}: invalid quantity '{value}' for item '{item}'")]
    InvalidQuantity {
        /// 1-based line number
        row: u64,
        /// Item name
        item: String,
        /// Rejected value
        value: String,
    },

    /// The catalog rejected the row.
    #[error("row {row}: {source}")]
    Catalog {
        /// 1-based line number
        row: u64,
        /// Catalog error
        source: CatalogError,
    },

    /// The register rejected the row.
    #[error("row {row}: {source}")]
    Register {
        /// 1-based line number
        row: u64,
        /// Register error
        source: RegisterError,
    },
}

/// Load `name,price` rows into the catalog. Returns the number of items added.
///
/// # Errors
///
/// Returns a [`LoadError`] for the first row that cannot be read, parsed or added.
#[tracing::instrument(name = "loader.items", skip_all, err)]
pub fn load_items(catalog: &mut Catalog, reader: impl io::Read) -> Result<usize, LoadError> {
    let mut count = 0;

    for record in csv_reader(reader).records() {
        let record = record?;
        let row = line(&record);

        let name = canonicalize(field(&record, 0, row, "item name")?);
        let price_str = field(&record, 1, row, "price")?;

        let price = parse_price(price_str).map_err(|source| LoadError::InvalidPrice {
            row,
            item: name.clone(),
            source,
        })?;

        catalog
            .add_item(name, price)
            .map_err(|source| LoadError::Catalog { row, source })?;

        count += 1;
    }

    info!(items = count, "loaded catalog items");

    Ok(count)
}

/// Load deal rows into the catalog. Returns the number of deals added.
///
/// Empty fields are ignored, so a row with no names is an empty deal.
///
/// # Errors
///
/// Returns a [`LoadError`] for the first row that cannot be read or added.
#[tracing::instrument(name = "loader.deals", skip_all, err)]
pub fn load_deals(catalog: &mut Catalog, reader: impl io::Read) -> Result<usize, LoadError> {
    let mut count = 0;

    for record in csv_reader(reader).records() {
        let record = record?;
        let row = line(&record);

        let names: Vec<String> = record
            .iter()
            .filter(|name| !name.is_empty())
            .map(canonicalize)
            .collect();

        catalog
            .add_deal(&names)
            .map_err(|source| LoadError::Catalog { row, source })?;

        count += 1;
    }

    info!(deals = count, "loaded catalog deals");

    Ok(count)
}

/// Scan `name,quantity` rows into the register. Returns the number of rows scanned.
///
/// # Errors
///
/// Returns a [`LoadError`] for the first row that cannot be read or scanned.
#[tracing::instrument(name = "loader.shopping_list", skip_all, err)]
pub fn load_shopping_list(
    register: &mut Register<'_>,
    reader: impl io::Read,
) -> Result<usize, LoadError> {
    let mut count = 0;

    for record in csv_reader(reader).records() {
        let record = record?;
        let row = line(&record);

        let name = canonicalize(field(&record, 0, row, "item name")?);
        let value = field(&record, 1, row, "quantity")?;

        let quantity = value
            .parse::<u32>()
            .map_err(|_err| LoadError::InvalidQuantity {
                row,
                item: name.clone(),
                value: value.to_string(),
            })?;

        register
            .scan_item(&name, quantity)
            .map_err(|source| LoadError::Register { row, source })?;

        count += 1;
    }

    info!(rows = count, "loaded shopping list");

    Ok(count)
}

/// [`load_items`] from a file.
///
/// # Errors
///
/// Returns a [`LoadError`] naming the file if it cannot be opened or loaded.
pub fn load_items_from_path(
    catalog: &mut Catalog,
    path: impl AsRef<Path>,
) -> Result<usize, LoadError> {
    with_file(path.as_ref(), |file| load_items(catalog, file))
}

/// [`load_deals`] from a file.
///
/// # Errors
///
/// Returns a [`LoadError`] naming the file if it cannot be opened or loaded.
pub fn load_deals_from_path(
    catalog: &mut Catalog,
    path: impl AsRef<Path>,
) -> Result<usize, LoadError> {
    with_file(path.as_ref(), |file| load_deals(catalog, file))
}

/// [`load_shopping_list`] from a file.
///
/// # Errors
///
/// Returns a [`LoadError`] naming the file if it cannot be opened or loaded.
pub fn load_shopping_list_from_path(
    register: &mut Register<'_>,
    path: impl AsRef<Path>,
) -> Result<usize, LoadError> {
    with_file(path.as_ref(), |file| load_shopping_list(register, file))
}

fn with_file<T>(
    path: &Path,
    load: impl FnOnce(File) -> Result<T, LoadError>,
) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    load(file).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

fn csv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn line(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    row: u64,
    column: &'static str,
) -> Result<&'r str, LoadError> {
    record
        .get(index)
        .filter(|value| !value.is_empty())
        .ok_or(LoadError::MissingColumn { row, column })
}
