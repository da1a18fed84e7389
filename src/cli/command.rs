//! Interactive commands

use std::str::FromStr;

use thiserror::Error;

use crate::names::canonicalize;

/// Errors raised while parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Not a keyword and no quantity follows the item name.
    #[error("invalid input, enter '<item> <quantity>' or use 'remove <item>'")]
    MissingQuantity,

    /// The quantity is not a positive whole number.
    #[error("invalid quantity '{0}', enter a whole number larger than 0")]
    InvalidQuantity(String),
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `<item> <quantity>`
    Scan {
        /// Canonical item name
        name: String,
        /// Units to scan
        quantity: u32,
    },

    /// `remove <item>`
    Remove(String),

    /// `cart`
    Cart,

    /// `items`
    Items,

    /// `deals`
    Deals,

    /// `options`
    Options,

    /// `checkout`
    Checkout,
}

impl FromStr for Command {
    type Err = CommandError;

    /// Input is canonicalized first, so keywords and item names are case insensitive.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = canonicalize(input.trim());

        let command = match input.as_str() {
            "Cart" => Command::Cart,
            "Items" => Command::Items,
            "Deals" => Command::Deals,
            "Options" => Command::Options,
            "Checkout" => Command::Checkout,
            _ => {
                if let Some(name) = input.strip_prefix("Remove ") {
                    return Ok(Command::Remove(name.trim().to_string()));
                }

                let (name, quantity) = input
                    .rsplit_once(' ')
                    .ok_or(CommandError::MissingQuantity)?;

                let quantity = quantity
                    .parse::<u32>()
                    .map_err(|_err| CommandError::InvalidQuantity(quantity.to_string()))?;

                Command::Scan {
                    name: name.trim_end().to_string(),
                    quantity,
                }
            }
        };

        Ok(command)
    }
}
