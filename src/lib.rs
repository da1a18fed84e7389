//! Checkout
//!
//! A supermarket checkout register: a catalog of items and multi-buy deals, a
//! register that scans a customer's cart, greedy deal resolution at checkout and
//! an itemised receipt.

pub mod catalog;
pub mod cli;
pub mod deals;
mod display;
pub mod loader;
pub mod names;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod register;
