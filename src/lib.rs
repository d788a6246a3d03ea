//! Contract checks for the practicesoftwaretesting.com Brands API.
//!
//! The crate bundles an HTTP engine, random fixtures, response assertions, a
//! typed Brands client and the scenario catalog, plus a runner that executes
//! the catalog against any base URL.

pub mod brands;
pub mod cli;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod runner;
pub mod scenarios;
pub mod testing;
pub mod variables;

pub use config::Config;
pub use error::{Error, Result};
