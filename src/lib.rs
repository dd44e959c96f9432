//! Day-by-day harvester for a news site's archive listings.
//!
//! The binary wires these modules together; the library exposes them so the
//! output file can be read back with [`outputs::json::read_batches`].

pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod harvest;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;
