pub mod api;
pub mod clients;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod metrics;
pub mod types;
pub mod views;

#[cfg(test)]
mod test_utils;

pub use error::{AppError, Result};
