//! Lajan - terminal budgeting with category alerts
//!
//! A budget covers one period (week, month, quarter or year) in one currency
//! and allocates money across a fixed set of spending categories. The crate
//! classifies each category against alert thresholds, suggests new amounts
//! from earlier budgets, and previews reallocations without saving them.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: `tracing` subscriber setup
//! - `models`: Money, currencies, periods, categories and budgets
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `analytics`: Status, suggestions, simulation and statistics
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use lajan::config::{LajanPaths, Settings};
//! use lajan::storage::Storage;
//!
//! let paths = LajanPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod analytics;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LajanError, LajanResult};
