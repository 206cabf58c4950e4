//! # Student Cleaner - CSV Cleaning Pipeline
//!
//! Loads a CSV dataset of student records, runs it through a fixed sequence
//! of idempotent cleaning steps and writes one cleaned CSV ready for analysis
//! or loading into a database.
//!
//! ## Quick Start
//!
//! ```no_run
//! use student_cleaner::cleaner::DatasetCleaner;
//! use student_cleaner::config::CleanerConfig;
//!
//! let mut cleaner = DatasetCleaner::load("Students_Performance.csv", CleanerConfig::default())?;
//! let report = cleaner.run()?;
//! println!("{} duplicate rows removed", report.duplicates_removed);
//! cleaner.save("cleaned_students_performance.csv")?;
//! # Ok::<(), student_cleaner::error::CleanerError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`cleaner`]: The pipeline object and every cleaning step
//!   - [`cleaner::naming`]: Canonical column names
//!   - [`cleaner::dates`]: Date separator cleanup and format parsing
//!   - [`cleaner::io`]: CSV load and atomic save
//! - [`config`]: JSON-backed pipeline configuration
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: Console and file logging setup for the binary
//!
//! ## Key Concepts
//!
//! ### Fixed Step Order
//!
//! Columns are renamed before anything else, since every later step refers to
//! columns by their canonical name. Running the pipeline on its own output
//! yields the same output.
//!
//! ### Row Policy
//!
//! Values that cannot be cleaned (an unparseable date, a value emptied by
//! special character removal) never abort the run. They are logged as
//! warnings and resolved by one [`cleaner::RowPolicy`] chosen per run.

#![warn(clippy::all, rust_2018_idioms)]

pub mod cleaner;
pub mod config;
pub mod error;
pub mod logging;
