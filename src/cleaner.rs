//! The cleaning pipeline.
//!
//! [`DatasetCleaner`] owns one loaded frame and applies the cleaning steps in
//! a fixed order:
//!
//! ```text
//! load -> rename_columns -> drop_duplicated -> drop_missing -> strip_columns
//!      -> clean_values (+ corrections) -> clean_date -> process_date_column
//!      -> final duplicate sweep -> save
//! ```
//!
//! Each step borrows the current frame and produces a new one, so a step that
//! fails leaves the held frame untouched. Running the whole pipeline on its
//! own output changes nothing.
//!
//! ```no_run
//! use student_cleaner::cleaner::clean_file;
//! use student_cleaner::config::CleanerConfig;
//!
//! let report = clean_file(
//!     "Students_Performance.csv",
//!     "cleaned_students_performance.csv",
//!     &CleanerConfig::default(),
//! )?;
//! println!("{report}");
//! # Ok::<(), student_cleaner::error::CleanerError>(())
//! ```

pub mod cleaning;
pub mod dates;
pub mod io;
pub mod naming;
pub mod profiling;
pub mod types;

pub use cleaning::{
    check_expected_values, clean_values, correct_values, drop_duplicated, drop_missing,
    rename_columns, strip_columns,
};
pub use dates::{clean_date, process_date_column};
pub use io::{load_df, save_df};
pub use profiling::dataset_info;
pub use types::{DatasetInfo, RowPolicy, StepOutput, ValueWarning, WarningKind};

use crate::config::CleanerConfig;
use crate::error::Result;
use polars::prelude::DataFrame;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Counts of what a run removed or fixed, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub rows_loaded: usize,
    pub columns_renamed: usize,
    pub duplicates_removed: usize,
    pub missing_removed: usize,
    pub values_stripped: usize,
    pub values_cleaned: usize,
    pub values_corrected: usize,
    pub unexpected_values: usize,
    pub dates_normalized: usize,
    pub rows_dropped_by_policy: usize,
    pub rows_written: usize,
    pub warnings: Vec<ValueWarning>,
}

impl RunReport {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows loaded:              {}", self.rows_loaded)?;
        writeln!(f, "Columns renamed:          {}", self.columns_renamed)?;
        writeln!(f, "Duplicate rows removed:   {}", self.duplicates_removed)?;
        writeln!(f, "Incomplete rows removed:  {}", self.missing_removed)?;
        writeln!(f, "Values stripped:          {}", self.values_stripped)?;
        writeln!(f, "Values cleaned:           {}", self.values_cleaned)?;
        writeln!(f, "Values corrected:         {}", self.values_corrected)?;
        writeln!(f, "Unexpected values:        {}", self.unexpected_values)?;
        writeln!(f, "Dates normalized:         {}", self.dates_normalized)?;
        writeln!(f, "Rows dropped by policy:   {}", self.rows_dropped_by_policy)?;
        writeln!(f, "Value warnings:           {}", self.warning_count())?;
        write!(f, "Rows written:             {}", self.rows_written)
    }
}

/// Pipeline object owning one dataset for the duration of a run.
pub struct DatasetCleaner {
    config: CleanerConfig,
    pattern: Regex,
    df: DataFrame,
    report: RunReport,
}

impl DatasetCleaner {
    /// Wraps an already loaded frame.
    pub fn new(df: DataFrame, config: CleanerConfig) -> Result<Self> {
        config.validate()?;
        let pattern = config.compile_pattern()?;
        let report = RunReport {
            rows_loaded: df.height(),
            ..RunReport::default()
        };
        Ok(Self {
            config,
            pattern,
            df,
            report,
        })
    }

    /// Reads the CSV at `path` with the configured null sentinels. The date
    /// column is read as text.
    pub fn load(path: impl AsRef<Path>, config: CleanerConfig) -> Result<Self> {
        let df = load_df(
            path.as_ref(),
            &config.null_values,
            std::slice::from_ref(&config.date_column),
        )?;
        Self::new(df, config)
    }

    pub fn dataset(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_dataset(self) -> DataFrame {
        self.df
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn rename_columns(&mut self) -> Result<&mut Self> {
        let before = cleaning::column_names(&self.df);
        let df = rename_columns(&self.df)?;
        let after = cleaning::column_names(&df);

        let renamed = before.iter().zip(&after).filter(|(b, a)| b != a).count();
        tracing::info!("Renamed dataframe columns: {after:?}");
        self.report.columns_renamed += renamed;
        self.df = df;

        self.check_expected_columns();
        Ok(self)
    }

    fn check_expected_columns(&self) {
        if self.config.expected_columns.is_empty() {
            return;
        }
        let present = cleaning::column_names(&self.df);
        let missing: Vec<&String> = self
            .config
            .expected_columns
            .iter()
            .filter(|c| !present.contains(c))
            .collect();
        let unexpected: Vec<&String> = present
            .iter()
            .filter(|c| !self.config.expected_columns.contains(c))
            .collect();

        if !missing.is_empty() {
            tracing::warn!("Expected columns missing from the dataset: {missing:?}");
        }
        if !unexpected.is_empty() {
            tracing::warn!("Dataset has columns outside the expected set: {unexpected:?}");
        }
    }

    /// Profiles the current frame and logs the result.
    pub fn dataset_info(&self) -> Result<DatasetInfo> {
        let info = dataset_info(&self.df)?;
        profiling::log_dataset_info(&info);
        Ok(info)
    }

    pub fn drop_duplicated(&mut self) -> Result<&mut Self> {
        let rows_before = self.df.height();
        let df = drop_duplicated(&self.df)?;
        let rows_after = df.height();
        let dropped = rows_before - rows_after;

        tracing::info!(
            "DUPLICATED rows: dropped [{dropped}] out of [{rows_before}] rows. The new dataset includes: [{rows_after}] rows."
        );
        self.report.duplicates_removed += dropped;
        self.df = df;
        Ok(self)
    }

    pub fn drop_missing(&mut self) -> Result<&mut Self> {
        let rows_before = self.df.height();
        let df = drop_missing(&self.df, &self.config.exclude_from_missing)?;
        let rows_after = df.height();
        let dropped = rows_before - rows_after;

        tracing::info!(
            "MISSING values: dropped {dropped} rows out of {rows_before} rows. New dataset has {rows_after} rows."
        );
        self.report.missing_removed += dropped;
        self.df = df;
        Ok(self)
    }

    pub fn strip_columns(&mut self) -> Result<&mut Self> {
        let (df, stripped) = strip_columns(&self.df)?;

        tracing::info!("Number of stripped leading and trailing whitespace: {stripped:?}");
        self.report.values_stripped += stripped.values().sum::<usize>();
        self.df = df;
        Ok(self)
    }

    /// Removes the configured pattern from the configured columns, then maps
    /// known variants onto canonical values and reports anything unexpected.
    pub fn clean_values(&mut self) -> Result<&mut Self> {
        let rows_before = self.df.height();
        let output = clean_values(
            &self.df,
            &self.config.clean_columns,
            &self.pattern,
            self.config.row_policy,
        )?;
        let (df, corrected) = correct_values(&output.df, &self.config.corrections)?;
        let unexpected = check_expected_values(&df, &self.config.expected_values)?;

        tracing::info!(
            "Special characters removed from {} values in {:?}",
            output.changed,
            self.config.clean_columns
        );
        self.report.values_cleaned += output.changed;
        self.report.values_corrected += corrected;
        self.report.unexpected_values += unexpected;
        self.record_policy(rows_before, &df, output.warnings);
        self.df = df;
        Ok(self)
    }

    pub fn clean_date(&mut self) -> Result<&mut Self> {
        let (df, _) = clean_date(&self.df, &self.config.date_column)?;
        self.df = df;
        Ok(self)
    }

    pub fn process_date_column(&mut self) -> Result<&mut Self> {
        let rows_before = self.df.height();
        let output = process_date_column(
            &self.df,
            &self.config.date_column,
            &self.config.date_formats,
            self.config.row_policy,
        )?;

        let normalized = output.changed.saturating_sub(output.warnings.len());
        tracing::info!(
            "Date column '{}': {normalized} values re-serialized, {} unparseable",
            self.config.date_column,
            output.warnings.len()
        );
        self.report.dates_normalized += normalized;
        self.record_policy(rows_before, &output.df, output.warnings);
        self.df = output.df;
        Ok(self)
    }

    fn record_policy(&mut self, rows_before: usize, df: &DataFrame, warnings: Vec<ValueWarning>) {
        let dropped = rows_before - df.height();
        if dropped > 0 {
            tracing::warn!("Row policy dropped {dropped} rows with uncleanable values");
        }
        self.report.rows_dropped_by_policy += dropped;
        self.report.warnings.extend(warnings);
    }

    /// Applies every step in order. Stripping and value cleanup can make two
    /// rows equal, so duplicates are swept once more at the end.
    pub fn run(&mut self) -> Result<&RunReport> {
        self.rename_columns()?;
        self.dataset_info()?;
        self.drop_duplicated()?
            .drop_missing()?
            .strip_columns()?
            .clean_values()?
            .clean_date()?
            .process_date_column()?
            .drop_duplicated()?;

        tracing::info!(
            "Cleaning finished: {} rows remain, {} value warnings",
            self.df.height(),
            self.report.warning_count()
        );
        Ok(&self.report)
    }

    /// Writes the current frame to `path` and records the row count.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        save_df(&mut self.df, path.as_ref())?;
        self.report.rows_written = self.df.height();
        Ok(())
    }
}

/// Loads `input`, runs the full pipeline and writes `output`.
///
/// Nothing is written when a fatal error occurs.
pub fn clean_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CleanerConfig,
) -> Result<RunReport> {
    let mut cleaner = DatasetCleaner::load(input, config.clone())?;
    cleaner.run()?;
    cleaner.save(output)?;
    Ok(cleaner.report.clone())
}

#[cfg(test)]
mod tests;
