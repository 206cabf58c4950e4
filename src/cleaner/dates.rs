use super::cleaning::{apply_row_policy, require_columns, rewrite_text_column};
use super::types::{RowPolicy, StepOutput, ValueWarning, WarningKind};
use crate::error::Result;
use chrono::{Datelike as _, NaiveDate};
use polars::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

/// Canonical serialization of every processed date.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

const FOUR_DIGIT_YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

#[expect(clippy::unwrap_used)]
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[/.\\-]+\s*").unwrap());

/// Unifies the separators of a raw date string: trims it and collapses every
/// run of `/`, `.`, `-` or `\` (with surrounding whitespace) into one `/`.
pub fn normalize_date_separators(raw: &str) -> String {
    SEPARATOR_RUN.replace_all(raw.trim(), "/").into_owned()
}

/// Parses `value` under the first matching format of `formats`.
///
/// chrono's `%Y` accepts any number of digits, so a parse landing outside
/// the four-digit years is rejected and the next format is tried.
pub fn parse_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            .filter(|date| FOUR_DIGIT_YEARS.contains(&date.year()))
    })
}

/// Normalizes separators in the date column ahead of parsing.
///
/// Values that still do not look like dates are left for
/// [`process_date_column`] to resolve. Returns the number of values changed.
pub fn clean_date(df: &DataFrame, column: &str) -> Result<(DataFrame, usize)> {
    require_columns(df, &[column.to_owned()])?;

    let mut out = df.clone();
    let changed = rewrite_text_column(&mut out, column, |_, value| {
        Some(normalize_date_separators(value))
    })?;

    tracing::info!("[{changed}] values had their separators normalized in the '{column}' column");
    Ok((out, changed))
}

/// Re-serializes every value of the date column as `YYYY-MM-DD`.
///
/// A value no format accepts becomes a [`ValueWarning`] and is resolved with
/// `policy`. Null cells are left alone.
pub fn process_date_column(
    df: &DataFrame,
    column: &str,
    formats: &[String],
    policy: RowPolicy,
) -> Result<StepOutput> {
    require_columns(df, &[column.to_owned()])?;

    let mut out = df.clone();
    let mut warnings = Vec::new();
    let changed = rewrite_text_column(&mut out, column, |row, value| {
        match parse_date(value, formats) {
            Some(date) => Some(date.format(CANONICAL_DATE_FORMAT).to_string()),
            None => {
                tracing::warn!("Unable to parse date: {value}");
                warnings.push(ValueWarning {
                    row,
                    column: column.to_owned(),
                    value: value.to_owned(),
                    kind: WarningKind::UnparseableDate,
                });
                None
            }
        }
    })?;

    let df = apply_row_policy(out, &warnings, policy)?;
    Ok(StepOutput {
        df,
        changed,
        warnings,
    })
}
