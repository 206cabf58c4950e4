use super::naming::canonical_column_names;
use super::types::{RowPolicy, StepOutput, ValueWarning, WarningKind};
use crate::error::{CleanerError, Result};
use polars::prelude::*;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Renames every column to its canonical form. A no-op on canonical names.
pub fn rename_columns(df: &DataFrame) -> Result<DataFrame> {
    let old_names = column_names(df);
    let new_names = canonical_column_names(&old_names)?;

    let mut df = df.clone();
    df.set_column_names(new_names)?;
    Ok(df)
}

/// Drops rows equal to an earlier row across every column, keeping the first.
pub fn drop_duplicated(df: &DataFrame) -> Result<DataFrame> {
    if df.width() == 0 {
        return Ok(df.clone());
    }
    Ok(df.unique_stable(None, UniqueKeepStrategy::First, None)?)
}

/// Drops every row holding a null, empty or whitespace-only cell in a column
/// that is not listed in `exclude`.
pub fn drop_missing(df: &DataFrame, exclude: &[String]) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];

    for column in df.get_columns() {
        if exclude.iter().any(|e| e == column.name().as_str()) {
            continue;
        }
        let series = column.as_materialized_series();
        if is_text(series) {
            for (keep_row, value) in keep.iter_mut().zip(series.str()?) {
                if value.is_none_or(|v| v.trim().is_empty()) {
                    *keep_row = false;
                }
            }
        } else {
            for (keep_row, is_null) in keep.iter_mut().zip(&series.is_null()) {
                if is_null.unwrap_or(false) {
                    *keep_row = false;
                }
            }
        }
    }

    let mask: BooleanChunked = keep.into_iter().collect();
    Ok(df.filter(&mask)?)
}

/// Trims leading and trailing whitespace in every text column.
///
/// Returns the frame and, per column, how many values were changed.
pub fn strip_columns(df: &DataFrame) -> Result<(DataFrame, BTreeMap<String, usize>)> {
    let mut out = df.clone();
    let mut stripped = BTreeMap::new();

    for name in text_columns(df) {
        let changed = rewrite_text_column(&mut out, &name, |_, value| Some(value.trim().to_owned()))?;
        stripped.insert(name, changed);
    }
    Ok((out, stripped))
}

/// Removes every match of `pattern` from the values of the target columns.
/// Cleaned values are re-trimmed so the output stays stripped.
///
/// A value left empty by the removal is reported as a [`ValueWarning`] and
/// resolved with `policy`.
pub fn clean_values(
    df: &DataFrame,
    columns: &[String],
    pattern: &Regex,
    policy: RowPolicy,
) -> Result<StepOutput> {
    require_columns(df, columns)?;

    let mut out = df.clone();
    let mut changed = 0;
    let mut warnings = Vec::new();

    for name in columns {
        if !is_text(out.column(name)?.as_materialized_series()) {
            tracing::debug!("Column [{name}] is not textual, special character cleanup skipped");
            continue;
        }
        changed += rewrite_text_column(&mut out, name, |row, value| {
            let cleaned = pattern.replace_all(value, "");
            if cleaned.trim().is_empty() {
                tracing::warn!("Value [{value}] in column [{name}] is empty after cleaning");
                warnings.push(ValueWarning {
                    row,
                    column: name.clone(),
                    value: value.to_owned(),
                    kind: WarningKind::EmptiedByCleaning,
                });
                None
            } else {
                Some(cleaned.trim().to_owned())
            }
        })?;
    }

    let df = apply_row_policy(out, &warnings, policy)?;
    Ok(StepOutput {
        df,
        changed,
        warnings,
    })
}

/// Replaces known variants with their canonical value, per column.
///
/// `corrections` maps column -> canonical value -> variants. Columns missing
/// from the frame are skipped with a warning.
pub fn correct_values(
    df: &DataFrame,
    corrections: &BTreeMap<String, BTreeMap<String, Vec<String>>>,
) -> Result<(DataFrame, usize)> {
    let mut out = df.clone();
    let mut corrected = 0;

    for (name, mapping) in corrections {
        let Ok(column) = out.column(name) else {
            tracing::warn!("Column [{name}] not found in the dataset, corrections skipped");
            continue;
        };
        if !is_text(column.as_materialized_series()) {
            continue;
        }

        let lookup: HashMap<&str, &str> = mapping
            .iter()
            .flat_map(|(canonical, variants)| {
                variants.iter().map(move |v| (v.as_str(), canonical.as_str()))
            })
            .collect();

        let changed = rewrite_text_column(&mut out, name, |_, value| {
            Some(lookup.get(value).copied().unwrap_or(value).trim().to_owned())
        })?;
        tracing::info!("Column [{name}]: {changed} values corrected");
        corrected += changed;
    }
    Ok((out, corrected))
}

/// Logs the values of each configured column that fall outside its expected
/// vocabulary and returns how many distinct unexpected values were found.
pub fn check_expected_values(
    df: &DataFrame,
    expected: &BTreeMap<String, Vec<String>>,
) -> Result<usize> {
    let mut total = 0;

    for (name, allowed) in expected {
        let Ok(column) = df.column(name) else {
            continue;
        };
        let series = column.as_materialized_series();
        if !is_text(series) {
            continue;
        }

        let allowed: HashSet<&str> = allowed.iter().map(String::as_str).collect();
        let unexpected: BTreeSet<&str> = series
            .str()?
            .into_iter()
            .flatten()
            .filter(|v| !allowed.contains(v))
            .collect();

        if !unexpected.is_empty() {
            tracing::warn!(
                "Unexpected values found in [{name}] column after cleaning: {unexpected:?}"
            );
            total += unexpected.len();
        }
    }
    Ok(total)
}

/// Applies the row policy to every row or cell named by `warnings`.
pub(crate) fn apply_row_policy(
    df: DataFrame,
    warnings: &[ValueWarning],
    policy: RowPolicy,
) -> Result<DataFrame> {
    if warnings.is_empty() {
        return Ok(df);
    }

    match policy {
        RowPolicy::DropRow => {
            let rows: HashSet<usize> = warnings.iter().map(|w| w.row).collect();
            let mask: BooleanChunked = (0..df.height()).map(|i| !rows.contains(&i)).collect();
            Ok(df.filter(&mask)?)
        }
        // rewrite_text_column already wrote null into the offending cells
        RowPolicy::NullCell => Ok(df),
    }
}

/// Rewrites every non-null value of a column as text.
///
/// `f` receives the row index and the current value; returning `None` clears
/// the cell. Returns the number of cells whose value changed.
pub(crate) fn rewrite_text_column<F>(df: &mut DataFrame, name: &str, mut f: F) -> Result<usize>
where
    F: FnMut(usize, &str) -> Option<String>,
{
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;

    let mut changed = 0;
    let values: Vec<Option<String>> = series
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.and_then(|v| {
                let new = f(row, v);
                if new.as_deref() != Some(v) {
                    changed += 1;
                }
                new
            })
        })
        .collect();

    df.with_column(Series::new(series.name().clone(), values))?;
    Ok(changed)
}

pub(crate) fn require_columns(df: &DataFrame, columns: &[String]) -> Result<()> {
    for name in columns {
        if df.column(name).is_err() {
            return Err(CleanerError::Schema(format!(
                "column '{name}' not found in dataset (available: {})",
                column_names(df).join(", ")
            )));
        }
    }
    Ok(())
}

pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect()
}

fn text_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().to_string())
        .collect()
}

fn is_text(series: &Series) -> bool {
    series.dtype() == &DataType::String
}
