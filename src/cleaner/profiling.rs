use super::cleaning::{column_names, drop_duplicated};
use super::types::DatasetInfo;
use crate::error::Result;
use polars::prelude::*;

/// Shape, dtypes, null counts and duplicate count of a frame.
pub fn dataset_info(df: &DataFrame) -> Result<DatasetInfo> {
    let dtypes = df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.dtype().to_string()))
        .collect();

    let null_counts = df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect();

    let duplicated_rows = df.height() - drop_duplicated(df)?.height();

    Ok(DatasetInfo {
        rows: df.height(),
        columns: df.width(),
        column_names: column_names(df),
        dtypes,
        null_counts,
        duplicated_rows,
    })
}

/// Logs a profile of the frame at info level.
pub fn log_dataset_info(info: &DatasetInfo) {
    tracing::info!(
        "Dataset Shape: Rows [{}] : Columns [{}]",
        info.rows,
        info.columns
    );
    tracing::info!("Column Names: {:?}", info.column_names);
    tracing::info!("Column Data Types: {:?}", info.dtypes);

    let missing: Vec<_> = info.null_counts.iter().filter(|(_, n)| **n > 0).collect();
    tracing::info!("Missing values: {missing:?}");
    tracing::info!(
        "Duplicated rows: the dataset has {} duplicated rows.",
        info.duplicated_rows
    );
}
