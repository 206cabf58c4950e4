use super::naming::canonical_column_name;
use crate::error::{CleanerError, Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Reads a header-first, comma-delimited CSV. `null_values` are read as null
/// in every column, in addition to empty fields.
///
/// Columns whose canonical name is listed in `text_columns` are always read as
/// text, so digit-only values such as `05012020` keep their leading zeros.
///
/// Strict UTF-8 is tried first; if decoding fails the file is read again with
/// lossy decoding so a stray Latin-1 byte does not sink the whole run.
pub fn load_df(path: &Path, null_values: &[String], text_columns: &[String]) -> Result<DataFrame> {
    if !path.exists() {
        tracing::error!("File not found: {}", path.display());
        return Err(CleanerError::NotFound(path.to_path_buf()));
    }

    let df = match read_csv(path, null_values, text_columns, CsvEncoding::Utf8) {
        Ok(df) => df,
        Err(err) => {
            tracing::warn!(
                "Strict UTF-8 read of {} failed ({err}), retrying with lossy decoding",
                path.display()
            );
            read_csv(path, null_values, text_columns, CsvEncoding::LossyUtf8).map_err(|e| {
                tracing::error!("Failed to parse {}: {e}", path.display());
                CleanerError::Parse(format!("{}: {e}", path.display()))
            })?
        }
    };

    tracing::info!(
        "Loaded {}: {} rows, {} columns",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

fn read_csv(
    path: &Path,
    null_values: &[String],
    text_columns: &[String],
    encoding: CsvEncoding,
) -> PolarsResult<DataFrame> {
    let mut parse_options = CsvParseOptions::default().with_encoding(encoding);
    if !null_values.is_empty() {
        parse_options = parse_options.with_null_values(Some(NullValues::AllColumns(
            null_values.iter().map(|v| v.as_str().into()).collect(),
        )));
    }
    let overwrite = text_overwrite(path, &parse_options, text_columns)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .with_schema_overwrite(overwrite)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

/// String dtype for every raw header that canonicalizes into `text_columns`.
fn text_overwrite(
    path: &Path,
    parse_options: &CsvParseOptions,
    text_columns: &[String],
) -> PolarsResult<Option<SchemaRef>> {
    if text_columns.is_empty() {
        return Ok(None);
    }

    let header = CsvReadOptions::default()
        .with_has_header(true)
        .with_n_rows(Some(0))
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options.clone())
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let schema: Schema = header
        .get_column_names()
        .into_iter()
        .filter(|name| {
            let canonical = canonical_column_name(name.as_str());
            text_columns.iter().any(|c| *c == canonical)
        })
        .map(|name| (name.clone(), DataType::String))
        .collect();

    Ok((!schema.is_empty()).then(|| Arc::new(schema)))
}

/// Writes the frame as CSV with a header row.
///
/// The data goes to a temporary file next to `path` which is renamed over the
/// destination once fully written, so a failure never leaves a truncated file.
pub fn save_df(df: &mut DataFrame, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .context(format!("Failed to create temporary file in {}", dir.display()))?;

    CsvWriter::new(tmp.as_file_mut())
        .include_header(true)
        .finish(df)
        .map_err(|e| CleanerError::Io(std::io::Error::other(e.to_string())))
        .context("Failed to write CSV")?;

    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .context(format!("Failed to move output into {}", path.display()))?;

    tracing::info!(
        "Cleaned data file saved at [{}] ({} rows)",
        path.display(),
        df.height()
    );
    Ok(())
}
