use super::{names, strings};
use crate::cleaner::*;
use crate::config::DEFAULT_NULL_VALUES;
use crate::error::CleanerError;
use anyhow::Result;
use polars::prelude::*;

fn null_values() -> Vec<String> {
    DEFAULT_NULL_VALUES.iter().map(|v| (*v).to_owned()).collect()
}

#[test]
fn test_load_df_missing_file() {
    let err = load_df(std::path::Path::new("no/such/file.csv"), &null_values(), &[]).unwrap_err();
    assert!(matches!(err, CleanerError::NotFound(_)));
}

#[test]
fn test_load_df_reads_null_sentinels() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("input.csv");
    std::fs::write(
        &path,
        "Gender,math score,lunch\nfemale,72,standard\nmale,?,NA\nfemale,,n/a\n",
    )?;

    let df = load_df(&path, &null_values(), &[])?;
    assert_eq!(names(&df), vec!["Gender", "math score", "lunch"]);
    assert_eq!(df.height(), 3);
    assert_eq!(df.column("math score")?.null_count(), 2);
    assert_eq!(df.column("lunch")?.null_count(), 2);
    Ok(())
}

#[test]
fn test_load_df_reads_text_columns_as_strings() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("input.csv");
    std::fs::write(&path, "Date,math score\n05012020,72\n15032020,69\n")?;

    let df = load_df(&path, &null_values(), &["date".to_owned()])?;
    assert_eq!(df.column("Date")?.dtype(), &DataType::String);
    assert_eq!(
        strings(&df, "Date"),
        vec![Some("05012020".to_owned()), Some("15032020".to_owned())]
    );
    // other columns keep their inferred type
    assert_eq!(df.column("math score")?.dtype(), &DataType::Int64);
    Ok(())
}

#[test]
fn test_save_df_writes_header_and_rows() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.csv");
    let mut df = df!(
        "gender" => &["female", "male"],
        "date" => &["2020-01-05", "2020-03-15"]
    )?;

    save_df(&mut df, &path)?;
    let content = std::fs::read_to_string(&path)?;
    assert_eq!(content, "gender,date\nfemale,2020-01-05\nmale,2020-03-15\n");

    // only the output file is left behind in the directory
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);

    let reloaded = load_df(&path, &null_values(), &[])?;
    assert_eq!(strings(&reloaded, "gender"), strings(&df, "gender"));
    Ok(())
}

#[test]
fn test_save_df_unwritable_destination() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing_dir").join("out.csv");
    let mut df = df!("gender" => &["female"])?;

    let err = save_df(&mut df, &path).unwrap_err();
    assert!(matches!(err, CleanerError::Io(_)));
    assert!(!path.exists());
    Ok(())
}
