use super::{names, strings};
use crate::cleaner::*;
use crate::config::CleanerConfig;
use anyhow::Result;
use polars::prelude::*;

fn messy_frame() -> Result<DataFrame> {
    Ok(df!(
        " Gender " => &[" Male ", "female", "female", "F", "male ", "female"],
        "Lunch" => &["standard", "free/\\reduced", "free/\\reduced", "standard", "", "free/???"],
        "Math Score" => &[69, 72, 72, 71, 50, 40],
        "Date" => &["2020/01/05", "15.03.2020", "15.03.2020", "2020//03//15", "01/02/2020", "nope"]
    )?)
}

fn config() -> CleanerConfig {
    CleanerConfig {
        expected_columns: vec![],
        clean_columns: vec!["gender".to_owned(), "lunch".to_owned()],
        ..CleanerConfig::default()
    }
}

#[test]
fn test_full_run_scenario() -> Result<()> {
    let mut cleaner = DatasetCleaner::new(messy_frame()?, config())?;
    let report = cleaner.run()?.clone();
    let df = cleaner.dataset();

    assert_eq!(names(df), vec!["gender", "lunch", "math_score", "date"]);
    assert_eq!(
        strings(df, "gender"),
        vec![
            Some("Male".to_owned()),
            Some("female".to_owned()),
            Some("female".to_owned())
        ]
    );
    assert_eq!(
        strings(df, "date"),
        vec![
            Some("2020-01-05".to_owned()),
            Some("2020-03-15".to_owned()),
            Some("2020-03-15".to_owned())
        ]
    );
    assert_eq!(
        strings(df, "lunch"),
        vec![
            Some("standard".to_owned()),
            Some("free/reduced".to_owned()),
            Some("standard".to_owned())
        ]
    );

    assert_eq!(report.rows_loaded, 6);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.missing_removed, 1);
    assert_eq!(report.rows_dropped_by_policy, 1);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.columns_renamed, 4);
    Ok(())
}

#[test]
fn test_pipeline_is_fixed_point() -> Result<()> {
    let mut first = DatasetCleaner::new(messy_frame()?, config())?;
    first.run()?;
    let once = first.into_dataset();

    let mut second = DatasetCleaner::new(once.clone(), config())?;
    let report = second.run()?.clone();
    let twice = second.into_dataset();

    assert!(twice.equals(&once));
    assert_eq!(report.duplicates_removed, 0);
    assert_eq!(report.missing_removed, 0);
    assert_eq!(report.rows_dropped_by_policy, 0);
    assert_eq!(report.columns_renamed, 0);
    Ok(())
}

#[test]
fn test_characters_next_to_spaces_reach_fixed_point() -> Result<()> {
    let df = df!(
        "gender" => &["female .", "- male"],
        "lunch" => &["standard", "free/reduced !"],
        "date" => &["2020-01-05", "05012020"]
    )?;

    let mut first = DatasetCleaner::new(df, config())?;
    first.run()?;
    let once = first.into_dataset();
    assert_eq!(
        strings(&once, "gender"),
        vec![Some("female".to_owned()), Some("male".to_owned())]
    );
    assert_eq!(
        strings(&once, "lunch"),
        vec![Some("standard".to_owned()), Some("free/reduced".to_owned())]
    );

    let mut second = DatasetCleaner::new(once.clone(), config())?;
    let report = second.run()?.clone();
    assert!(second.into_dataset().equals(&once));
    assert_eq!(report.values_stripped, 0);
    assert_eq!(report.values_cleaned, 0);
    Ok(())
}

#[test]
fn test_rows_equal_after_stripping_are_swept() -> Result<()> {
    let df = df!(
        "gender" => &["female", " female "],
        "lunch" => &["standard", "standard"],
        "date" => &["2020-01-05", "05.01.2020"]
    )?;

    let mut cleaner = DatasetCleaner::new(df, config())?;
    cleaner.run()?;
    assert_eq!(cleaner.dataset().height(), 1);
    Ok(())
}

#[test]
fn test_failed_step_leaves_frame_untouched() -> Result<()> {
    let config = CleanerConfig {
        clean_columns: vec!["meal".to_owned()],
        ..config()
    };
    let mut cleaner = DatasetCleaner::new(messy_frame()?, config)?;
    cleaner.rename_columns()?;
    let before = cleaner.dataset().clone();

    assert!(cleaner.clean_values().is_err());
    assert!(cleaner.dataset().equals(&before));
    Ok(())
}
