//! Pipeline configuration.
//!
//! Every field has a default tuned for the student performance dataset, so a
//! JSON config file only needs to list the fields it overrides.

use crate::cleaner::RowPolicy;
use crate::error::{CleanerError, Result, ResultExt as _};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Accepted input date formats, tried in order. The first format that parses wins.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // canonical output
    "%d/%m/%Y",
    "%d%m%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%Y%m%d",
];

/// Strings read as null when loading the CSV (the empty field is always null).
pub const DEFAULT_NULL_VALUES: &[&str] = &["?", "NA", "n/a", "na", "Null", "NaN", "#####"];

/// Characters stripped from categorical columns: anything that is not a
/// letter, digit, whitespace, slash or apostrophe.
pub const DEFAULT_CLEAN_PATTERN: &str = r"[^A-Za-z0-9\s/']";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Cell values read as null at load time
    pub null_values: Vec<String>,
    /// Canonical column names the dataset is expected to carry (warning only)
    pub expected_columns: Vec<String>,
    /// Columns ignored when dropping rows with missing values
    pub exclude_from_missing: Vec<String>,
    /// Columns whose values are stripped of `clean_pattern` matches
    pub clean_columns: Vec<String>,
    /// Regex matching the characters to remove from `clean_columns`
    pub clean_pattern: String,
    /// column -> canonical value -> accepted variants
    pub corrections: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    /// column -> vocabulary the cleaned values should belong to
    pub expected_values: BTreeMap<String, Vec<String>>,
    /// Column holding the dates to normalize
    pub date_column: String,
    /// Ordered input formats (chrono `strftime` syntax)
    pub date_formats: Vec<String>,
    /// What happens to rows whose values cannot be cleaned
    pub row_policy: RowPolicy,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            null_values: to_strings(DEFAULT_NULL_VALUES),
            expected_columns: to_strings(&[
                "gender",
                "race_ethnicity",
                "parental_level_of_education",
                "lunch",
                "test_preparation_course",
                "math_score",
                "reading_score",
                "writing_score",
                "date",
            ]),
            exclude_from_missing: Vec::new(),
            clean_columns: to_strings(&[
                "gender",
                "race_ethnicity",
                "parental_level_of_education",
                "lunch",
                "test_preparation_course",
            ]),
            clean_pattern: DEFAULT_CLEAN_PATTERN.to_owned(),
            corrections: default_corrections(),
            expected_values: default_expected_values(),
            date_column: "date".to_owned(),
            date_formats: to_strings(DEFAULT_DATE_FORMATS),
            row_policy: RowPolicy::default(),
        }
    }
}

impl CleanerConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CleanerError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the parts of the configuration that can be wrong before any data is read.
    pub fn validate(&self) -> Result<()> {
        self.compile_pattern()?;
        if self.date_formats.is_empty() {
            return Err(CleanerError::Config(
                "date_formats must list at least one format".to_owned(),
            ));
        }
        if self.date_column.trim().is_empty() {
            return Err(CleanerError::Config("date_column must not be empty".to_owned()));
        }
        Ok(())
    }

    pub fn compile_pattern(&self) -> Result<Regex> {
        Ok(Regex::new(&self.clean_pattern)?)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

fn default_corrections() -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
    let mut gender = BTreeMap::new();
    gender.insert("female".to_owned(), to_strings(&["F", "f", "Fe", "fe"]));
    gender.insert("male".to_owned(), to_strings(&["M", "m", "Ma", "ma"]));

    let mut race = BTreeMap::new();
    for group in ['A', 'B', 'C', 'D', 'E'] {
        let lower = group.to_ascii_lowercase();
        race.insert(
            format!("group {group}"),
            vec![
                group.to_string(),
                lower.to_string(),
                format!("group{group}"),
                format!("group{lower}"),
                format!("group {lower}"),
            ],
        );
    }

    // "free/???" and "free/\reduced" arrive here already stripped by the clean pattern
    let mut lunch = BTreeMap::new();
    lunch.insert("free/reduced".to_owned(), to_strings(&["free/", "free"]));

    let mut corrections = BTreeMap::new();
    corrections.insert("gender".to_owned(), gender);
    corrections.insert("race_ethnicity".to_owned(), race);
    corrections.insert("lunch".to_owned(), lunch);
    corrections
}

fn default_expected_values() -> BTreeMap<String, Vec<String>> {
    let mut expected = BTreeMap::new();
    expected.insert("gender".to_owned(), to_strings(&["female", "male"]));
    expected.insert(
        "race_ethnicity".to_owned(),
        to_strings(&["group A", "group B", "group C", "group D", "group E"]),
    );
    expected.insert(
        "parental_level_of_education".to_owned(),
        to_strings(&[
            "some high school",
            "high school",
            "some college",
            "associate's degree",
            "bachelor's degree",
            "master's degree",
        ]),
    );
    expected.insert(
        "test_preparation_course".to_owned(),
        to_strings(&["none", "completed"]),
    );
    expected.insert("lunch".to_owned(), to_strings(&["free/reduced", "standard"]));
    expected
}
