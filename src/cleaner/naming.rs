use crate::error::{CleanerError, Result};
use std::collections::HashMap;

/// Canonical form of a column header: trimmed, lowercase, runs of
/// non-alphanumeric characters collapsed to a single underscore.
pub fn canonical_column_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    // Replace non-alphanumeric with underscore, collapsing runs
    let mut result = String::with_capacity(lowered.len());
    let mut last_was_underscore = false;
    for c in lowered.chars() {
        if c.is_alphanumeric() {
            result.push(c);
            last_was_underscore = false;
        } else if !last_was_underscore {
            result.push('_');
            last_was_underscore = true;
        }
    }

    let result = result.trim_matches('_');

    if result.is_empty() {
        "col".to_owned()
    } else if result.starts_with(|c: char| c.is_ascii_digit()) {
        format!("col_{result}")
    } else {
        result.to_owned()
    }
}

/// Canonicalizes every name, failing if two distinct headers end up with the same name.
pub fn canonical_column_names(names: &[String]) -> Result<Vec<String>> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(names.len());
    let mut canonical = Vec::with_capacity(names.len());

    for name in names {
        let clean = canonical_column_name(name);
        if let Some(previous) = seen.insert(clean.clone(), name.as_str()) {
            return Err(CleanerError::Schema(format!(
                "columns '{previous}' and '{name}' both canonicalize to '{clean}'"
            )));
        }
        canonical.push(clean);
    }
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_canonical_names() {
        assert_eq!(canonical_column_name(" Gender "), "gender");
        assert_eq!(canonical_column_name("race/ethnicity"), "race_ethnicity");
        assert_eq!(
            canonical_column_name("parental level of education"),
            "parental_level_of_education"
        );
        assert_eq!(canonical_column_name("Math  Score"), "math_score");
        assert_eq!(canonical_column_name("2nd try"), "col_2nd_try");
        assert_eq!(canonical_column_name("???"), "col");
    }

    #[test]
    fn test_canonical_name_is_idempotent() {
        for raw in ["  Test Preparation-Course ", "2nd try", "Date", "a__b", "???"] {
            let once = canonical_column_name(raw);
            assert_eq!(canonical_column_name(&once), once);
        }
    }

    #[test]
    fn test_collision_is_schema_error() {
        let names = vec!["Math Score".to_owned(), "math_score".to_owned()];
        let err = canonical_column_names(&names).unwrap_err();
        assert!(matches!(err, CleanerError::Schema(_)));
    }

    #[test]
    fn test_distinct_names_pass() {
        let names = vec!["Gender".to_owned(), "Date".to_owned()];
        assert_eq!(canonical_column_names(&names).unwrap(), vec!["gender", "date"]);
    }
}
