//! Full-name suggestions built from previously submitted requests

use indexmap::IndexSet;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameAutocomplete {
    names: IndexSet<String>,
}

impl NameAutocomplete {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(Into::into)
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Collect distinct `fullName` values from a relay GET body, first seen
    /// first. Anything other than an array yields no names.
    pub fn from_records(records: &Value) -> Self {
        let Some(records) = records.as_array() else {
            return Self::default();
        };

        Self::new(
            records
                .iter()
                .filter_map(|record| record.get("fullName"))
                .filter_map(Value::as_str),
        )
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Case-insensitive substring match; empty input suggests nothing
    pub fn suggestions(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }

        let needle = input.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_records_dedups_in_order() {
        let records = json!([
            { "fullName": "Bob" },
            { "fullName": "Alice" },
            { "fullName": "Bob" },
            { "fullName": "" },
            { "fullName": null },
            { "branch": "HQ" },
            { "fullName": 42 }
        ]);
        let names = NameAutocomplete::from_records(&records);
        assert_eq!(names.names().collect::<Vec<_>>(), vec!["Bob", "Alice"]);
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_non_array_yields_nothing() {
        assert!(NameAutocomplete::from_records(&json!({ "fullName": "Bob" })).is_empty());
    }

    #[test]
    fn test_suggestions() {
        let names = NameAutocomplete::new(["Syafi Athar", "Athena", "Bob"]);
        assert_eq!(names.suggestions("ath"), vec!["Syafi Athar", "Athena"]);
        assert_eq!(names.suggestions("BOB"), vec!["Bob"]);
        assert!(names.suggestions("").is_empty());
        assert!(names.suggestions("zed").is_empty());
    }
}
