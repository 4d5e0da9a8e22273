//! Builder for PRTG query parameters.
//!
//! PRTG takes every argument, including credentials and filters, as URL query
//! parameters. This module collects them with helpers for the filter syntax
//! the table endpoints understand (notably the `@sub(...)` substring match).

use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append a PRTG substring filter (`@sub(value)`).
    pub fn push_substring(&mut self, key: &'static str, value: &str) {
        self.pairs.push((key, format!("@sub({value})")));
    }

    /// Append the pairs of another builder.
    pub fn extend(&mut self, other: QueryParams) {
        self.pairs.extend(other.pairs);
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Borrow the collected key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn push_collects_pairs_in_order() {
        let mut params = QueryParams::new();
        params.push("content", "probes");
        params.push("filter_parentid", 0);
        assert_eq!(
            params.into_pairs(),
            vec![
                ("content", "probes".to_string()),
                ("filter_parentid", "0".to_string()),
            ]
        );
    }

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("id", Option::<u64>::None);
        assert!(params.is_empty());
    }

    #[test]
    fn push_opt_includes_some() {
        let mut params = QueryParams::new();
        params.push_opt("id", Some(40u64));
        assert_eq!(params.into_pairs(), vec![("id", "40".to_string())]);
    }

    #[test]
    fn push_substring_wraps_value() {
        let mut params = QueryParams::new();
        params.push_substring("filter_name", "edge");
        assert_eq!(
            params.into_pairs(),
            vec![("filter_name", "@sub(edge)".to_string())]
        );
    }

    #[test]
    fn extend_appends_other_builder() {
        let mut auth = QueryParams::new();
        auth.push("username", "admin");

        let mut params = QueryParams::new();
        params.push("content", "groups");
        params.extend(auth);

        assert_eq!(params.pairs().len(), 2);
        assert_eq!(params.pairs()[1].0, "username");
    }
}
