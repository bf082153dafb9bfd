//! Validation outcome: blocking errors plus advisory warnings

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Valid exactly when there are no errors; warnings don't count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Record an error; blank messages are ignored
    pub fn add_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        if !error.trim().is_empty() {
            self.errors.push(error);
        }
    }

    pub fn add_errors<I, S>(&mut self, errors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for error in errors {
            self.add_error(error);
        }
    }

    /// Record a warning; blank messages are ignored
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        if !warning.trim().is_empty() {
            self.warnings.push(warning);
        }
    }

    /// One-line summary of every issue, for logs
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.errors.is_empty() {
            parts.push(format!("Errors: {}", self.errors.join(", ")));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("Warnings: {}", self.warnings.join(", ")));
        }

        if parts.is_empty() {
            "No validation issues".to_string()
        } else {
            parts.join("; ")
        }
    }

    /// Split into (errors, warnings)
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.errors, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcome_is_valid() {
        let outcome = ValidationOutcome::new();
        assert!(outcome.is_valid());
        assert_eq!(outcome.summary(), "No validation issues");
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut outcome = ValidationOutcome::new();
        outcome.add_warning("heads up");
        assert!(outcome.is_valid());
        assert_eq!(outcome.warnings(), &["heads up".to_string()]);
    }

    #[test]
    fn test_blank_entries_dropped() {
        let mut outcome = ValidationOutcome::new();
        outcome.add_error("");
        outcome.add_error("   ");
        outcome.add_warning("\t");
        outcome.add_errors(vec!["real problem", " "]);
        assert_eq!(outcome.errors(), &["real problem".to_string()]);
        assert!(outcome.warnings().is_empty());
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_summary_lists_errors_then_warnings() {
        let mut outcome = ValidationOutcome::new();
        outcome.add_error("a");
        outcome.add_error("b");
        outcome.add_warning("c");
        assert_eq!(outcome.summary(), "Errors: a, b; Warnings: c");
    }
}
