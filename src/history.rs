use std::fmt;

/// Descriptions starting with this token represent a failure and are never
/// recorded.
pub const ERROR_MARKER: &str = "Error:";

/// Append-only log of successful transaction descriptions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn record(&mut self, description: impl Into<String>) {
        let description = description.into();
        if description.starts_with(ERROR_MARKER) {
            return;
        }
        self.entries.push(description);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut history = History::default();
        history.record("Initial Deposit $100.000");
        history.record("Deposit $50.000".to_string());
        assert_eq!(
            history.entries(),
            ["Initial Deposit $100.000", "Deposit $50.000"]
        );
        assert_eq!(
            history.to_string(),
            "Initial Deposit $100.000, Deposit $50.000"
        );
    }

    #[test]
    fn skips_error_entries() {
        let mut history = History::default();
        history.record("Error: Insufficient funds for A.");
        assert!(history.is_empty());
        // error marker only counts at the start of the entry
        history.record("Deposit Error: $1.000");
        assert_eq!(history.len(), 1);
    }
}
