use std::collections::HashMap;

/// One untyped record from a tabular upstream file: header -> cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new(cells: HashMap<String, String>) -> Self {
        Self { cells }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trimmed cell text; blank cells read as absent.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Cell coerced to a finite number; blanks and junk read as absent.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.text(column)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
