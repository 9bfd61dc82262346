use super::error::FeatureError;
use crate::Utils::load_from_file::load_reference_column;
use prettytable::{Cell, Row, Table};
use std::collections::HashMap;

/// Ordered set of bond tokens ("C-H", "C=O", "C." ...).
/// The position of a token is the index of its slot in every feature vector,
/// so the order of the catalog must never change during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BondCatalog {
    tokens: Vec<String>,
    positions: HashMap<String, usize>,
}

impl BondCatalog {
    pub fn new(tokens: Vec<String>) -> Result<Self, FeatureError> {
        if tokens.is_empty() {
            return Err(FeatureError::Catalog("bond catalog is empty".to_string()));
        }
        let mut positions = HashMap::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if let Some(first) = positions.insert(token.clone(), i) {
                return Err(FeatureError::Catalog(format!(
                    "token '{}' appears twice (positions {} and {})",
                    token, first, i
                )));
            }
        }
        Ok(Self { tokens, positions })
    }
    /// Reads bonds.csv: a header row, then one bond token per row
    pub fn from_csv_file(file_name: &str) -> Result<Self, FeatureError> {
        let rows = load_reference_column(file_name).map_err(FeatureError::Load)?;
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (line, token) in rows.iter() {
            if let Some(first_line) = seen.insert(token.as_str(), *line) {
                return Err(FeatureError::Catalog(format!(
                    "token '{}' in '{}' at line {} duplicates line {}",
                    token, file_name, line, first_line
                )));
            }
        }
        Self::new(rows.into_iter().map(|(_, token)| token).collect())
    }

    pub fn position(&self, token: &str) -> Option<usize> {
        self.positions.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.positions.contains_key(token)
    }

    pub fn token(&self, position: usize) -> Option<&str> {
        self.tokens.get(position).map(|t| t.as_str())
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("Index"), Cell::new("Bond")]));
        for (i, token) in self.tokens.iter().enumerate() {
            table.add_row(Row::new(vec![Cell::new(&i.to_string()), Cell::new(token)]));
        }
        table.printstd();
    }
}
