use super::error::FeatureError;
use crate::Utils::load_from_file::load_reference_column;

/// element symbols ordered by atomic number, H is 1
const ELEMENT_SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Mapping from atomic number (1-based) to element symbol.
/// Built once and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTable {
    symbols: Vec<String>,
}

impl ElementTable {
    /// full periodic table, elements 1..=118
    pub fn builtin() -> Self {
        Self {
            symbols: ELEMENT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
    /// table from symbols ordered by atomic number
    pub fn from_symbols(symbols: Vec<String>) -> Result<Self, FeatureError> {
        if symbols.is_empty() {
            return Err(FeatureError::Load("element table is empty".to_string()));
        }
        Ok(Self { symbols })
    }
    /// Reads elements.csv: a header row, then one symbol per row in order of atomic number
    pub fn from_csv_file(file_name: &str) -> Result<Self, FeatureError> {
        let rows = load_reference_column(file_name).map_err(FeatureError::Load)?;
        Self::from_symbols(rows.into_iter().map(|(_, symbol)| symbol).collect())
    }

    pub fn symbol(&self, atomic_number: u32) -> Option<&str> {
        if atomic_number == 0 {
            return None;
        }
        self.symbols
            .get(atomic_number as usize - 1)
            .map(|s| s.as_str())
    }

    pub fn atomic_number(&self, symbol: &str) -> Option<u32> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .map(|i| i as u32 + 1)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::builtin()
    }
}
