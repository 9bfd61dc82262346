//! Structure of a single species as needed for bond extraction, and its
//! construction from a PubChem "record/json" response.
//!
//! PubChem layout used here:
//! ```text
//! PC_Compounds[0].atoms.aid        atom ids, 1..n
//! PC_Compounds[0].atoms.element    atomic numbers
//! PC_Compounds[0].atoms.radical    optional [{ "aid": .., "type": .. }]
//! PC_Compounds[0].bonds.aid1/aid2  atom ids of every bond
//! PC_Compounds[0].bonds.order      bond orders
//! ```
use super::elements::ElementTable;
use super::error::FeatureError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    pub index: usize,
    pub symbol: String,
}

/// bond between atoms `atom1` and `atom2` (1-based positions in the atom list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondEntry {
    pub atom1: usize,
    pub atom2: usize,
    pub order: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MolecularRecord {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<BondEntry>,
    /// 1-based position of the radical atom
    pub radical_atom: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct PubChemResponse {
    #[serde(rename = "PC_Compounds")]
    compounds: Vec<PubChemCompound>,
}

#[derive(Debug, Deserialize)]
struct PubChemCompound {
    atoms: PubChemAtoms,
    #[serde(default)]
    bonds: Option<PubChemBonds>,
}

#[derive(Debug, Deserialize)]
struct PubChemAtoms {
    aid: Vec<usize>,
    element: Vec<u32>,
    #[serde(default)]
    radical: Option<Vec<PubChemRadical>>,
}

#[derive(Debug, Deserialize)]
struct PubChemRadical {
    aid: usize,
}

#[derive(Debug, Deserialize)]
struct PubChemBonds {
    aid1: Vec<usize>,
    aid2: Vec<usize>,
    order: Vec<u8>,
}

impl MolecularRecord {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<BondEntry>, radical_atom: Option<usize>) -> Self {
        Self {
            atoms,
            bonds,
            radical_atom,
        }
    }
    /// Shorthand for tests and hand-made records: atoms are numbered 1..n in the given order
    pub fn from_symbols(
        symbols: &[&str],
        bonds: &[(usize, usize, u8)],
        radical_atom: Option<usize>,
    ) -> Self {
        let atoms = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| Atom {
                index: i + 1,
                symbol: s.to_string(),
            })
            .collect();
        let bonds = bonds
            .iter()
            .map(|&(atom1, atom2, order)| BondEntry {
                atom1,
                atom2,
                order,
            })
            .collect();
        Self::new(atoms, bonds, radical_atom)
    }
    /// Parses stringified PubChem JSON. Only the first compound of the response is used.
    pub fn from_pubchem_json(text: &str, elements: &ElementTable) -> Result<Self, FeatureError> {
        let response: PubChemResponse =
            serde_json::from_str(text).map_err(|e| FeatureError::Parse(e.to_string()))?;
        let compound = response
            .compounds
            .into_iter()
            .next()
            .ok_or_else(|| FeatureError::Parse("PC_Compounds is empty".to_string()))?;

        let atoms_data = compound.atoms;
        if atoms_data.aid.len() != atoms_data.element.len() {
            return Err(FeatureError::malformed(format!(
                "{} atom ids but {} elements",
                atoms_data.aid.len(),
                atoms_data.element.len()
            )));
        }
        let mut atoms = Vec::with_capacity(atoms_data.aid.len());
        for (&index, &atomic_number) in atoms_data.aid.iter().zip(atoms_data.element.iter()) {
            let symbol = elements
                .symbol(atomic_number)
                .ok_or(FeatureError::UnknownElement(atomic_number))?;
            atoms.push(Atom {
                index,
                symbol: symbol.to_string(),
            });
        }

        let bonds = match compound.bonds {
            Some(b) => {
                if b.aid1.len() != b.aid2.len() || b.aid1.len() != b.order.len() {
                    return Err(FeatureError::malformed(format!(
                        "bond arrays differ in length: aid1 {}, aid2 {}, order {}",
                        b.aid1.len(),
                        b.aid2.len(),
                        b.order.len()
                    )));
                }
                b.aid1
                    .iter()
                    .zip(b.aid2.iter())
                    .zip(b.order.iter())
                    .map(|((&atom1, &atom2), &order)| BondEntry {
                        atom1,
                        atom2,
                        order,
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let radical_atom = atoms_data
            .radical
            .and_then(|radicals| radicals.first().map(|r| r.aid));

        Ok(Self::new(atoms, bonds, radical_atom))
    }

    pub fn has_bonds(&self) -> bool {
        !self.bonds.is_empty()
    }
}
