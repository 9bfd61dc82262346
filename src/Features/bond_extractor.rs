use super::error::FeatureError;
use super::molecular_record::MolecularRecord;

/// symbolic bond: two element symbols joined by a connector ("C-H", "C=O", "C#N"),
/// or an element symbol followed by "." for a radical atom
pub type BondToken = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
}

impl BondOrder {
    pub fn connector(&self) -> &'static str {
        match self {
            BondOrder::Single => "-",
            BondOrder::Double => "=",
            BondOrder::Triple => "#",
        }
    }
}

impl TryFrom<u8> for BondOrder {
    type Error = FeatureError;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        match order {
            1 => Ok(BondOrder::Single),
            2 => Ok(BondOrder::Double),
            3 => Ok(BondOrder::Triple),
            _ => Err(FeatureError::malformed(format!(
                "unsupported bond order {}",
                order
            ))),
        }
    }
}

/// Turns every bond of the record into a token, in the order of the bond list.
/// The two symbols keep the order of the bond entry, so "C-H" and "H-C" are different tokens.
/// A radical atom adds one more token "<symbol>.".
pub fn extract_bonds(record: &MolecularRecord) -> Result<Vec<BondToken>, FeatureError> {
    let mut tokens = Vec::with_capacity(record.bonds.len() + 1);
    for bond in record.bonds.iter() {
        let first = atom_symbol(record, bond.atom1)?;
        let second = atom_symbol(record, bond.atom2)?;
        let order = BondOrder::try_from(bond.order)?;
        tokens.push(format!("{}{}{}", first, order.connector(), second));
    }
    if let Some(radical) = record.radical_atom {
        tokens.push(format!("{}.", atom_symbol(record, radical)?));
    }
    Ok(tokens)
}

// atom indices are 1-based positions in the atom list
fn atom_symbol(record: &MolecularRecord, index: usize) -> Result<&str, FeatureError> {
    if index == 0 || index > record.atoms.len() {
        return Err(FeatureError::malformed(format!(
            "atom index {} is out of range 1..={}",
            index,
            record.atoms.len()
        )));
    }
    Ok(record.atoms[index - 1].symbol.as_str())
}
