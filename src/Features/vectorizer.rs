//! # Feature vectors of species and reactions
//!
//! A species feature vector counts how many bonds of every catalog type the species has.
//! A reaction feature vector is the bond change: sum of product vectors minus sum of
//! reactant vectors.
//!
//! Species are identified by [`SpeciesIdentity`]. Besides real PubChem compounds there are
//! special cases: the artificial ·CH radical fragment (fixed vector), a catalyst (zero vector)
//! and placeholders for reactants or products without known structure (no vector at all,
//! which makes the whole reaction undefined).
use super::bond_catalog::BondCatalog;
use super::bond_extractor::{BondToken, extract_bonds};
use super::elements::ElementTable;
use super::error::FeatureError;
use super::molecular_record::MolecularRecord;
use log::debug;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// tokens of the artificial ·CH radical fragment
pub const RADICAL_FRAGMENT_TOKENS: [&str; 2] = ["C-H", "C."];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesIdentity {
    /// PubChem CID
    Real(u64),
    RadicalFragment,
    Catalyst,
    MissingReactant,
    MissingProduct,
}

impl SpeciesIdentity {
    /// Legacy numeric codes of the species tables: positive numbers are CIDs,
    /// -1 radical fragment, -2 catalyst, -3 missing reactant, -4 missing product.
    pub fn from_legacy_code(code: i64) -> Option<Self> {
        match code {
            c if c > 0 => Some(SpeciesIdentity::Real(c as u64)),
            -1 => Some(SpeciesIdentity::RadicalFragment),
            -2 => Some(SpeciesIdentity::Catalyst),
            -3 => Some(SpeciesIdentity::MissingReactant),
            -4 => Some(SpeciesIdentity::MissingProduct),
            _ => None,
        }
    }

    /// `None` for a CID beyond `i64::MAX`
    pub fn legacy_code(&self) -> Option<i64> {
        match self {
            SpeciesIdentity::Real(cid) => i64::try_from(*cid).ok(),
            SpeciesIdentity::RadicalFragment => Some(-1),
            SpeciesIdentity::Catalyst => Some(-2),
            SpeciesIdentity::MissingReactant => Some(-3),
            SpeciesIdentity::MissingProduct => Some(-4),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            SpeciesIdentity::MissingReactant | SpeciesIdentity::MissingProduct
        )
    }
}

impl fmt::Display for SpeciesIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SpeciesIdentity::Real(cid) => write!(f, "CID {}", cid),
            SpeciesIdentity::RadicalFragment => write!(f, "radical fragment"),
            SpeciesIdentity::Catalyst => write!(f, "catalyst"),
            SpeciesIdentity::MissingReactant => write!(f, "missing reactant"),
            SpeciesIdentity::MissingProduct => write!(f, "missing product"),
        }
    }
}

/// bond counts, one slot per catalog position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector(DVector<i64>);

impl FeatureVector {
    pub fn zeros(len: usize) -> Self {
        FeatureVector(DVector::zeros(len))
    }

    pub fn from_vec(values: Vec<i64>) -> Self {
        FeatureVector(DVector::from_vec(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<i64> {
        self.0.get(i).copied()
    }

    pub fn increment(&mut self, i: usize) {
        self.0[i] += 1;
    }

    pub fn as_slice(&self) -> &[i64] {
        self.0.as_slice()
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0)
    }
    /// floating copy for numerical post-processing
    pub fn to_f64(&self) -> DVector<f64> {
        self.0.map(|x| x as f64)
    }

    pub fn as_dvector(&self) -> &DVector<i64> {
        &self.0
    }
}

impl Add for FeatureVector {
    type Output = FeatureVector;
    fn add(self, rhs: FeatureVector) -> FeatureVector {
        FeatureVector(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a FeatureVector> for &'a FeatureVector {
    type Output = FeatureVector;
    fn add(self, rhs: &'a FeatureVector) -> FeatureVector {
        FeatureVector(&self.0 + &rhs.0)
    }
}

impl Sub for FeatureVector {
    type Output = FeatureVector;
    fn sub(self, rhs: FeatureVector) -> FeatureVector {
        FeatureVector(self.0 - rhs.0)
    }
}

impl<'a> Sub<&'a FeatureVector> for &'a FeatureVector {
    type Output = FeatureVector;
    fn sub(self, rhs: &'a FeatureVector) -> FeatureVector {
        FeatureVector(&self.0 - &rhs.0)
    }
}

impl Neg for FeatureVector {
    type Output = FeatureVector;
    fn neg(self) -> FeatureVector {
        FeatureVector(-self.0)
    }
}

impl AddAssign<&FeatureVector> for FeatureVector {
    fn add_assign(&mut self, rhs: &FeatureVector) {
        self.0 += &rhs.0;
    }
}

impl SubAssign<&FeatureVector> for FeatureVector {
    fn sub_assign(&mut self, rhs: &FeatureVector) {
        self.0 -= &rhs.0;
    }
}

/// Reference data (element table, bond catalog) together with the vector of the radical
/// fragment. Constructed once; all methods take `&self` and have no side effects,
/// so one instance can be shared by any number of callers.
#[derive(Debug, Clone)]
pub struct FeatureConstructor {
    elements: ElementTable,
    catalog: BondCatalog,
    radical_fragment: FeatureVector,
}

impl FeatureConstructor {
    /// the radical fragment is described by [`RADICAL_FRAGMENT_TOKENS`]
    pub fn new(elements: ElementTable, catalog: BondCatalog) -> Result<Self, FeatureError> {
        Self::with_radical_fragment(elements, catalog, &RADICAL_FRAGMENT_TOKENS)
    }
    /// The radical fragment vector is counted from `fragment_tokens` against the catalog,
    /// every token must be present in the catalog.
    pub fn with_radical_fragment<S: AsRef<str>>(
        elements: ElementTable,
        catalog: BondCatalog,
        fragment_tokens: &[S],
    ) -> Result<Self, FeatureError> {
        let mut radical_fragment = FeatureVector::zeros(catalog.len());
        for (i, token) in fragment_tokens.iter().enumerate() {
            let token = token.as_ref();
            if fragment_tokens[..i].iter().any(|t| t.as_ref() == token) {
                return Err(FeatureError::Catalog(format!(
                    "radical fragment token '{}' is repeated",
                    token
                )));
            }
            let position = catalog.position(token).ok_or_else(|| {
                FeatureError::Catalog(format!(
                    "radical fragment token '{}' is not in the bond catalog",
                    token
                ))
            })?;
            radical_fragment.increment(position);
        }
        Ok(Self {
            elements,
            catalog,
            radical_fragment,
        })
    }

    pub fn elements(&self) -> &ElementTable {
        &self.elements
    }

    pub fn catalog(&self) -> &BondCatalog {
        &self.catalog
    }
    /// length of every feature vector
    pub fn dimension(&self) -> usize {
        self.catalog.len()
    }

    pub fn zero_vector(&self) -> FeatureVector {
        FeatureVector::zeros(self.catalog.len())
    }

    pub fn radical_fragment_vector(&self) -> FeatureVector {
        self.radical_fragment.clone()
    }
    /// Counts tokens by exact match against the catalog; tokens absent from the catalog are skipped.
    pub fn count_bonds(&self, tokens: &[BondToken]) -> FeatureVector {
        let mut vector = self.zero_vector();
        for token in tokens {
            match self.catalog.position(token) {
                Some(position) => vector.increment(position),
                None => debug!("bond '{}' is not in the catalog, skipped", token),
            }
        }
        vector
    }

    pub fn bonds_count(&self, record: &MolecularRecord) -> Result<FeatureVector, FeatureError> {
        let tokens = extract_bonds(record)?;
        Ok(self.count_bonds(&tokens))
    }
    /// Feature vector of one species.
    /// `Ok(None)` means the vector is undefined: a missing placeholder, or a real compound whose
    /// structure record is not available.
    pub fn vectorize(
        &self,
        identity: SpeciesIdentity,
        record: Option<&MolecularRecord>,
    ) -> Result<Option<FeatureVector>, FeatureError> {
        match identity {
            SpeciesIdentity::Real(_) => match record {
                Some(record) => Ok(Some(self.bonds_count(record)?)),
                None => Ok(None),
            },
            SpeciesIdentity::RadicalFragment => Ok(Some(self.radical_fragment.clone())),
            SpeciesIdentity::Catalyst => Ok(Some(self.zero_vector())),
            SpeciesIdentity::MissingReactant | SpeciesIdentity::MissingProduct => Ok(None),
        }
    }
    /// Bond change of a reaction: Σ products − Σ reactants.
    /// Fails with [`FeatureError::Undefined`] as soon as any participant has no vector.
    pub fn reaction_delta<F>(
        &self,
        products: &[SpeciesIdentity],
        reactants: &[SpeciesIdentity],
        mut resolver: F,
    ) -> Result<FeatureVector, FeatureError>
    where
        F: FnMut(&SpeciesIdentity) -> Option<FeatureVector>,
    {
        self.try_reaction_delta(products, reactants, |identity| Ok(resolver(identity)))
    }
    /// Same as [`Self::reaction_delta`] with structures looked up by CID,
    /// errors of bond extraction are propagated.
    pub fn reaction_delta_from_records<R>(
        &self,
        products: &[SpeciesIdentity],
        reactants: &[SpeciesIdentity],
        records: R,
    ) -> Result<FeatureVector, FeatureError>
    where
        R: Fn(u64) -> Option<MolecularRecord>,
    {
        self.try_reaction_delta(products, reactants, |identity| {
            let record = match identity {
                SpeciesIdentity::Real(cid) => records(*cid),
                _ => None,
            };
            self.vectorize(*identity, record.as_ref())
        })
    }

    fn try_reaction_delta<F>(
        &self,
        products: &[SpeciesIdentity],
        reactants: &[SpeciesIdentity],
        mut resolver: F,
    ) -> Result<FeatureVector, FeatureError>
    where
        F: FnMut(&SpeciesIdentity) -> Result<Option<FeatureVector>, FeatureError>,
    {
        let mut delta = self.zero_vector();
        for identity in products {
            let vector = self.resolve(identity, &mut resolver)?;
            delta += &vector;
        }
        for identity in reactants {
            let vector = self.resolve(identity, &mut resolver)?;
            delta -= &vector;
        }
        Ok(delta)
    }

    fn resolve<F>(
        &self,
        identity: &SpeciesIdentity,
        resolver: &mut F,
    ) -> Result<FeatureVector, FeatureError>
    where
        F: FnMut(&SpeciesIdentity) -> Result<Option<FeatureVector>, FeatureError>,
    {
        // placeholders are never resolved, whatever the resolver knows
        if identity.is_missing() {
            return Err(FeatureError::Undefined(*identity));
        }
        let vector = resolver(identity)?.ok_or(FeatureError::Undefined(*identity))?;
        if vector.len() != self.dimension() {
            return Err(FeatureError::DimensionMismatch {
                expected: self.dimension(),
                found: vector.len(),
            });
        }
        Ok(vector)
    }
}
