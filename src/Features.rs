/// error types of the feature construction
pub mod error;
/// periodic table lookup: atomic number -> element symbol
pub mod elements;
/// ordered catalog of bond types; defines positions in feature vectors
pub mod bond_catalog;
/// structure records of species and their parsing from PubChem JSON
pub mod molecular_record;
/// turns a structure record into a list of bond tokens ("C-H", "C=O", "O.")
///
///  # Examples
/// ```
/// use KiBond::Features::molecular_record::MolecularRecord;
/// use KiBond::Features::bond_extractor::extract_bonds;
/// // formaldehyde: C=O, C-H, C-H
/// let record = MolecularRecord::from_symbols(&["C", "O", "H", "H"], &[(1, 2, 2), (1, 3, 1), (1, 4, 1)], None);
/// let bonds = extract_bonds(&record).unwrap();
/// assert_eq!(bonds, vec!["C=O", "C-H", "C-H"]);
/// ```
pub mod bond_extractor;
/// Feature vectors of species (bond counts over the bond catalog) and of reactions
/// (sum of product vectors minus sum of reactant vectors)
///
///  # Examples
/// ```
/// use KiBond::Features::bond_catalog::BondCatalog;
/// use KiBond::Features::elements::ElementTable;
/// use KiBond::Features::molecular_record::MolecularRecord;
/// use KiBond::Features::vectorizer::{FeatureConstructor, SpeciesIdentity};
/// let tokens = vec!["C-H", "C-C", "C=O", "C."];
/// let catalog = BondCatalog::new(tokens.iter().map(|s| s.to_string()).collect()).unwrap();
/// let constructor = FeatureConstructor::new(ElementTable::builtin(), catalog).unwrap();
/// let ethane = MolecularRecord::from_symbols(
///     &["C", "C", "H", "H", "H", "H", "H", "H"],
///     &[(1, 2, 1), (1, 3, 1), (1, 4, 1), (1, 5, 1), (2, 6, 1), (2, 7, 1), (2, 8, 1)],
///     None,
/// );
/// let v = constructor.vectorize(SpeciesIdentity::Real(6324), Some(&ethane)).unwrap().unwrap();
/// assert_eq!(v.to_vec(), vec![6, 1, 0, 0]);
/// // ethane -> C2H5 + H: products are unknown here, so the bond change is undefined
/// let delta = constructor.reaction_delta(
///     &[SpeciesIdentity::MissingProduct],
///     &[SpeciesIdentity::Real(6324)],
///     |_| Some(v.clone()),
/// );
/// assert!(delta.is_err());
/// ```
pub mod vectorizer;
/// tests
pub mod vectorizer_tests;
