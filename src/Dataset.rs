/// error types of the dataset operations
pub mod error;
/// reaction and species tables, SIDs, scores, status flags, CIDs
///
///  # Examples
/// ```
/// use KiBond::Dataset::species_registry::{KineticsDataset, ReactionEntry, StatusThresholds};
/// let mut dataset = KineticsDataset::from_reactions(vec![
///     ReactionEntry::new(1, "CH4 + OH", "CH3 + H2O"),
///     ReactionEntry::new(2, "CH3 + O2", "Products"),
/// ]);
/// dataset.assign_scores().unwrap();
/// dataset.assign_status_flags(&StatusThresholds::default()).unwrap();
/// assert_eq!(dataset.species_by_name("CH3").unwrap().score, 2);
/// assert!(!dataset.reaction(2).unwrap().products_available);
/// ```
pub mod species_registry;
/// reaction order and activation energy of reactions out of kinetic records
pub mod record_mapper;
/// selection of reactions for model training
pub mod ml_subset;
/// structure downloading, species and reaction feature vectors, feature matrix
pub mod dataset_features;
/// JSON persistence and table output
pub mod table_store;
