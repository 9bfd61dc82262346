//! # Structures and feature vectors of the dataset
//!
//! - `fetch_structures`: downloads structure records of all species with a CID that have none yet
//! - `compute_features`: bond count vectors of species, bond change vectors of reactions
//! - `feature_matrix`: bond change vectors of chosen reactions stacked into a matrix for
//!   model training
use super::error::DatasetError;
use super::species_registry::KineticsDataset;
use crate::DBhandlers::PubChem_fetcher::{FetchError, StructureFetcher};
use crate::Features::error::FeatureError;
use crate::Features::molecular_record::MolecularRecord;
use crate::Features::vectorizer::{FeatureConstructor, FeatureVector, SpeciesIdentity};
use log::{error, info, warn};
use nalgebra::DMatrix;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct FetchSummary {
    pub fetched: usize,
    /// (SID, error) of every failed download
    pub failures: Vec<(usize, FetchError)>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeatureSummary {
    pub species_vectors: usize,
    pub malformed_species: Vec<usize>,
    pub defined_reactions: usize,
    pub undefined_reactions: Vec<usize>,
}

impl KineticsDataset {
    pub fn fetch_structures<F: StructureFetcher>(&mut self, fetcher: &F) -> FetchSummary {
        let mut summary = FetchSummary::default();
        for species in self.species.iter_mut() {
            if species.bonds_info.is_some() {
                continue;
            }
            let Some(SpeciesIdentity::Real(cid)) =
                species.cid.and_then(SpeciesIdentity::from_legacy_code)
            else {
                continue;
            };
            match fetcher.fetch_json(cid) {
                Ok(text) => {
                    species.bonds_info = Some(text);
                    species.features = None;
                    summary.fetched += 1;
                }
                Err(e) => {
                    error!("structure of '{}' (CID {}) not fetched: {}", species.name, cid, e);
                    summary.failures.push((species.sid, e));
                }
            }
        }
        info!(
            "{} structures fetched, {} failures",
            summary.fetched,
            summary.failures.len()
        );
        summary
    }
    /// Species vectors from the stored records, then bond change of every reaction.
    /// Species with broken records and undefined reactions keep `None`.
    pub fn compute_features(&mut self, constructor: &FeatureConstructor) -> FeatureSummary {
        let mut summary = FeatureSummary::default();
        for species in self.species.iter_mut() {
            species.features = None;
            let Some(text) = species.bonds_info.as_deref() else {
                continue;
            };
            let vector = MolecularRecord::from_pubchem_json(text, constructor.elements())
                .and_then(|record| constructor.bonds_count(&record));
            match vector {
                Ok(vector) => {
                    species.features = Some(vector.to_vec());
                    summary.species_vectors += 1;
                }
                Err(e) => {
                    warn!("species '{}' (SID {}): {}", species.name, species.sid, e);
                    summary.malformed_species.push(species.sid);
                }
            }
        }

        let vectors: HashMap<u64, FeatureVector> = self
            .species
            .iter()
            .filter_map(|s| match (s.cid.and_then(SpeciesIdentity::from_legacy_code), &s.features) {
                (Some(SpeciesIdentity::Real(cid)), Some(features)) => {
                    Some((cid, FeatureVector::from_vec(features.clone())))
                }
                _ => None,
            })
            .collect();

        for i in 0..self.reactions.len() {
            let rid = self.reactions[i].rid;
            let delta = self.row_identities(&self.reactions[i]).and_then(|(products, reactants)| {
                constructor
                    .reaction_delta(&products, &reactants, |identity| match identity {
                        SpeciesIdentity::Real(cid) => vectors.get(cid).cloned(),
                        other => constructor.vectorize(*other, None).ok().flatten(),
                    })
                    .map_err(DatasetError::from)
            });
            let bond_change = match delta {
                Ok(delta) => {
                    summary.defined_reactions += 1;
                    Some(delta.to_vec())
                }
                Err(DatasetError::Feature(FeatureError::Undefined(identity))) => {
                    warn!("reaction {} is undefined: no vector for {}", rid, identity);
                    summary.undefined_reactions.push(rid);
                    None
                }
                Err(e) => {
                    warn!("reaction {}: {}", rid, e);
                    summary.undefined_reactions.push(rid);
                    None
                }
            };
            self.reactions[i].bond_change = bond_change;
        }
        info!(
            "features computed: {} species vectors, {} defined reactions, {} undefined",
            summary.species_vectors,
            summary.defined_reactions,
            summary.undefined_reactions.len()
        );
        summary
    }
    /// One row per reaction of `rids` with a defined bond change of length `dimension`.
    /// Returns the RIDs of the rows together with the matrix.
    pub fn feature_matrix(
        &self,
        rids: &[usize],
        dimension: usize,
    ) -> Result<(Vec<usize>, DMatrix<f64>), DatasetError> {
        let mut rows: Vec<(usize, &Vec<i64>)> = Vec::new();
        for &rid in rids {
            let reaction = self.reaction(rid).ok_or(DatasetError::UnknownReaction(rid))?;
            if let Some(bond_change) = &reaction.bond_change {
                if bond_change.len() != dimension {
                    return Err(FeatureError::DimensionMismatch {
                        expected: dimension,
                        found: bond_change.len(),
                    }
                    .into());
                }
                rows.push((rid, bond_change));
            }
        }
        let matrix = DMatrix::from_fn(rows.len(), dimension, |i, j| rows[i].1[j] as f64);
        Ok((rows.iter().map(|(rid, _)| *rid).collect(), matrix))
    }
}
