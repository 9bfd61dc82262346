//! # Species registry
//!
//! Builds the two tables of the dataset out of a list of reactions:
//! - species table: every distinct species name gets a SID; names are sorted before numbering,
//!   so the same reaction list always gives the same SIDs
//! - reaction table: reactant and product names of every reaction together with their SIDs
//!
//! Then enriches them: usage scores of species, availability/status flags of reactions,
//! CIDs transferred from other species lists, species identities for the feature computation.
use super::error::DatasetError;
use crate::Features::vectorizer::SpeciesIdentity;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// names used by the kinetics database instead of real products
pub const PRODUCT_PLACEHOLDERS: [&str; 2] = ["Products", "Other Products"];

/// one reaction as delivered by the reaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionEntry {
    pub rid: usize,
    pub link: Option<String>,
    /// number of kinetic records of the reaction in the database
    pub records: Option<u32>,
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

impl ReactionEntry {
    pub fn new(rid: usize, reactants: &str, products: &str) -> Self {
        Self {
            rid,
            link: None,
            records: None,
            reactants: split_reaction_side(reactants),
            products: split_reaction_side(products),
        }
    }
}

/// "CH4 + OH" -> ["CH4", "OH"]
pub fn split_reaction_side(side: &str) -> Vec<String> {
    side.split(" + ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRow {
    pub sid: usize,
    pub name: String,
    /// PubChem CID or a legacy special code (see [`SpeciesIdentity::from_legacy_code`])
    pub cid: Option<i64>,
    /// number of reaction slots occupied by the species
    pub score: usize,
    /// stringified PubChem record
    pub bonds_info: Option<String>,
    pub features: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRow {
    pub rid: usize,
    pub link: Option<String>,
    pub records: Option<u32>,
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    pub reactant_sids: Vec<usize>,
    pub product_sids: Vec<usize>,
    pub products_available: bool,
    pub status_50: bool,
    pub status_75: bool,
    pub status_100: bool,
    pub reaction_order: Option<f64>,
    pub activation_energy: Option<f64>,
    /// bond change vector: products minus reactants
    pub bond_change: Option<Vec<i64>>,
}

impl ReactionRow {
    pub fn participant_sids(&self) -> impl Iterator<Item = &usize> {
        self.reactant_sids.iter().chain(self.product_sids.iter())
    }
}

/// score thresholds of the reaction status flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub low: usize,
    pub mid: usize,
    pub high: usize,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            low: 50,
            mid: 75,
            high: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Reactant,
    Product,
}

impl Side {
    fn missing(&self) -> SpeciesIdentity {
        match self {
            Side::Reactant => SpeciesIdentity::MissingReactant,
            Side::Product => SpeciesIdentity::MissingProduct,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KineticsDataset {
    pub reactions: Vec<ReactionRow>,
    /// row i has SID i
    pub species: Vec<SpeciesRow>,
}

impl KineticsDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reactions(entries: Vec<ReactionEntry>) -> Self {
        let unique: BTreeSet<&str> = entries
            .iter()
            .flat_map(|e| e.reactants.iter().chain(e.products.iter()))
            .map(|s| s.as_str())
            .collect();
        let sids: HashMap<&str, usize> = unique.iter().enumerate().map(|(i, &s)| (s, i)).collect();

        let species: Vec<SpeciesRow> = unique
            .iter()
            .enumerate()
            .map(|(sid, name)| SpeciesRow {
                sid,
                name: name.to_string(),
                cid: None,
                score: 0,
                bonds_info: None,
                features: None,
            })
            .collect();

        let reactions: Vec<ReactionRow> = entries
            .iter()
            .map(|entry| ReactionRow {
                rid: entry.rid,
                link: entry.link.clone(),
                records: entry.records,
                reactants: entry.reactants.clone(),
                products: entry.products.clone(),
                reactant_sids: entry.reactants.iter().map(|s| sids[s.as_str()]).collect(),
                product_sids: entry.products.iter().map(|s| sids[s.as_str()]).collect(),
                products_available: true,
                status_50: false,
                status_75: false,
                status_100: false,
                reaction_order: None,
                activation_energy: None,
                bond_change: None,
            })
            .collect();

        info!(
            "dataset created: {} reactions, {} unique species",
            reactions.len(),
            species.len()
        );
        Self { reactions, species }
    }

    pub fn species_by_name(&self, name: &str) -> Option<&SpeciesRow> {
        self.species.iter().find(|s| s.name == name)
    }

    pub fn reaction(&self, rid: usize) -> Option<&ReactionRow> {
        self.reactions.iter().find(|r| r.rid == rid)
    }

    pub fn reaction_mut(&mut self, rid: usize) -> Option<&mut ReactionRow> {
        self.reactions.iter_mut().find(|r| r.rid == rid)
    }
    /// Every reactant/product SID must point into the species table.
    pub fn check_sids(&self) -> Result<(), DatasetError> {
        for reaction in self.reactions.iter() {
            if let Some(&sid) = reaction
                .participant_sids()
                .find(|&&sid| sid >= self.species.len())
            {
                return Err(DatasetError::UnknownSpecies(sid));
            }
        }
        Ok(())
    }
    /// score of a species = number of reaction slots it occupies
    pub fn assign_scores(&mut self) -> Result<(), DatasetError> {
        self.check_sids()?;
        for species in self.species.iter_mut() {
            species.score = 0;
        }
        for reaction in self.reactions.iter() {
            for &sid in reaction.participant_sids() {
                self.species[sid].score += 1;
            }
        }
        info!("scores assigned to {} species", self.species.len());
        Ok(())
    }
    /// Products are unavailable when any product is a placeholder name.
    /// A status flag is set when every participant reaches the corresponding score.
    pub fn assign_status_flags(&mut self, thresholds: &StatusThresholds) -> Result<(), DatasetError> {
        self.check_sids()?;
        let species = &self.species;
        for reaction in self.reactions.iter_mut() {
            reaction.products_available = !reaction
                .products
                .iter()
                .any(|p| PRODUCT_PLACEHOLDERS.contains(&p.as_str()));

            let min_score = reaction
                .participant_sids()
                .map(|&sid| species[sid].score)
                .min();
            let reaches = |threshold: usize| min_score.is_some_and(|score| score >= threshold);
            reaction.status_50 = reaches(thresholds.low);
            reaction.status_75 = reaches(thresholds.mid);
            reaction.status_100 = reaches(thresholds.high);
        }
        info!("status flags assigned to {} reactions", self.reactions.len());
        Ok(())
    }
    /// Copies CIDs (or legacy special codes) into the species table by species name.
    /// Returns the number of species updated.
    pub fn transfer_cids(&mut self, cids: &HashMap<String, i64>) -> usize {
        let mut transferred = 0;
        for (name, &cid) in cids.iter() {
            match self.species.iter_mut().find(|s| &s.name == name) {
                Some(species) => {
                    if species.cid != Some(cid) {
                        // a new identity invalidates everything fetched for the old one
                        species.bonds_info = None;
                        species.features = None;
                    }
                    species.cid = Some(cid);
                    transferred += 1;
                }
                None => warn!("species '{}' is not in the dataset, CID {} skipped", name, cid),
            }
        }
        info!("{} CIDs transferred", transferred);
        transferred
    }

    pub fn species_identity(&self, sid: usize, side: Side) -> Result<SpeciesIdentity, DatasetError> {
        let species = self
            .species
            .get(sid)
            .ok_or(DatasetError::UnknownSpecies(sid))?;
        if side == Side::Product && PRODUCT_PLACEHOLDERS.contains(&species.name.as_str()) {
            return Ok(SpeciesIdentity::MissingProduct);
        }
        let identity = species
            .cid
            .and_then(SpeciesIdentity::from_legacy_code)
            .map(|identity| match identity {
                // legacy codes of missing species are bound to the side they appear on
                SpeciesIdentity::MissingReactant | SpeciesIdentity::MissingProduct => {
                    side.missing()
                }
                other => other,
            })
            .unwrap_or_else(|| side.missing());
        Ok(identity)
    }
    /// (products, reactants) of a reaction as species identities
    pub fn reaction_identities(
        &self,
        rid: usize,
    ) -> Result<(Vec<SpeciesIdentity>, Vec<SpeciesIdentity>), DatasetError> {
        let reaction = self.reaction(rid).ok_or(DatasetError::UnknownReaction(rid))?;
        self.row_identities(reaction)
    }

    pub fn row_identities(
        &self,
        reaction: &ReactionRow,
    ) -> Result<(Vec<SpeciesIdentity>, Vec<SpeciesIdentity>), DatasetError> {
        let products = reaction
            .product_sids
            .iter()
            .map(|&sid| self.species_identity(sid, Side::Product))
            .collect::<Result<Vec<_>, _>>()?;
        let reactants = reaction
            .reactant_sids
            .iter()
            .map(|&sid| self.species_identity(sid, Side::Reactant))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((products, reactants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> KineticsDataset {
        KineticsDataset::from_reactions(vec![
            ReactionEntry::new(1, "CH4 + OH", "CH3 + H2O"),
            ReactionEntry::new(2, "CH3 + O2", "Products"),
            ReactionEntry::new(3, "OH + OH", "H2O + O"),
        ])
    }

    #[test]
    fn test_split_reaction_side() {
        assert_eq!(split_reaction_side("CH4 + OH"), vec!["CH4", "OH"]);
        assert_eq!(split_reaction_side(" H2O "), vec!["H2O"]);
        // '+' inside a name (ions) is kept
        assert_eq!(split_reaction_side("H3O+ + e-"), vec!["H3O+", "e-"]);
        assert!(split_reaction_side("").is_empty());
    }

    #[test]
    fn test_sids_follow_sorted_names() {
        let dataset = dataset();
        let names: Vec<&str> = dataset.species.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["CH3", "CH4", "H2O", "O", "O2", "OH", "Products"]);
        for (i, species) in dataset.species.iter().enumerate() {
            assert_eq!(species.sid, i);
        }
        let r1 = dataset.reaction(1).unwrap();
        assert_eq!(r1.reactant_sids, vec![1, 5]);
        assert_eq!(r1.product_sids, vec![0, 2]);
        // input order does not change the numbering
        let reversed = KineticsDataset::from_reactions(vec![
            ReactionEntry::new(3, "OH + OH", "H2O + O"),
            ReactionEntry::new(2, "CH3 + O2", "Products"),
            ReactionEntry::new(1, "CH4 + OH", "CH3 + H2O"),
        ]);
        assert_eq!(reversed.species, dataset.species);
    }

    #[test]
    fn test_scores_count_every_slot() {
        let mut dataset = dataset();
        dataset.assign_scores().unwrap();
        assert_eq!(dataset.species_by_name("OH").unwrap().score, 3);
        assert_eq!(dataset.species_by_name("CH3").unwrap().score, 2);
        assert_eq!(dataset.species_by_name("O").unwrap().score, 1);
        // repeated call gives the same scores
        dataset.assign_scores().unwrap();
        assert_eq!(dataset.species_by_name("OH").unwrap().score, 3);
    }

    #[test]
    fn test_status_flags() {
        let mut dataset = dataset();
        dataset.assign_scores().unwrap();
        let thresholds = StatusThresholds {
            low: 1,
            mid: 2,
            high: 3,
        };
        dataset.assign_status_flags(&thresholds).unwrap();

        let r1 = dataset.reaction(1).unwrap();
        assert!(r1.products_available);
        assert!(r1.status_50);
        // CH4 and H2O occur only once and twice
        assert!(!r1.status_75);
        assert!(!r1.status_100);

        let r2 = dataset.reaction(2).unwrap();
        assert!(!r2.products_available);

        let r3 = dataset.reaction(3).unwrap();
        assert!(r3.status_50);
        assert!(!r3.status_75);
    }

    #[test]
    fn test_dangling_sid_is_an_error() {
        let mut dataset = KineticsDataset::from_reactions(vec![ReactionEntry::new(1, "CH4", "CH3")]);
        dataset.reactions[0].reactant_sids = vec![5];
        assert!(matches!(
            dataset.assign_scores(),
            Err(DatasetError::UnknownSpecies(5))
        ));
        assert!(matches!(
            dataset.assign_status_flags(&StatusThresholds::default()),
            Err(DatasetError::UnknownSpecies(5))
        ));
        // scores are untouched
        assert!(dataset.species.iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_transfer_cids() {
        let mut dataset = dataset();
        let cids = HashMap::from([
            ("CH4".to_string(), 297),
            ("H2O".to_string(), 962),
            ("Unknown species".to_string(), 1),
        ]);
        assert_eq!(dataset.transfer_cids(&cids), 2);
        assert_eq!(dataset.species_by_name("CH4").unwrap().cid, Some(297));
        assert_eq!(dataset.species_by_name("OH").unwrap().cid, None);
    }

    #[test]
    fn test_species_identities() {
        let mut dataset = dataset();
        let cids = HashMap::from([
            ("CH4".to_string(), 297),
            ("OH".to_string(), 157350),
            ("CH3".to_string(), -1),
            ("H2O".to_string(), 962),
            ("O2".to_string(), -3),
        ]);
        dataset.transfer_cids(&cids);

        let (products, reactants) = dataset.reaction_identities(1).unwrap();
        assert_eq!(
            products,
            vec![SpeciesIdentity::RadicalFragment, SpeciesIdentity::Real(962)]
        );
        assert_eq!(
            reactants,
            vec![SpeciesIdentity::Real(297), SpeciesIdentity::Real(157350)]
        );

        let (products, reactants) = dataset.reaction_identities(2).unwrap();
        assert_eq!(products, vec![SpeciesIdentity::MissingProduct]);
        assert_eq!(
            reactants,
            vec![
                SpeciesIdentity::RadicalFragment,
                SpeciesIdentity::MissingReactant
            ]
        );

        // O has no CID
        let (products, _) = dataset.reaction_identities(3).unwrap();
        assert_eq!(products[1], SpeciesIdentity::MissingProduct);

        assert!(matches!(
            dataset.reaction_identities(42),
            Err(DatasetError::UnknownReaction(42))
        ));
        assert!(matches!(
            dataset.species_identity(100, Side::Reactant),
            Err(DatasetError::UnknownSpecies(100))
        ));
    }
}
