use super::species_registry::{KineticsDataset, ReactionRow};
use regex::Regex;
use std::sync::LazyLock;

static ADDUCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)adduct").unwrap());

pub fn is_adduct(name: &str) -> bool {
    ADDUCT.is_match(name)
}

impl KineticsDataset {
    /// species has a CID or a legacy special code
    fn is_resolved(&self, sid: usize) -> bool {
        self.species.get(sid).is_some_and(|s| s.cid.is_some())
    }
    /// Reactions suitable for model training: products known, all participants used at least
    /// `status_75` times, every participant resolved, no adducts.
    pub fn ml_subset(&self) -> Vec<&ReactionRow> {
        self.reactions
            .iter()
            .filter(|r| r.products_available && r.status_75)
            .filter(|r| r.participant_sids().all(|&sid| self.is_resolved(sid)))
            .filter(|r| {
                !r.reactants
                    .iter()
                    .chain(r.products.iter())
                    .any(|name| is_adduct(name))
            })
            .collect()
    }
}
