//! Aggregation of kinetic records (one reaction usually has many measurements) into
//! a single reaction order and activation energy per reaction.
use super::species_registry::KineticsDataset;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// one measurement of a reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticRecord {
    pub rid: usize,
    pub reaction_order: Option<f64>,
    /// J/mol
    pub activation_energy: Option<f64>,
}

impl KineticRecord {
    pub fn new(rid: usize, reaction_order: Option<f64>, activation_energy: Option<f64>) -> Self {
        Self {
            rid,
            reaction_order,
            activation_energy,
        }
    }
}

/// Most frequent value; on a tie the value that first reaches the top count wins.
pub fn mode(values: &[f64]) -> Option<f64> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    let mut best: Option<(f64, usize)> = None;
    for &value in values {
        let count = match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => {
                *count += 1;
                *count
            }
            None => {
                counts.push((value, 1));
                1
            }
        };
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn group_by_reaction<F>(records: &[KineticRecord], field: F) -> HashMap<usize, Vec<f64>>
where
    F: Fn(&KineticRecord) -> Option<f64>,
{
    let mut grouped: HashMap<usize, Vec<f64>> = HashMap::new();
    for record in records {
        if let Some(value) = field(record).filter(|v| v.is_finite()) {
            grouped.entry(record.rid).or_default().push(value);
        }
    }
    grouped
}

impl KineticsDataset {
    /// reaction order of a reaction = mode of its recorded orders
    pub fn fill_reaction_order(&mut self, records: &[KineticRecord]) {
        let grouped = group_by_reaction(records, |r| r.reaction_order);
        self.warn_unknown_rids(&grouped);
        let mut filled = 0;
        for reaction in self.reactions.iter_mut() {
            reaction.reaction_order = grouped.get(&reaction.rid).and_then(|v| mode(v));
            if reaction.reaction_order.is_some() {
                filled += 1;
            }
        }
        info!("reaction order filled for {} reactions", filled);
    }
    /// activation energy of a reaction = mean of its recorded values
    pub fn fill_activation_energy(&mut self, records: &[KineticRecord]) {
        let grouped = group_by_reaction(records, |r| r.activation_energy);
        self.warn_unknown_rids(&grouped);
        let mut filled = 0;
        for reaction in self.reactions.iter_mut() {
            reaction.activation_energy = grouped.get(&reaction.rid).and_then(|v| mean(v));
            if reaction.activation_energy.is_some() {
                filled += 1;
            }
        }
        info!("activation energy filled for {} reactions", filled);
    }

    fn warn_unknown_rids(&self, grouped: &HashMap<usize, Vec<f64>>) {
        for rid in grouped.keys() {
            if self.reaction(*rid).is_none() {
                warn!("kinetic records of unknown reaction {} ignored", rid);
            }
        }
    }
}
