use super::error::DatasetError;
use super::species_registry::{KineticsDataset, ReactionRow};
use log::info;
use prettytable::{Table, row};
use std::fs::File;
use std::io::{BufReader, BufWriter};

impl KineticsDataset {
    pub fn save_json(&self, path: &str) -> Result<(), DatasetError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        info!("dataset saved to {}", path);
        Ok(())
    }

    pub fn load_json(path: &str) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        let dataset: KineticsDataset = serde_json::from_reader(BufReader::new(file))?;
        dataset.check_sids()?;
        info!(
            "dataset loaded from {}: {} reactions, {} species",
            path,
            dataset.reactions.len(),
            dataset.species.len()
        );
        Ok(dataset)
    }

    fn count_reactions(&self, predicate: impl Fn(&ReactionRow) -> bool) -> usize {
        self.reactions.iter().filter(|r| predicate(r)).count()
    }

    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Quantity", "Value"]);
        table.add_row(row!["reactions", self.reactions.len()]);
        table.add_row(row!["species", self.species.len()]);
        table.add_row(row![
            "species with CID",
            self.species.iter().filter(|s| s.cid.is_some()).count()
        ]);
        table.add_row(row![
            "species with structure",
            self.species.iter().filter(|s| s.bonds_info.is_some()).count()
        ]);
        table.add_row(row!["products available", self.count_reactions(|r| r.products_available)]);
        table.add_row(row!["status 50", self.count_reactions(|r| r.status_50)]);
        table.add_row(row!["status 75", self.count_reactions(|r| r.status_75)]);
        table.add_row(row!["status 100", self.count_reactions(|r| r.status_100)]);
        table.add_row(row!["bond change defined", self.count_reactions(|r| r.bond_change.is_some())]);
        table.add_row(row!["ML subset", self.ml_subset().len()]);
        table
    }

    pub fn pretty_print(&self) {
        self.summary_table().printstd();
    }
}
