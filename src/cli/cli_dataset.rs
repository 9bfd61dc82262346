use super::cli_main::{ask, get_user_input, load_constructor, report_error};
use crate::Dataset::record_mapper::KineticRecord;
use crate::Dataset::species_registry::{KineticsDataset, ReactionEntry};
use crate::library_manager::LibraryManager;
use prettytable::{Table, row};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn dataset_menu(manager: &LibraryManager) {
    let mut dataset = KineticsDataset::new();
    loop {
        println!("\n=== Dataset ===");
        println!("\x1b[33m1. Load dataset ({})\x1b[0m", manager.dataset_path());
        println!("\x1b[33m2. Import reactions (JSON list of reactions)\x1b[0m");
        println!("\x1b[33m3. Import CIDs (JSON map: species name -> CID)\x1b[0m");
        println!("\x1b[33m4. Import kinetic records (JSON list of records)\x1b[0m");
        println!("\x1b[33m5. Fetch structures from PubChem\x1b[0m");
        println!("\x1b[33m6. Compute features\x1b[0m");
        println!("\x1b[33m7. Show summary\x1b[0m");
        println!("\x1b[33m8. Show ML subset\x1b[0m");
        println!("\x1b[33m9. Save dataset\x1b[0m");
        println!("\x1b[33m0. Back to main menu\x1b[0m");
        print!("\x1b[36mEnter your choice: \x1b[0m");
        io::stdout().flush().unwrap();

        match get_user_input().trim() {
            "1" => match KineticsDataset::load_json(manager.dataset_path()) {
                Ok(loaded) => dataset = loaded,
                Err(e) => report_error(e),
            },
            "2" => match read_json::<Vec<ReactionEntry>>(&ask("Enter path")) {
                Ok(entries) => {
                    dataset = KineticsDataset::from_reactions(entries);
                    let flagged = dataset.assign_scores().and_then(|_| {
                        dataset.assign_status_flags(&manager.get_config().status_thresholds)
                    });
                    if let Err(e) = flagged {
                        report_error(e);
                    }
                }
                Err(e) => report_error(e),
            },
            "3" => match read_json::<HashMap<String, i64>>(&ask("Enter path")) {
                Ok(cids) => {
                    let n = dataset.transfer_cids(&cids);
                    println!("{} CIDs transferred", n);
                }
                Err(e) => report_error(e),
            },
            "4" => match read_json::<Vec<KineticRecord>>(&ask("Enter path")) {
                Ok(records) => {
                    dataset.fill_reaction_order(&records);
                    dataset.fill_activation_energy(&records);
                }
                Err(e) => report_error(e),
            },
            "5" => {
                let summary = dataset.fetch_structures(&manager.pubchem_fetcher());
                println!(
                    "{} structures fetched, {} failures",
                    summary.fetched,
                    summary.failures.len()
                );
            }
            "6" => {
                if let Some(constructor) = load_constructor(manager) {
                    let summary = dataset.compute_features(&constructor);
                    println!(
                        "{} species vectors, {} reactions defined, {} undefined",
                        summary.species_vectors,
                        summary.defined_reactions,
                        summary.undefined_reactions.len()
                    );
                }
            }
            "7" => dataset.pretty_print(),
            "8" => show_ml_subset(&dataset),
            "9" => {
                if let Err(e) = dataset.save_json(manager.dataset_path()) {
                    report_error(e);
                }
            }
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn show_ml_subset(dataset: &KineticsDataset) {
    let mut table = Table::new();
    table.add_row(row!["RID", "Reaction", "Order", "Ea, J/mol", "Bond change"]);
    for reaction in dataset.ml_subset() {
        let format_opt = |v: Option<f64>| v.map(|v| format!("{:.3}", v)).unwrap_or_default();
        table.add_row(row![
            reaction.rid,
            format!(
                "{} => {}",
                reaction.reactants.join(" + "),
                reaction.products.join(" + ")
            ),
            format_opt(reaction.reaction_order),
            format_opt(reaction.activation_energy),
            reaction
                .bond_change
                .as_ref()
                .map(|v| format!("{:?}", v))
                .unwrap_or_default()
        ]);
    }
    table.printstd();
}
