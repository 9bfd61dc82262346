use super::cli_dataset::dataset_menu;
use crate::Features::bond_extractor::extract_bonds;
use crate::Features::molecular_record::MolecularRecord;
use crate::Features::vectorizer::{FeatureConstructor, FeatureVector};
use crate::library_manager::LibraryManager;
use prettytable::{Table, row};
use std::fs;
use std::io::{self, Write};

pub fn run_interactive_menu() {
    let mut manager = LibraryManager::new();
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => show_catalog(&manager),
            "2" => vectorize_file(&manager),
            "3" => vectorize_cid(&manager),
            "4" => dataset_menu(&manager),
            "5" => settings_menu(&mut manager),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Red (\x1b[31m) - errors
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Wellcome to KiBond: bond feature vectors of species and reactions\n
    for chemical kinetics datasets \n
    (c) Gleb E. Zaslavsky, 2024 \n \x1b[0m"
    );
    println!("\x1b[33m1. Show bond catalog\x1b[0m");
    println!("\x1b[33m2. Vectorize PubChem JSON file\x1b[0m");
    println!("\x1b[33m3. Fetch compound by CID and vectorize\x1b[0m");
    println!("\x1b[33m4. Dataset\x1b[0m");
    println!("\x1b[33m5. Library settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

pub(crate) fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}

pub(crate) fn ask(prompt: &str) -> String {
    print!("\x1b[36m{}: \x1b[0m", prompt);
    io::stdout().flush().unwrap();
    get_user_input().trim().to_string()
}

pub(crate) fn report_error(e: impl std::fmt::Display) {
    println!("\x1b[31mError: {}\x1b[0m", e);
}

pub(crate) fn load_constructor(manager: &LibraryManager) -> Option<FeatureConstructor> {
    match manager.feature_constructor() {
        Ok(constructor) => Some(constructor),
        Err(e) => {
            report_error(e);
            None
        }
    }
}

fn show_catalog(manager: &LibraryManager) {
    match manager.load_bond_catalog() {
        Ok(catalog) => catalog.pretty_print(),
        Err(e) => report_error(e),
    }
}

fn print_vector(constructor: &FeatureConstructor, tokens: &[String], vector: &FeatureVector) {
    println!("bonds: {}", tokens.join(", "));
    let mut table = Table::new();
    table.add_row(row!["Bond", "Count"]);
    for (token, count) in constructor.catalog().tokens().iter().zip(vector.as_slice()) {
        if *count != 0 {
            table.add_row(row![token, count]);
        }
    }
    table.printstd();
}

fn vectorize_record(constructor: &FeatureConstructor, record: &MolecularRecord) {
    match extract_bonds(record) {
        Ok(tokens) => {
            let vector = constructor.count_bonds(&tokens);
            print_vector(constructor, &tokens, &vector);
        }
        Err(e) => report_error(e),
    }
}

fn vectorize_file(manager: &LibraryManager) {
    let Some(constructor) = load_constructor(manager) else {
        return;
    };
    let path = ask("Enter path to PubChem JSON record");
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => return report_error(format!("{}: {}", path, e)),
    };
    match MolecularRecord::from_pubchem_json(&text, constructor.elements()) {
        Ok(record) => vectorize_record(&constructor, &record),
        Err(e) => report_error(e),
    }
}

fn vectorize_cid(manager: &LibraryManager) {
    let Some(constructor) = load_constructor(manager) else {
        return;
    };
    let cid: u64 = match ask("Enter PubChem CID").parse() {
        Ok(cid) => cid,
        Err(_) => return println!("CID must be a positive integer"),
    };
    match manager
        .pubchem_fetcher()
        .fetch_record(cid, constructor.elements())
    {
        Ok(record) => vectorize_record(&constructor, &record),
        Err(e) => report_error(e),
    }
}

fn settings_menu(manager: &mut LibraryManager) {
    loop {
        println!("\n=== Library settings ({}) ===", manager.config_file());
        match serde_json::to_string_pretty(manager.get_config()) {
            Ok(text) => println!("{}", text),
            Err(e) => report_error(e),
        }
        println!("\x1b[33m1. Set bond catalog file\x1b[0m");
        println!("\x1b[33m2. Set element table file\x1b[0m");
        println!("\x1b[33m3. Set dataset file\x1b[0m");
        println!("\x1b[33m4. Reset to defaults\x1b[0m");
        println!("\x1b[33m0. Back to main menu\x1b[0m");
        print!("\x1b[36mEnter your choice: \x1b[0m");
        io::stdout().flush().unwrap();

        let result = match get_user_input().trim() {
            "1" => manager.set_bonds(&ask("Enter path")),
            "2" => manager.set_elements(&ask("Enter path")),
            "3" => manager.set_dataset(&ask("Enter path")),
            "4" => manager.reset_to_defaults(),
            "0" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = result {
            report_error(e);
        }
    }
}
