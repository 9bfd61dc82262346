//! # Library Manager Module
//!
//! ## Purpose
//! Keeps the paths and settings of the feature library in one place: element table,
//! bond catalog, radical fragment tokens, status thresholds, PubChem address and the
//! dataset file. Builds the ready-to-use [`FeatureConstructor`] and [`PubChemFetcher`]
//! out of them.
//!
//! ## Architecture
//! - **LibraryConfig**: Serializable configuration structure
//! - **LibraryManager**: Owns a configuration and the file it is persisted to
//! - **Configuration File**: JSON-based persistent storage (library_config.json)
//!
//! A manager is an ordinary value: create it where it is needed and pass it on.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "elements": null,
//!   "bonds": "FeatureLibrary/bonds.csv",
//!   "radical_fragment": ["C-H", "C."],
//!   "status_thresholds": {"low": 50, "mid": 75, "high": 100},
//!   "pubchem_base_url": "https://pubchem.ncbi.nlm.nih.gov/rest/pug",
//!   "dataset": "dataset.json"
//! }
//! ```
//!
//! ## Usage
//! ```rust, ignore
//! use KiBond::library_manager::LibraryManager;
//!
//! let manager = LibraryManager::new();
//! let constructor = manager.feature_constructor()?;
//! println!("feature vectors have {} components", constructor.dimension());
//! ```
use crate::DBhandlers::PubChem_fetcher::{PUBCHEM_BASE_URL, PubChemFetcher};
use crate::Dataset::species_registry::StatusThresholds;
use crate::Features::bond_catalog::BondCatalog;
use crate::Features::elements::ElementTable;
use crate::Features::vectorizer::{FeatureConstructor, RADICAL_FRAGMENT_TOKENS};
use log::info;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "library_config.json";

/// Configuration of the feature library.
///
/// # Fields
/// * `elements` - CSV with one element symbol per row; built-in periodic table when `None`
/// * `bonds` - CSV with the bond catalog, one token per row
/// * `radical_fragment` - catalog tokens making up the ·CH radical fragment vector
/// * `status_thresholds` - species scores for the reaction status flags
/// * `pubchem_base_url` - PUG REST root
/// * `dataset` - JSON file of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub elements: Option<String>,
    pub bonds: String,
    pub radical_fragment: Vec<String>,
    pub status_thresholds: StatusThresholds,
    pub pubchem_base_url: String,
    pub dataset: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            elements: None,
            bonds: "FeatureLibrary/bonds.csv".to_string(),
            radical_fragment: RADICAL_FRAGMENT_TOKENS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            status_thresholds: StatusThresholds::default(),
            pubchem_base_url: PUBCHEM_BASE_URL.to_string(),
            dataset: "dataset.json".to_string(),
        }
    }
}

/// Loads, updates and persists a [`LibraryConfig`].
#[derive(Debug, Clone)]
pub struct LibraryManager {
    config: LibraryConfig,
    config_file: String,
}

impl Default for LibraryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryManager {
    /// Loads "library_config.json" from the current directory, defaults if it is absent or invalid.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    pub fn with_config_file(config_file: &str) -> Self {
        let config = Self::load_config(config_file).unwrap_or_default();
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// Reads the configuration file.
    ///
    /// # Returns
    /// * `Ok(LibraryConfig)` - Loaded configuration, or the default one when the file doesn't exist
    /// * `Err(Box<dyn std::error::Error>)` - On I/O or JSON errors
    pub fn load_config(config_file: &str) -> Result<LibraryConfig, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: LibraryConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(LibraryConfig::default())
        }
    }

    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        info!("library configuration saved to {}", self.config_file);
        Ok(())
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn get_config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn bonds_path(&self) -> &str {
        &self.config.bonds
    }

    pub fn dataset_path(&self) -> &str {
        &self.config.dataset
    }

    /// Updates the element table file path.
    ///
    /// Validates that the new file exists before updating the configuration.
    /// Automatically saves the configuration after successful update.
    pub fn set_elements(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if Path::new(path).exists() {
            self.config.elements = Some(path.to_string());
            self.save_config()?;
            Ok(())
        } else {
            Err(format!("File does not exist: {}", path).into())
        }
    }

    /// Updates the bond catalog file path.
    ///
    /// Validates that the new file exists before updating the configuration.
    /// Automatically saves the configuration after successful update.
    pub fn set_bonds(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if Path::new(path).exists() {
            self.config.bonds = path.to_string();
            self.save_config()?;
            Ok(())
        } else {
            Err(format!("File does not exist: {}", path).into())
        }
    }

    /// dataset file may not exist yet, it is created on the first save
    pub fn set_dataset(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.config.dataset = path.to_string();
        self.save_config()
    }

    pub fn set_radical_fragment(
        &mut self,
        tokens: Vec<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if tokens.is_empty() {
            return Err("radical fragment needs at least one bond token".into());
        }
        if let Some((i, token)) = tokens
            .iter()
            .enumerate()
            .find(|&(i, t)| tokens[..i].contains(t))
        {
            return Err(format!(
                "radical fragment token '{}' at position {} is repeated",
                token, i
            )
            .into());
        }
        self.config.radical_fragment = tokens;
        self.save_config()
    }

    pub fn set_status_thresholds(
        &mut self,
        thresholds: StatusThresholds,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !(thresholds.low <= thresholds.mid && thresholds.mid <= thresholds.high) {
            return Err(format!("thresholds must not decrease: {:?}", thresholds).into());
        }
        self.config.status_thresholds = thresholds;
        self.save_config()
    }

    pub fn set_pubchem_base_url(&mut self, url: &str) -> Result<(), Box<dyn std::error::Error>> {
        url::Url::parse(url)?;
        self.config.pubchem_base_url = url.to_string();
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.config = LibraryConfig::default();
        self.save_config()?;
        Ok(())
    }

    pub fn load_element_table(&self) -> Result<ElementTable, Box<dyn std::error::Error>> {
        match &self.config.elements {
            Some(path) => Ok(ElementTable::from_csv_file(path)?),
            None => Ok(ElementTable::builtin()),
        }
    }

    pub fn load_bond_catalog(&self) -> Result<BondCatalog, Box<dyn std::error::Error>> {
        Ok(BondCatalog::from_csv_file(&self.config.bonds)?)
    }

    pub fn feature_constructor(&self) -> Result<FeatureConstructor, Box<dyn std::error::Error>> {
        let constructor = FeatureConstructor::with_radical_fragment(
            self.load_element_table()?,
            self.load_bond_catalog()?,
            &self.config.radical_fragment,
        )?;
        info!(
            "feature constructor ready: {} bond types",
            constructor.dimension()
        );
        Ok(constructor)
    }

    pub fn pubchem_fetcher(&self) -> PubChemFetcher<Client> {
        PubChemFetcher::new().with_base_url(&self.config.pubchem_base_url)
    }
}
