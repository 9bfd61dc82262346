//! # PubChem Structure Fetcher Module
//!
//! ## Aim
//! Downloads compound records from the PubChem PUG REST service
//! (https://pubchem.ncbi.nlm.nih.gov/rest/pug) by CID and turns them into
//! [`MolecularRecord`]s for bond extraction.
//!
//! ## Main Data Structures and Logic
//! - `HttpClient`: minimal HTTP trait so the fetcher can be tested without network
//! - `StructureFetcher`: anything that returns the raw record JSON of a CID
//! - `PubChemFetcher<C>`: fetcher generic over the HTTP client
//! - `FetchError`: network, URL, HTTP status, "not found" and record errors
//!
//! ## Usage
//! ```rust, ignore
//! let fetcher = PubChemFetcher::new();
//! let record = fetcher.fetch_record(887, &ElementTable::builtin())?;
//! ```
//!
//! No retries and no rate limiting are done here; a caller that needs them wraps the fetcher.
use crate::Features::elements::ElementTable;
use crate::Features::error::FeatureError;
use crate::Features::molecular_record::MolecularRecord;
use log::info;
use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub const PUBCHEM_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

/// HTTP client trait for dependency injection: returns status code and body
pub trait HttpClient {
    fn get_text(&self, url: &str) -> Result<(u16, String), reqwest::Error>;
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn get_text(&self, url: &str) -> Result<(u16, String), reqwest::Error> {
        let response = self.get(url).send()?;
        let status = response.status().as_u16();
        Ok((status, response.text()?))
    }
}

/// error types of the structure fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Compound with CID {0} not found")]
    NotFound(u64),
    #[error("PubChem answered with HTTP status {status} for CID {cid}")]
    Http { cid: u64, status: u16 },
    #[error("Invalid compound record: {0}")]
    Record(#[from] FeatureError),
}

/// source of raw structure records
pub trait StructureFetcher {
    /// stringified JSON record of the compound
    fn fetch_json(&self, cid: u64) -> Result<String, FetchError>;
}

pub struct PubChemFetcher<C: HttpClient> {
    client: C,
    base_url: String,
}

impl PubChemFetcher<Client> {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }
}

impl<C: HttpClient> PubChemFetcher<C> {
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            base_url: PUBCHEM_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn construct_url(&self, cid: u64) -> Result<Url, FetchError> {
        Ok(Url::parse(&format!(
            "{}/compound/cid/{}/record/json",
            self.base_url, cid
        ))?)
    }
    /// fetches the record and parses it into a structure
    pub fn fetch_record(
        &self,
        cid: u64,
        elements: &ElementTable,
    ) -> Result<MolecularRecord, FetchError> {
        let text = self.fetch_json(cid)?;
        Ok(MolecularRecord::from_pubchem_json(&text, elements)?)
    }
}

impl<C: HttpClient> StructureFetcher for PubChemFetcher<C> {
    fn fetch_json(&self, cid: u64) -> Result<String, FetchError> {
        let url = self.construct_url(cid)?;
        info!("fetching PubChem record: {}", url);
        let (status, body) = self.client.get_text(url.as_str())?;
        match status {
            200 => {}
            404 => return Err(FetchError::NotFound(cid)),
            _ => return Err(FetchError::Http { cid, status }),
        }
        // PubChem reports failures as {"Fault": {...}}
        if let Ok(value) = serde_json::from_str::<Value>(&body) {
            if value.get("Fault").is_some() {
                return Err(FetchError::NotFound(cid));
            }
        }
        Ok(body)
    }
}
