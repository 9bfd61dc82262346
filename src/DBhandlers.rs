/// PubChem PUG REST fetcher of compound structure records
#[allow(non_snake_case)]
pub mod PubChem_fetcher;
