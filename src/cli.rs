pub mod cli_dataset;
pub mod cli_main;
