#[allow(non_snake_case)]
pub mod DBhandlers;
#[allow(non_snake_case)]
pub mod Dataset;
#[allow(non_snake_case)]
pub mod Features;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod library_manager;
