pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod filter;
pub mod loader;
pub mod models;
pub mod views;
