
pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod geodesy;
pub mod ingest;
pub mod output;
pub mod report;
pub mod scope;
pub mod settings;
pub mod store;
