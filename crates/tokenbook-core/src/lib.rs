pub mod config;
pub mod error;
pub mod flatten;
pub mod models;
pub mod resolve;
pub mod swatch;
pub mod table;
