pub mod charts;
pub mod config;
pub mod dates;
pub mod export;
pub mod loader;
pub mod schema;
pub mod table;
pub mod values;
