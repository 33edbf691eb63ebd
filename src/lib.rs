pub mod analyzers;
pub mod error;
pub mod join;
pub mod loader;
pub mod report;
