// src/drivers/mod.rs
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod stats;
pub mod table;
pub use error::PipelineError;
pub use pipeline::Pipeline;
