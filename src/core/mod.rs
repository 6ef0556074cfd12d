pub mod context;
pub mod download;
pub mod processor;
pub mod stats;

pub use context::{RunContext, RunSettings};
