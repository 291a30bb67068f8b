//! Reads the raw sales file, runs every stage in order and writes the outputs.

mod errors;
mod io;
mod runner;

pub use errors::PipelineError;
pub use runner::Pipeline;
