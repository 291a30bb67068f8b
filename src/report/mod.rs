//! Text rendering of the aggregated results.

mod format;
mod insights;
mod renderer;

pub use renderer::Report;
