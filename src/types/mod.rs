mod errors;
mod margin;
mod parse;
#[cfg(test)]
mod tests;

pub use errors::ValueError;
pub use margin::Margin;
pub use parse::{collapse_whitespace, parse_date, parse_price, parse_quantity, parse_time, Normalized};

/// 1-based line number of a row in the input file, header included.
pub type LineNumber = u64;
pub type Quantity = u32;
