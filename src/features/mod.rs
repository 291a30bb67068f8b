mod deriver;
#[cfg(test)]
mod tests;

pub use deriver::derive_all;
