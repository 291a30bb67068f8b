use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::debug;

use crate::config::ConfigError;
use crate::types::Margin;

/// Category name that overrides the fallback margin when it appears in a margin file.
pub const FALLBACK_CATEGORY: &str = "*";

const DEFAULT_MARGINS: [(&str, u8); 8] = [
    ("Coffee", 65),
    ("Tea", 70),
    ("Drinking Chocolate", 60),
    ("Frappé", 55),
    ("Smoothies", 50),
    ("Bakery", 40),
    ("Branded", 30),
    ("Flavours", 75)
];

const DEFAULT_FALLBACK: u8 = 50;

#[derive(Debug, Deserialize)]
struct MarginRow {
    category: String,
    margin: Margin
}

/// Immutable mapping from product category to estimated profit margin.
///
/// Lookups ignore case. Categories missing from the table get the fallback margin.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginTable {
    margins: HashMap<String, Margin>,
    fallback: Margin
}

impl MarginTable {
    pub fn new<I, S>(margins: I, fallback: Margin) -> Self
    where
        I: IntoIterator<Item = (S, Margin)>,
        S: AsRef<str>,
    {
        Self {
            margins: margins.into_iter()
                .map(|(category, margin)| (normalise(category.as_ref()), margin))
                .collect(),
            fallback
        }
    }

    /// Loads a `category,margin` CSV. Margins may be ratios (`0.65`) or percentages (`65%`).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(reader);

        let mut margins = HashMap::new();
        let mut fallback = None;

        for result in reader.deserialize::<MarginRow>() {
            let row = result?;

            if row.category == FALLBACK_CATEGORY {
                if fallback.replace(row.margin).is_some() {
                    return Err(ConfigError::DuplicateCategory(row.category));
                }
                continue;
            }

            let key = normalise(&row.category);

            if margins.insert(key, row.margin).is_some() {
                return Err(ConfigError::DuplicateCategory(row.category));
            }
        }

        if margins.is_empty() {
            return Err(ConfigError::Empty);
        }

        let fallback = fallback.unwrap_or(Margin::percent(DEFAULT_FALLBACK));

        debug!("Loaded {} category margins (fallback {fallback})", margins.len());

        Ok(Self { margins, fallback })
    }

    pub fn lookup(&self, category: &str) -> Option<Margin> {
        self.margins.get(&normalise(category)).copied()
    }

    /// Margin for the category, or the fallback margin when it is unknown.
    pub fn margin_for(&self, category: &str) -> Margin {
        self.lookup(category).unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Margin {
        self.fallback
    }

    pub fn category_count(&self) -> usize {
        self.margins.len()
    }
}

impl Default for MarginTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_MARGINS.iter().map(|(category, points)| (*category, Margin::percent(*points))),
            Margin::percent(DEFAULT_FALLBACK)
        )
    }
}

fn normalise(category: &str) -> String {
    category.trim().to_lowercase()
}
