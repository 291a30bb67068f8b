use crate::types::errors::ValueError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Share of revenue kept as profit, stored as a ratio in `[0, 1]`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Margin(Decimal);

impl Margin {
    pub fn from_ratio(ratio: Decimal) -> Result<Self, ValueError> {
        if ratio.is_sign_negative() && !ratio.is_zero() {
            return Err(ValueError::Negative(ratio.to_string()));
        }

        if ratio > Decimal::ONE {
            return Err(ValueError::OutOfRange(ratio.to_string()));
        }

        Ok(Margin(ratio.normalize()))
    }

    /// Builds a margin from whole percentage points, e.g. `65` for 65%. Values above 100 are clamped.
    pub fn percent(points: u8) -> Self {
        Margin(Decimal::new(i64::from(points.min(100)), 2))
    }

    pub fn ratio(&self) -> Decimal {
        self.0
    }

    /// The complementary cost ratio (`1 - margin`).
    pub fn cost_ratio(&self) -> Decimal {
        Decimal::ONE - self.0
    }
}

impl Display for Margin {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let percent = (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        write!(formatter, "{percent:.1}%")
    }
}

impl FromStr for Margin {
    type Err = ValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(ValueError::InvalidFormat("Margin is an empty string".to_string()));
        }

        match value.strip_suffix('%') {
            Some(points) => {
                let points = Decimal::from_str(points.trim())?;
                Self::from_ratio(points / Decimal::ONE_HUNDRED)
            }
            None => Self::from_ratio(Decimal::from_str(value)?)
        }
    }
}

impl<'de> Deserialize<'de> for Margin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Margin::from_str(&value).map_err(de::Error::custom)
    }
}
