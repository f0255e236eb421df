//! Target regulatory markets.
//!
//! A `Market` selects the prompt template used by the gateway and the keyword
//! table used by the checker. The set is fixed at build time.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Market {
    /// Swiss Foodstuffs Ordinance (FSV), German and French labelling
    Switzerland,
    /// EU Regulation 1169/2011, English labelling
    Eu,
}

impl Market {
    pub const ALL: [Market; 2] = [Market::Switzerland, Market::Eu];

    /// URL slug used in the `/api/generate-{slug}` and `/api/validate-{slug}` paths
    pub fn slug(self) -> &'static str {
        match self {
            Market::Switzerland => "swiss",
            Market::Eu => "eu",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Market::Switzerland => "Switzerland",
            Market::Eu => "EU",
        }
    }

    /// Regulation the generated label is written against
    pub fn regulation(self) -> &'static str {
        match self {
            Market::Switzerland => "FSV - Foodstuff Act",
            Market::Eu => "Regulation 1169/2011",
        }
    }

    /// Languages the label must be written in, in order of appearance
    pub fn languages(self) -> &'static [&'static str] {
        match self {
            Market::Switzerland => &["German", "French"],
            Market::Eu => &["English"],
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown market: {0}")]
pub struct UnknownMarket(pub String);

impl FromStr for Market {
    type Err = UnknownMarket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swiss" | "switzerland" | "ch" => Ok(Market::Switzerland),
            "eu" | "europe" => Ok(Market::Eu),
            other => Err(UnknownMarket(other.to_string())),
        }
    }
}
