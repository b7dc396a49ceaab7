//! Sector and industry classification of securities.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Placeholder classification for symbols without a profile.
pub const UNKNOWN: &str = "Unknown";

/// Sector and industry of one security.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityProfile {
    /// Sector name
    pub sector: String,
    /// Industry name
    pub industry: String,
}

impl SecurityProfile {
    /// Create a profile.
    pub fn new(sector: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            sector: sector.into(),
            industry: industry.into(),
        }
    }

    /// Profile used when the provider has no classification.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }

    /// Whether both fields are the placeholder.
    pub fn is_unknown(&self) -> bool {
        self.sector == UNKNOWN && self.industry == UNKNOWN
    }
}

impl Default for SecurityProfile {
    fn default() -> Self {
        Self::unknown()
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    symbol: String,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    industry: Option<String>,
}

/// Symbol to profile lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataLookup {
    profiles: HashMap<String, SecurityProfile>,
}

impl MetadataLookup {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a lookup from CSV with `symbol`, `sector` and `industry` headers.
    ///
    /// Blank sector or industry cells read as [`UNKNOWN`].
    ///
    /// # Errors
    /// Returns an error if the CSV is malformed.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut lookup = Self::new();

        for row in csv_reader.deserialize() {
            let row: ProfileRow = row?;
            let or_unknown = |field: Option<String>| {
                field
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| UNKNOWN.to_string())
            };
            lookup.insert(
                row.symbol,
                SecurityProfile::new(or_unknown(row.sector), or_unknown(row.industry)),
            );
        }

        Ok(lookup)
    }

    /// Set the profile of `symbol`.
    pub fn insert(&mut self, symbol: impl Into<String>, profile: SecurityProfile) {
        self.profiles.insert(symbol.into(), profile);
    }

    /// Profile of `symbol`, or the [`UNKNOWN`] placeholder.
    pub fn get(&self, symbol: &str) -> SecurityProfile {
        self.profiles.get(symbol).cloned().unwrap_or_default()
    }

    /// Whether `symbol` has a profile.
    pub fn contains(&self, symbol: &str) -> bool {
        self.profiles.contains_key(symbol)
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Iterate over `(symbol, profile)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SecurityProfile)> {
        self.profiles.iter().map(|(s, p)| (s.as_str(), p))
    }

    /// Add every profile of `other`, replacing existing ones.
    pub fn extend(&mut self, other: Self) {
        self.profiles.extend(other.profiles);
    }
}

impl FromIterator<(String, SecurityProfile)> for MetadataLookup {
    fn from_iter<I: IntoIterator<Item = (String, SecurityProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}
