//! City identifiers and the city → data file table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{BikeshareError, Result};

/// One of the three cities with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name as typed at the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| BikeshareError::UnknownCity(s.to_string()))
    }
}

/// Optional columns a city's dataset carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCapabilities {
    #[serde(default)]
    pub has_gender: bool,
    #[serde(default)]
    pub has_birth_year: bool,
}

impl DatasetCapabilities {
    pub const FULL: Self = Self {
        has_gender: true,
        has_birth_year: true,
    };

    pub const BASIC: Self = Self {
        has_gender: false,
        has_birth_year: false,
    };
}

/// Where a city's trips live and which optional columns they have.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityEntry {
    pub file: String,
    #[serde(flatten)]
    pub capabilities: DatasetCapabilities,
}

/// Read-only table mapping each city to its CSV file.
///
/// The built-in table matches the published file names. A JSON file can
/// replace it:
/// ```json
/// {
///   "chicago": { "file": "chicago.csv", "has_gender": true, "has_birth_year": true },
///   "washington": { "file": "washington.csv" }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CityTable {
    entries: HashMap<City, CityEntry>,
}

impl Default for CityTable {
    fn default() -> Self {
        let entries = [
            (City::Chicago, "chicago.csv", DatasetCapabilities::FULL),
            (City::NewYorkCity, "new_york_city.csv", DatasetCapabilities::FULL),
            (City::Washington, "washington.csv", DatasetCapabilities::BASIC),
        ]
        .into_iter()
        .map(|(city, file, capabilities)| {
            (
                city,
                CityEntry {
                    file: file.to_string(),
                    capabilities,
                },
            )
        })
        .collect();

        Self { entries }
    }
}

impl CityTable {
    /// Loads the table from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses the table from JSON text. Keys must be known city names.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: HashMap<String, CityEntry> = serde_json::from_str(content)?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (name, entry) in raw {
            entries.insert(name.parse::<City>()?, entry);
        }
        Ok(Self { entries })
    }

    /// Returns the entry for `city`, if one is configured.
    pub fn get(&self, city: City) -> Option<&CityEntry> {
        self.entries.get(&city)
    }
}
