//! Record stores: where a city's trips come from.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

use crate::config::{City, CityTable, DatasetCapabilities};
use crate::error::{BikeshareError, Result};
use crate::parser::parse_trips;
use crate::trip::Trip;

/// All trips for one city, with time fields already derived.
///
/// Owned by a single analysis run and dropped afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub city: City,
    pub capabilities: DatasetCapabilities,
    pub trips: Vec<Trip>,
}

/// Supplies the trips recorded for a city.
pub trait RecordStore {
    fn load(&self, city: City) -> Result<Dataset>;
}

/// Reads city CSV files from a data directory.
pub struct CsvStore {
    data_dir: PathBuf,
    cities: CityTable,
}

impl CsvStore {
    pub fn new(data_dir: impl Into<PathBuf>, cities: CityTable) -> Self {
        Self {
            data_dir: data_dir.into(),
            cities,
        }
    }
}

impl RecordStore for CsvStore {
    #[tracing::instrument(skip_all, fields(city = %city))]
    fn load(&self, city: City) -> Result<Dataset> {
        let entry = self
            .cities
            .get(city)
            .ok_or_else(|| BikeshareError::MissingCityConfig(city.to_string()))?;
        let path = self.data_dir.join(&entry.file);

        let file = File::open(&path)?;
        let records = parse_trips(BufReader::new(file))?;
        info!(path = %path.display(), trips = records.len(), "Loaded city data");

        Ok(Dataset {
            city,
            capabilities: entry.capabilities,
            trips: records.into_iter().map(Trip::new).collect(),
        })
    }
}

/// Fixed in-memory trips, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    datasets: Vec<Dataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.retain(|d| d.city != dataset.city);
        self.datasets.push(dataset);
        self
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, city: City) -> Result<Dataset> {
        self.datasets
            .iter()
            .find(|d| d.city == city)
            .cloned()
            .ok_or_else(|| BikeshareError::MissingCityConfig(city.to_string()))
    }
}
