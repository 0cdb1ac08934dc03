// The loaded dataset. Read once at startup and never mutated.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::delta::{self, Delta};
use crate::error::{CatalogError, Result};
use crate::fields::{Context, Field};
use crate::filter;
use crate::models::{FilterConfig, SortConfig, Vehicle};
use crate::sort;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        {
            let mut seen = HashSet::new();
            for v in &vehicles {
                if !seen.insert(v.id.as_str()) {
                    tracing::warn!(
                        id = %v.id,
                        "duplicate vehicle id in dataset; lookups return the first"
                    );
                }
            }
        }
        Self { vehicles }
    }

    /// Parses a JSON array of vehicle records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let vehicles: Vec<Vehicle> = serde_json::from_str(json)?;
        Ok(Self::new(vehicles))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let vehicles: Vec<Vehicle> = serde_json::from_reader(reader)?;
        Ok(Self::new(vehicles))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), vehicles = catalog.len(), "loaded vehicle dataset");
        Ok(catalog)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    // Stale ids (e.g. from an old shared link) just clear the baseline.
    pub fn baseline(&self, id: Option<&str>) -> Option<&Vehicle> {
        let id = id?;
        let found = self.get(id);
        if found.is_none() {
            let error = CatalogError::UnknownBaseline(id.to_string());
            tracing::warn!(%error, "baseline ignored");
        }
        found
    }

    /// Filter then sort: the list the user sees.
    pub fn view(
        &self,
        filter_config: &FilterConfig,
        sort_config: &SortConfig,
        ctx: &Context,
    ) -> Vec<&Vehicle> {
        let kept = filter::filter(&self.vehicles, filter_config, ctx);
        sort::sort(kept, sort_config, ctx)
    }

    pub fn deltas(
        &self,
        baseline: &Vehicle,
        vehicle: &Vehicle,
        fields: &[Field],
        ctx: &Context,
    ) -> Vec<Delta> {
        delta::deltas(baseline, vehicle, fields, ctx)
    }
}
