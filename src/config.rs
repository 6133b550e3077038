use crate::loader::{CatalogSource, DirSource, HttpSource};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Url(String),
    Dir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data: DataLocation,
    pub min_edge_weight: u32,
}

const DEFAULT_MIN_EDGE_WEIGHT: u32 = 2;

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data = if let Some(url) = get("CATALOG_DATA_URL") {
            DataLocation::Url(url)
        } else if let Some(dir) = get("CATALOG_DATA_DIR") {
            DataLocation::Dir(PathBuf::from(dir))
        } else {
            bail!("Missing required environment variable: CATALOG_DATA_URL or CATALOG_DATA_DIR");
        };

        let min_edge_weight = match get("ACTOR_MIN_EDGE_WEIGHT") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("ACTOR_MIN_EDGE_WEIGHT is not a number: {}", raw))?,
            None => DEFAULT_MIN_EDGE_WEIGHT,
        };

        Ok(Self {
            data,
            min_edge_weight,
        })
    }

    pub fn source(&self) -> Box<dyn CatalogSource> {
        match &self.data {
            DataLocation::Url(url) => Box::new(HttpSource::new(url.clone())),
            DataLocation::Dir(dir) => Box::new(DirSource::new(dir.clone())),
        }
    }
}
