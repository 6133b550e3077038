use crate::dataset::{Catalog, DatasetState};
use crate::models::ActorGraph;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const GENRE_YEAR: &str = "genre_year.json";
pub const RATING_DISTRIBUTION: &str = "rating_distribution.json";
pub const MOVIE_RUNTIME: &str = "movie_runtime.json";
pub const TV_SEASONS: &str = "tv_seasons.json";
pub const COUNTRY_YEAR: &str = "country_year.json";
pub const ACTOR_GRAPH: &str = "actor_graph.json";
pub const CONTENT_AGE: &str = "content_age.json";

pub const DATASETS: [&str; 7] = [
    GENRE_YEAR,
    RATING_DISTRIBUTION,
    MOVIE_RUNTIME,
    TV_SEASONS,
    COUNTRY_YEAR,
    ACTOR_GRAPH,
    CONTENT_AGE,
];

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Raw bytes of one document. `Ok(None)` means the document has no content.
    async fn fetch(&self, name: &str) -> Result<Option<Vec<u8>>>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(name))
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let url = self.url_for(name);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?;
        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT
        ) {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .with_context(|| format!("{} returned an error status", url))?;
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        Ok(non_empty(body.to_vec()))
    }
}

#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CatalogSource for DirSource {
    async fn fetch(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(non_empty(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

fn non_empty(bytes: Vec<u8>) -> Option<Vec<u8>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(bytes)
    }
}

// Only a wrong outer shape fails a document. Rows that do not deserialize are dropped.
trait Document: Sized {
    fn from_value(doc: Value, name: &str) -> Result<Self>;
}

impl<R: DeserializeOwned> Document for Vec<R> {
    fn from_value(doc: Value, name: &str) -> Result<Self> {
        let Value::Array(rows) = doc else {
            bail!("{} is not a JSON array", name);
        };
        Ok(keep_valid_rows(rows, name))
    }
}

impl Document for ActorGraph {
    fn from_value(doc: Value, name: &str) -> Result<Self> {
        let Value::Object(mut map) = doc else {
            bail!("{} is not a JSON object", name);
        };
        let nodes = take_rows(&mut map, "nodes", name)?;
        let edges = take_rows(&mut map, "edges", name)?;
        Ok(ActorGraph {
            nodes: keep_valid_rows(nodes, name),
            edges: keep_valid_rows(edges, name),
        })
    }
}

fn take_rows(map: &mut Map<String, Value>, key: &str, name: &str) -> Result<Vec<Value>> {
    match map.remove(key) {
        Some(Value::Array(rows)) => Ok(rows),
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(_) => bail!("{}: '{}' is not a JSON array", name, key),
    }
}

fn keep_valid_rows<R: DeserializeOwned>(rows: Vec<Value>, name: &str) -> Vec<R> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(i, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(dataset = name, row = i, "Dropping malformed record: {}", e);
                None
            }
        })
        .collect()
}

async fn fetch_parsed<T: Document>(source: &dyn CatalogSource, name: &str) -> Result<Option<T>> {
    let Some(bytes) = source.fetch(name).await? else {
        return Ok(None);
    };
    let doc: Value =
        serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {}", name))?;
    T::from_value(doc, name).map(Some)
}

async fn load_required<T: Document>(
    source: &dyn CatalogSource,
    name: &str,
) -> DatasetState<T> {
    match fetch_parsed(source, name).await {
        Ok(Some(data)) => {
            debug!(dataset = name, "Dataset loaded");
            DatasetState::Loaded(data)
        }
        Ok(None) => {
            warn!(dataset = name, "Required dataset has no content");
            DatasetState::Failed(format!("{} has no content", name))
        }
        Err(e) => {
            warn!(dataset = name, "Failed to load dataset: {:#}", e);
            DatasetState::Failed(format!("{:#}", e))
        }
    }
}

async fn load_optional<T: Document>(
    source: &dyn CatalogSource,
    name: &str,
) -> DatasetState<T> {
    match fetch_parsed(source, name).await {
        Ok(Some(data)) => DatasetState::Loaded(data),
        Ok(None) => {
            info!(dataset = name, "Optional dataset not available");
            DatasetState::Absent
        }
        Err(e) => {
            info!(dataset = name, "Optional dataset unavailable: {:#}", e);
            DatasetState::Absent
        }
    }
}

pub async fn load_catalog(source: &dyn CatalogSource) -> Catalog {
    let (
        genre_year,
        rating_distribution,
        movie_runtime,
        tv_seasons,
        country_year,
        actor_graph,
        content_age,
    ) = tokio::join!(
        load_required(source, GENRE_YEAR),
        load_required(source, RATING_DISTRIBUTION),
        load_required(source, MOVIE_RUNTIME),
        load_required(source, TV_SEASONS),
        load_required(source, COUNTRY_YEAR),
        load_required(source, ACTOR_GRAPH),
        load_optional(source, CONTENT_AGE),
    );
    let catalog = Catalog {
        genre_year,
        rating_distribution,
        movie_runtime,
        tv_seasons,
        country_year,
        actor_graph,
        content_age,
    };
    info!(
        genre_year = catalog.genre_year.records().len(),
        movies = catalog.movie_runtime.records().len(),
        tv_shows = catalog.tv_seasons.records().len(),
        countries = catalog.country_year.records().len(),
        content_age = catalog.content_age.records().len(),
        "Catalog loaded"
    );
    catalog
}
