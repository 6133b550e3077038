use crate::dataset::DatasetState;
use crate::filter::{FilterState, NumericRange};
use crate::models::{
    ActorEdge, ActorGraph, ActorNode, AgeBucket, ContentAgeRecord, CountryYearRecord,
    GenreYearRecord, MovieRuntimeRecord, TvSeasonsRecord,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

pub fn genre_year_view<'a>(
    records: &'a [GenreYearRecord],
    state: &FilterState,
) -> Vec<&'a GenreYearRecord> {
    records
        .iter()
        .filter(|r| {
            passes_type_and_year(r, state) && state.admits_genre(Some(r.genre.as_str()))
        })
        .collect()
}

/// Heatmap rows. The genre axis is never narrowed by the genre selection,
/// otherwise unselected genres could not be picked from it.
pub fn genre_year_axis_view<'a>(
    records: &'a [GenreYearRecord],
    state: &FilterState,
) -> Vec<&'a GenreYearRecord> {
    records
        .iter()
        .filter(|r| passes_type_and_year(r, state))
        .collect()
}

fn passes_type_and_year(record: &GenreYearRecord, state: &FilterState) -> bool {
    state.admits_type(record.content_type) && state.admits_year(record.release_year)
}

pub fn movie_detail_view<'a>(
    records: &'a [MovieRuntimeRecord],
    state: &FilterState,
) -> Vec<&'a MovieRuntimeRecord> {
    records
        .iter()
        .filter(|r| {
            let Some(runtime) = r.runtime_minutes else {
                return false;
            };
            state.admits_year(r.release_year)
                && state.admits_genre(r.primary_genre.as_deref())
                && state.admits_rating(r.rating_group)
                && state.admits_country(r.primary_country.as_deref())
                && within_brush(state.movie_runtime_brush, runtime)
        })
        .collect()
}

pub fn tv_detail_view<'a>(
    records: &'a [TvSeasonsRecord],
    state: &FilterState,
) -> Vec<&'a TvSeasonsRecord> {
    records
        .iter()
        .filter(|r| {
            let Some(seasons) = r.seasons else {
                return false;
            };
            state.admits_year(r.release_year)
                && state.admits_genre(r.primary_genre.as_deref())
                && state.admits_rating(r.rating_group)
                && state.admits_country(r.primary_country.as_deref())
                && within_brush(state.tv_seasons_brush, seasons)
        })
        .collect()
}

fn within_brush(brush: Option<NumericRange>, value: u32) -> bool {
    brush.map_or(true, |b| b.contains(f64::from(value)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryTotal {
    pub country: String,
    pub count: u64,
}

pub fn country_records<'a>(
    records: &'a [CountryYearRecord],
    state: &FilterState,
) -> Vec<&'a CountryYearRecord> {
    records
        .iter()
        .filter(|r| state.admits_year(r.release_year))
        .collect()
}

pub fn country_view(records: &[CountryYearRecord], state: &FilterState) -> Vec<CountryTotal> {
    let mut totals: Vec<CountryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in country_records(records, state) {
        match index.get(record.country.as_str()) {
            Some(&i) => totals[i].count += record.count,
            None => {
                index.insert(&record.country, totals.len());
                totals.push(CountryTotal {
                    country: record.country.clone(),
                    count: record.count,
                });
            }
        }
    }
    totals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActorGraphControls {
    pub min_edge_weight: u32,
}

impl Default for ActorGraphControls {
    fn default() -> Self {
        ActorGraphControls { min_edge_weight: 2 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActorGraphView<'a> {
    pub nodes: Vec<&'a ActorNode>,
    pub edges: Vec<&'a ActorEdge>,
}

pub fn actor_graph_view<'a>(
    graph: &'a ActorGraph,
    controls: &ActorGraphControls,
) -> ActorGraphView<'a> {
    let edges: Vec<&ActorEdge> = graph
        .edges
        .iter()
        .filter(|e| e.weight >= controls.min_edge_weight)
        .collect();
    let linked: HashSet<&str> = edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .collect();
    let nodes = graph
        .nodes
        .iter()
        .filter(|n| linked.contains(n.id.as_str()))
        .collect();
    ActorGraphView { nodes, edges }
}

pub fn actor_neighbors<'a>(
    view: &ActorGraphView<'a>,
    actor_id: &str,
) -> Vec<(&'a ActorNode, u32)> {
    let mut weights: HashMap<&str, u32> = HashMap::new();
    for edge in &view.edges {
        let Some(other) = edge.other(actor_id) else {
            continue;
        };
        if other == actor_id {
            continue;
        }
        weights
            .entry(other)
            .and_modify(|w| *w = (*w).max(edge.weight))
            .or_insert(edge.weight);
    }
    let mut neighbors: Vec<(&ActorNode, u32)> = view
        .nodes
        .iter()
        .filter_map(|n| weights.get(n.id.as_str()).map(|w| (*n, *w)))
        .collect();
    neighbors.sort_by(|a, b| b.1.cmp(&a.1));
    neighbors
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum AgeClockView<'a> {
    NoData,
    Records(Vec<&'a ContentAgeRecord>),
}

impl AgeClockView<'_> {
    pub fn len(&self) -> usize {
        match self {
            AgeClockView::NoData => 0,
            AgeClockView::Records(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn age_clock_view<'a>(
    dataset: &'a DatasetState<Vec<ContentAgeRecord>>,
    state: &FilterState,
) -> AgeClockView<'a> {
    let Some(records) = dataset.as_loaded() else {
        return AgeClockView::NoData;
    };
    AgeClockView::Records(
        records
            .iter()
            .filter(|r| {
                passes_age_predicates(r, state)
                    && state
                        .selected_age_bucket
                        .map_or(true, |b| b.contains(r.age_years))
            })
            .collect(),
    )
}

pub fn age_bucket_counts(
    dataset: &DatasetState<Vec<ContentAgeRecord>>,
    state: &FilterState,
) -> Option<Vec<(AgeBucket, usize)>> {
    let records = dataset.as_loaded()?;
    let mut counts: Vec<(AgeBucket, usize)> = AgeBucket::ALL.map(|b| (b, 0)).to_vec();
    for record in records.iter().filter(|r| passes_age_predicates(r, state)) {
        if let Some(slot) = counts
            .iter_mut()
            .find(|(bucket, _)| bucket.contains(record.age_years))
        {
            slot.1 += 1;
        }
    }
    Some(counts)
}

// Negative ages mean the title was added before release: bad upstream data.
fn passes_age_predicates(record: &ContentAgeRecord, state: &FilterState) -> bool {
    record.age_years >= 0
        && state.admits_year(record.release_year)
        && state.admits_type(record.content_type)
        && state.admits_genre(record.primary_genre.as_deref())
}

/// Sum of `count` across the visible genre-year rows. One title may appear
/// under several genres, so this is not a row count.
pub fn total_titles(view: &[&GenreYearRecord]) -> u64 {
    view.iter().map(|r| r.count).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenreCount {
    All,
    Count(usize),
}

impl fmt::Display for GenreCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreCount::All => write!(f, "All"),
            GenreCount::Count(n) => write!(f, "{}", n),
        }
    }
}

pub fn active_genres(state: &FilterState) -> GenreCount {
    if state.genres.is_empty() {
        GenreCount::All
    } else {
        GenreCount::Count(state.genres.len())
    }
}

pub fn genres_present(records: &[GenreYearRecord]) -> BTreeSet<&str> {
    records.iter().map(|r| r.genre.as_str()).collect()
}

pub fn metric_extent<I>(values: I) -> Option<NumericRange>
where
    I: IntoIterator<Item = Option<u32>>,
{
    let mut extent: Option<(u32, u32)> = None;
    for value in values.into_iter().flatten() {
        extent = Some(match extent {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }
    extent.map(|(lo, hi)| NumericRange::new(f64::from(lo), f64::from(hi)))
}
