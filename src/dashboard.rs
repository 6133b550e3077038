use crate::dataset::Catalog;
use crate::filter::{FilterModel, FilterState};
use crate::models::{
    ActorNode, AgeBucket, GenreYearRecord, MovieRuntimeRecord, RatingDistributionRecord,
    TvSeasonsRecord,
};
use crate::views::{
    self, ActorGraphControls, ActorGraphView, AgeClockView, CountryTotal, GenreCount,
};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub catalog: Catalog,
    pub filters: FilterModel,
    pub actor_controls: ActorGraphControls,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub revision: u64,
    pub filters: &'a FilterState,
    pub total_titles: u64,
    pub active_genres: GenreCount,
    pub genre_year: Vec<&'a GenreYearRecord>,
    pub genre_heatmap: Vec<&'a GenreYearRecord>,
    pub movies: Vec<&'a MovieRuntimeRecord>,
    pub tv_shows: Vec<&'a TvSeasonsRecord>,
    pub countries: Vec<CountryTotal>,
    pub actor_graph: ActorGraphView<'a>,
    pub focused_actor: Option<&'a ActorNode>,
    pub focused_neighbors: Vec<(&'a ActorNode, u32)>,
    pub age_clock: AgeClockView<'a>,
    pub age_buckets: Option<Vec<(AgeBucket, usize)>>,
    pub rating_distribution: &'a [RatingDistributionRecord],
}

impl Dashboard {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_controls(catalog, ActorGraphControls::default())
    }

    pub fn with_controls(catalog: Catalog, actor_controls: ActorGraphControls) -> Self {
        let bounds = catalog.year_bounds();
        match bounds {
            Some(b) => info!("Year bounds {}..={}", b.lo, b.hi),
            None => info!("No genre-year data; year range left unbounded"),
        }
        Dashboard {
            catalog,
            filters: FilterModel::new(bounds),
            actor_controls,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        let state = self.filters.state();
        let genre_year = views::genre_year_view(self.catalog.genre_year.records(), state);
        let total_titles = views::total_titles(&genre_year);

        let actor_graph = self
            .catalog
            .actor_graph
            .as_loaded()
            .map(|g| views::actor_graph_view(g, &self.actor_controls))
            .unwrap_or_default();
        let focused_actor = state.focused_actor.as_deref().and_then(|id| {
            self.catalog
                .actor_graph
                .as_loaded()
                .and_then(|g| g.nodes.iter().find(|n| n.id == id))
        });
        let focused_neighbors = state
            .focused_actor
            .as_deref()
            .map(|id| views::actor_neighbors(&actor_graph, id))
            .unwrap_or_default();

        DashboardSnapshot {
            revision: self.filters.revision(),
            filters: state,
            total_titles,
            active_genres: views::active_genres(state),
            genre_heatmap: views::genre_year_axis_view(self.catalog.genre_year.records(), state),
            genre_year,
            movies: views::movie_detail_view(self.catalog.movie_runtime.records(), state),
            tv_shows: views::tv_detail_view(self.catalog.tv_seasons.records(), state),
            countries: views::country_view(self.catalog.country_year.records(), state),
            actor_graph,
            focused_actor,
            focused_neighbors,
            age_clock: views::age_clock_view(&self.catalog.content_age, state),
            age_buckets: views::age_bucket_counts(&self.catalog.content_age, state),
            rating_distribution: self.catalog.rating_distribution.records(),
        }
    }
}
