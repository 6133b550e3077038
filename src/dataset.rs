use crate::filter::YearRange;
use crate::models::{
    ActorGraph, ContentAgeRecord, CountryYearRecord, GenreYearRecord, MovieRuntimeRecord,
    RatingDistributionRecord, TvSeasonsRecord,
};
use serde::Serialize;

/// `Absent` is only used for the optional content-age dataset and means "no
/// data", not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum DatasetState<T> {
    Loading,
    Loaded(T),
    Failed(String),
    Absent,
}

impl<T> Default for DatasetState<T> {
    fn default() -> Self {
        DatasetState::Loading
    }
}

impl<T> DatasetState<T> {
    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            DatasetState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DatasetState::Loaded(_))
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, DatasetState::Absent)
    }
}

impl<R> DatasetState<Vec<R>> {
    pub fn records(&self) -> &[R] {
        self.as_loaded().map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub genre_year: DatasetState<Vec<GenreYearRecord>>,
    pub rating_distribution: DatasetState<Vec<RatingDistributionRecord>>,
    pub movie_runtime: DatasetState<Vec<MovieRuntimeRecord>>,
    pub tv_seasons: DatasetState<Vec<TvSeasonsRecord>>,
    pub country_year: DatasetState<Vec<CountryYearRecord>>,
    pub actor_graph: DatasetState<ActorGraph>,
    pub content_age: DatasetState<Vec<ContentAgeRecord>>,
}

impl Catalog {
    pub fn year_bounds(&self) -> Option<YearRange> {
        let records = self.genre_year.records();
        let lo = records.iter().map(|r| r.release_year).min()?;
        let hi = records.iter().map(|r| r.release_year).max()?;
        Some(YearRange { lo, hi })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;

    fn row(year: i32) -> GenreYearRecord {
        GenreYearRecord {
            release_year: year,
            genre: "Drama".to_string(),
            content_type: ContentType::Movie,
            count: 1,
            total: 1,
        }
    }

    #[test]
    fn year_bounds_follow_genre_year_rows() {
        let catalog = Catalog {
            genre_year: DatasetState::Loaded(vec![row(2011), row(1998), row(2020)]),
            ..Catalog::default()
        };
        assert_eq!(catalog.year_bounds(), Some(YearRange { lo: 1998, hi: 2020 }));
    }

    #[test]
    fn unloaded_dataset_has_no_records_or_bounds() {
        let failed = Catalog {
            genre_year: DatasetState::Failed("boom".to_string()),
            ..Catalog::default()
        };
        assert!(failed.genre_year.records().is_empty());
        assert_eq!(failed.year_bounds(), None);
        assert!(!failed.genre_year.is_no_data());
        assert!(DatasetState::<Vec<GenreYearRecord>>::Absent.is_no_data());
    }
}
