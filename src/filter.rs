use crate::models::{AgeBucket, ContentType, RatingGroup, TypeFilter};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl YearRange {
    pub const UNBOUNDED: YearRange = YearRange {
        lo: i32::MIN,
        hi: i32::MAX,
    };

    pub fn new(a: i32, b: i32) -> Self {
        if a <= b {
            YearRange { lo: a, hi: b }
        } else {
            YearRange { lo: b, hi: a }
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.lo && year <= self.hi
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.lo, self.hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    pub lo: f64,
    pub hi: f64,
}

impl NumericRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            NumericRange { lo: a, hi: b }
        } else {
            NumericRange { lo: b, hi: a }
        }
    }

    pub fn from_selection(selection: Option<(f64, f64)>) -> Option<Self> {
        let (a, b) = selection?;
        if a.is_nan() || b.is_nan() {
            return None;
        }
        Some(NumericRange::new(a, b))
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

/// Selected genres. Empty means every genre passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenreSelection(BTreeSet<String>);

impl GenreSelection {
    pub fn admits(&self, genre: Option<&str>) -> bool {
        if self.0.is_empty() {
            return true;
        }
        genre.is_some_and(|g| self.0.contains(g))
    }

    pub fn toggle(&mut self, genre: &str) {
        if !self.0.remove(genre) {
            self.0.insert(genre.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.0.contains(genre)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for GenreSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        GenreSelection(iter.into_iter().map(Into::into).collect())
    }
}

/// Active rating groups. Empty means nothing passes, unlike `GenreSelection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSelection(BTreeSet<RatingGroup>);

impl Default for RatingSelection {
    fn default() -> Self {
        RatingSelection(RatingGroup::ALL.into_iter().collect())
    }
}

impl RatingSelection {
    pub fn none() -> Self {
        RatingSelection(BTreeSet::new())
    }

    pub fn admits(&self, group: RatingGroup) -> bool {
        self.0.contains(&group)
    }

    pub fn toggle(&mut self, group: RatingGroup) {
        if !self.0.remove(&group) {
            self.0.insert(group);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RatingGroup> + '_ {
        self.0.iter().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    pub type_filter: TypeFilter,
    pub year_range: YearRange,
    pub genres: GenreSelection,
    pub rating_groups: RatingSelection,
    pub movie_runtime_brush: Option<NumericRange>,
    pub tv_seasons_brush: Option<NumericRange>,
    pub selected_country: Option<String>,
    pub focused_actor: Option<String>,
    pub selected_age_bucket: Option<AgeBucket>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState::with_year_range(YearRange::UNBOUNDED)
    }
}

impl FilterState {
    pub fn with_year_range(year_range: YearRange) -> Self {
        FilterState {
            type_filter: TypeFilter::All,
            year_range,
            genres: GenreSelection::default(),
            rating_groups: RatingSelection::default(),
            movie_runtime_brush: None,
            tv_seasons_brush: None,
            selected_country: None,
            focused_actor: None,
            selected_age_bucket: None,
        }
    }

    pub fn admits_type(&self, content_type: ContentType) -> bool {
        self.type_filter.matches(content_type)
    }

    pub fn admits_year(&self, year: i32) -> bool {
        self.year_range.contains(year)
    }

    pub fn admits_genre(&self, genre: Option<&str>) -> bool {
        self.genres.admits(genre)
    }

    pub fn admits_rating(&self, group: RatingGroup) -> bool {
        self.rating_groups.admits(group)
    }

    pub fn admits_country(&self, country: Option<&str>) -> bool {
        match self.selected_country.as_deref() {
            Some(selected) => country == Some(selected),
            None => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterModel {
    bounds: Option<YearRange>,
    state: FilterState,
    revision: u64,
}

impl Default for FilterModel {
    fn default() -> Self {
        FilterModel::new(None)
    }
}

impl FilterModel {
    pub fn new(bounds: Option<YearRange>) -> Self {
        FilterModel {
            bounds,
            state: FilterState::with_year_range(bounds.unwrap_or(YearRange::UNBOUNDED)),
            revision: 0,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn bounds(&self) -> Option<YearRange> {
        self.bounds
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn apply_year_bounds(&mut self, bounds: YearRange) {
        self.bounds = Some(bounds);
        self.state.year_range = bounds;
        self.touch("year_bounds");
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.state.type_filter = type_filter;
        self.touch("type_filter");
    }

    /// Endpoints are swapped when reversed and clamped into the observed bounds.
    pub fn set_year_range(&mut self, lo: i32, hi: i32) {
        let range = YearRange::new(self.clamp_year(lo), self.clamp_year(hi));
        self.state.year_range = range;
        self.touch("year_range");
    }

    pub fn set_year_start(&mut self, year: i32) {
        let lo = self.clamp_year(year);
        let hi = self.state.year_range.hi.max(lo);
        self.state.year_range = YearRange { lo, hi };
        self.touch("year_range");
    }

    pub fn set_year_end(&mut self, year: i32) {
        let hi = self.clamp_year(year);
        let lo = self.state.year_range.lo.min(hi);
        self.state.year_range = YearRange { lo, hi };
        self.touch("year_range");
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        self.state.genres.toggle(genre);
        self.touch("genres");
    }

    pub fn toggle_rating_group(&mut self, group: RatingGroup) {
        self.state.rating_groups.toggle(group);
        self.touch("rating_groups");
    }

    pub fn set_movie_runtime_brush(&mut self, brush: Option<NumericRange>) {
        self.state.movie_runtime_brush = brush;
        self.touch("movie_runtime_brush");
    }

    pub fn set_tv_seasons_brush(&mut self, brush: Option<NumericRange>) {
        self.state.tv_seasons_brush = brush;
        self.touch("tv_seasons_brush");
    }

    pub fn set_selected_country(&mut self, country: Option<String>) {
        self.state.selected_country = country;
        self.touch("selected_country");
    }

    pub fn set_focused_actor(&mut self, actor_id: Option<String>) {
        self.state.focused_actor = actor_id;
        self.touch("focused_actor");
    }

    /// Picking the bucket that is already selected clears it.
    pub fn set_selected_age_bucket(&mut self, bucket: Option<AgeBucket>) {
        self.state.selected_age_bucket = match bucket {
            Some(b) if self.state.selected_age_bucket == Some(b) => None,
            other => other,
        };
        self.touch("selected_age_bucket");
    }

    pub fn reset(&mut self) {
        self.state = FilterState::with_year_range(self.bounds.unwrap_or(YearRange::UNBOUNDED));
        self.touch("reset");
    }

    fn clamp_year(&self, year: i32) -> i32 {
        match self.bounds {
            Some(bounds) => bounds.clamp(year),
            None => year,
        }
    }

    fn touch(&mut self, dimension: &'static str) {
        self.revision += 1;
        debug!(dimension, revision = self.revision, "Filter state changed");
    }
}

pub trait GenreToggle {
    fn toggle_genre(&mut self, genre: &str);
}

pub trait RuntimeBrush {
    fn set_movie_runtime_brush(&mut self, brush: Option<NumericRange>);
}

pub trait SeasonsBrush {
    fn set_tv_seasons_brush(&mut self, brush: Option<NumericRange>);
}

pub trait CountryPick {
    fn set_selected_country(&mut self, country: Option<String>);
}

pub trait ActorFocus {
    fn set_focused_actor(&mut self, actor_id: Option<String>);
}

pub trait AgeBucketPick {
    fn set_selected_age_bucket(&mut self, bucket: Option<AgeBucket>);
}

impl GenreToggle for FilterModel {
    fn toggle_genre(&mut self, genre: &str) {
        FilterModel::toggle_genre(self, genre)
    }
}

impl RuntimeBrush for FilterModel {
    fn set_movie_runtime_brush(&mut self, brush: Option<NumericRange>) {
        FilterModel::set_movie_runtime_brush(self, brush)
    }
}

impl SeasonsBrush for FilterModel {
    fn set_tv_seasons_brush(&mut self, brush: Option<NumericRange>) {
        FilterModel::set_tv_seasons_brush(self, brush)
    }
}

impl CountryPick for FilterModel {
    fn set_selected_country(&mut self, country: Option<String>) {
        FilterModel::set_selected_country(self, country)
    }
}

impl ActorFocus for FilterModel {
    fn set_focused_actor(&mut self, actor_id: Option<String>) {
        FilterModel::set_focused_actor(self, actor_id)
    }
}

impl AgeBucketPick for FilterModel {
    fn set_selected_age_bucket(&mut self, bucket: Option<AgeBucket>) {
        FilterModel::set_selected_age_bucket(self, bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> FilterModel {
        FilterModel::new(Some(YearRange { lo: 1990, hi: 2021 }))
    }

    #[test]
    fn reset_restores_documented_defaults() {
        let mut m = model();
        m.set_type_filter(TypeFilter::TvShow);
        m.set_year_range(2000, 2005);
        m.toggle_genre("Drama");
        m.toggle_rating_group(RatingGroup::Kids);
        m.set_movie_runtime_brush(Some(NumericRange::new(80.0, 120.0)));
        m.set_tv_seasons_brush(Some(NumericRange::new(1.0, 3.0)));
        m.set_selected_country(Some("France".to_string()));
        m.set_focused_actor(Some("a1".to_string()));
        m.set_selected_age_bucket(Some(AgeBucket::TwentyPlus));

        m.reset();

        let expected = FilterState::with_year_range(YearRange { lo: 1990, hi: 2021 });
        assert_eq!(m.state(), &expected);
        assert_eq!(m.state().rating_groups.iter().count(), 4);
    }

    #[test]
    fn toggle_genre_twice_is_identity() {
        let mut m = model();
        m.toggle_genre("Comedy");
        let before = m.state().genres.clone();
        m.toggle_genre("Drama");
        m.toggle_genre("Drama");
        assert_eq!(m.state().genres, before);
        m.toggle_genre("Comedy");
        assert!(m.state().genres.is_empty());
    }

    #[test]
    fn empty_genre_selection_admits_everything() {
        let genres = GenreSelection::default();
        assert!(genres.admits(Some("Horror")));
        assert!(genres.admits(None));

        let picked: GenreSelection = ["Horror"].into_iter().collect();
        assert!(picked.admits(Some("Horror")));
        assert!(!picked.admits(Some("Drama")));
        assert!(!picked.admits(None));
    }

    #[test]
    fn empty_rating_selection_admits_nothing() {
        let none = RatingSelection::none();
        for group in RatingGroup::ALL {
            assert!(!none.admits(group));
        }

        let mut m = model();
        for group in RatingGroup::ALL {
            m.toggle_rating_group(group);
        }
        assert!(m.state().rating_groups.is_empty());
    }

    #[test]
    fn year_range_is_normalized_and_clamped() {
        let mut m = model();
        m.set_year_range(2010, 2001);
        assert_eq!(m.state().year_range, YearRange { lo: 2001, hi: 2010 });

        m.set_year_range(1900, 2100);
        assert_eq!(m.state().year_range, YearRange { lo: 1990, hi: 2021 });

        m.set_year_range(2005, 2008);
        m.set_year_start(2012);
        assert_eq!(m.state().year_range, YearRange { lo: 2012, hi: 2012 });
        m.set_year_end(1995);
        assert_eq!(m.state().year_range, YearRange { lo: 1995, hi: 1995 });
    }

    #[test]
    fn applying_bounds_resets_active_range() {
        let mut m = FilterModel::default();
        assert_eq!(m.state().year_range, YearRange::UNBOUNDED);
        m.apply_year_bounds(YearRange { lo: 1950, hi: 2020 });
        assert_eq!(m.state().year_range, YearRange { lo: 1950, hi: 2020 });
    }

    #[test]
    fn age_bucket_toggles_but_country_replaces() {
        let mut m = model();
        m.set_selected_age_bucket(Some(AgeBucket::FiveToNine));
        m.set_selected_age_bucket(Some(AgeBucket::FiveToNine));
        assert_eq!(m.state().selected_age_bucket, None);

        m.set_selected_age_bucket(Some(AgeBucket::FiveToNine));
        m.set_selected_age_bucket(Some(AgeBucket::UpToOne));
        assert_eq!(m.state().selected_age_bucket, Some(AgeBucket::UpToOne));

        m.set_selected_country(Some("France".to_string()));
        m.set_selected_country(Some("France".to_string()));
        assert_eq!(m.state().selected_country.as_deref(), Some("France"));
    }

    #[test]
    fn cleared_brush_selection_is_absent() {
        assert_eq!(NumericRange::from_selection(None), None);
        assert_eq!(
            NumericRange::from_selection(Some((150.0, 90.0))),
            Some(NumericRange { lo: 90.0, hi: 150.0 })
        );
        let brush = NumericRange::new(90.0, 90.0);
        assert!(brush.contains(90.0));
        assert!(!brush.contains(90.5));
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut m = model();
        let start = m.revision();
        m.set_type_filter(TypeFilter::Movie);
        m.toggle_genre("Drama");
        m.reset();
        assert_eq!(m.revision(), start + 3);
    }

    fn brush_from_chart(target: &mut impl RuntimeBrush, selection: Option<(f64, f64)>) {
        target.set_movie_runtime_brush(NumericRange::from_selection(selection));
    }

    #[test]
    fn leaf_surface_writes_one_dimension() {
        let mut m = model();
        brush_from_chart(&mut m, Some((60.0, 95.0)));
        assert_eq!(m.state().movie_runtime_brush, Some(NumericRange::new(60.0, 95.0)));
        brush_from_chart(&mut m, None);
        assert_eq!(m.state().movie_runtime_brush, None);
        assert_eq!(m.state().tv_seasons_brush, None);
    }
}
