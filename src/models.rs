use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentType {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "movie" => Some(ContentType::Movie),
            "tv show" | "tvshow" | "tv" => Some(ContentType::TvShow),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ContentType::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown content type '{}'", raw)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl TypeFilter {
    pub fn matches(self, content_type: ContentType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Movie => content_type == ContentType::Movie,
            TypeFilter::TvShow => content_type == ContentType::TvShow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum RatingGroup {
    Kids,
    Teen,
    Adult,
    #[default]
    Other,
}

impl RatingGroup {
    pub const ALL: [RatingGroup; 4] = [
        RatingGroup::Kids,
        RatingGroup::Teen,
        RatingGroup::Adult,
        RatingGroup::Other,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "kids" => RatingGroup::Kids,
            "teen" | "teens" => RatingGroup::Teen,
            "adult" | "adults" => RatingGroup::Adult,
            _ => RatingGroup::Other,
        }
    }
}

impl<'de> Deserialize<'de> for RatingGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(RatingGroup::parse).unwrap_or(RatingGroup::Other))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreYearRecord {
    pub release_year: i32,
    pub genre: String,
    #[serde(rename = "type", alias = "contentType")]
    pub content_type: ContentType,
    pub count: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDistributionRecord {
    #[serde(rename = "type", alias = "contentType")]
    pub content_type: ContentType,
    #[serde(alias = "ratingGroup")]
    pub rating_group: RatingGroup,
    pub count: u64,
}

// Upstream aggregates sometimes write counts as floats (`90.0`).
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let Some(raw) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(n) = raw.as_u64() {
        return u32::try_from(n)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("{} is out of range", n)));
    }
    match raw.as_f64() {
        Some(f) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => {
            Ok(Some(f as u32))
        }
        _ => Err(serde::de::Error::custom(format!(
            "{} is not a whole non-negative number",
            raw
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRuntimeRecord {
    pub title: String,
    pub release_year: i32,
    #[serde(default, alias = "runtimeMinutes", deserialize_with = "whole_number")]
    pub runtime_minutes: Option<u32>,
    #[serde(default, alias = "ratingGroup")]
    pub rating_group: RatingGroup,
    #[serde(default, alias = "primaryGenre")]
    pub primary_genre: Option<String>,
    #[serde(default, alias = "primaryCountry")]
    pub primary_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvSeasonsRecord {
    pub title: String,
    pub release_year: i32,
    #[serde(default, deserialize_with = "whole_number")]
    pub seasons: Option<u32>,
    #[serde(default, alias = "ratingGroup")]
    pub rating_group: RatingGroup,
    #[serde(default, alias = "primaryGenre")]
    pub primary_genre: Option<String>,
    #[serde(default, alias = "primaryCountry")]
    pub primary_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryYearRecord {
    pub release_year: i32,
    pub country: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub degree: u32,
    #[serde(default, alias = "dominantGenre")]
    pub dominant_genre: Option<String>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorEdge {
    #[serde(alias = "sourceId")]
    pub source: String,
    #[serde(alias = "targetId")]
    pub target: String,
    pub weight: u32,
}

impl ActorEdge {
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    pub fn other(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(&self.target)
        } else if self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorGraph {
    pub nodes: Vec<ActorNode>,
    pub edges: Vec<ActorEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAgeRecord {
    pub title: String,
    #[serde(rename = "type", alias = "contentType")]
    pub content_type: ContentType,
    pub release_year: i32,
    pub added_year: i32,
    pub age_years: i32,
    #[serde(default, alias = "primaryGenre")]
    pub primary_genre: Option<String>,
    #[serde(default, alias = "ratingGroup")]
    pub rating_group: RatingGroup,
}

/// Time-to-catalogue buckets drawn by the age clock. Upper bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "0-1")]
    UpToOne,
    #[serde(rename = "2-4")]
    TwoToFour,
    #[serde(rename = "5-9")]
    FiveToNine,
    #[serde(rename = "10-19")]
    TenToNineteen,
    #[serde(rename = "20+")]
    TwentyPlus,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::UpToOne,
        AgeBucket::TwoToFour,
        AgeBucket::FiveToNine,
        AgeBucket::TenToNineteen,
        AgeBucket::TwentyPlus,
    ];

    pub fn bounds(self) -> (i32, Option<i32>) {
        match self {
            AgeBucket::UpToOne => (0, Some(2)),
            AgeBucket::TwoToFour => (2, Some(5)),
            AgeBucket::FiveToNine => (5, Some(10)),
            AgeBucket::TenToNineteen => (10, Some(20)),
            AgeBucket::TwentyPlus => (20, None),
        }
    }

    pub fn contains(self, age_years: i32) -> bool {
        let (lo, hi) = self.bounds();
        age_years >= lo && hi.map_or(true, |hi| age_years < hi)
    }

    pub fn for_age(age_years: i32) -> Option<AgeBucket> {
        AgeBucket::ALL.into_iter().find(|b| b.contains(age_years))
    }

    pub fn key(self) -> &'static str {
        match self {
            AgeBucket::UpToOne => "0-1",
            AgeBucket::TwoToFour => "2-4",
            AgeBucket::FiveToNine => "5-9",
            AgeBucket::TenToNineteen => "10-19",
            AgeBucket::TwentyPlus => "20+",
        }
    }

    pub fn from_key(key: &str) -> Option<AgeBucket> {
        AgeBucket::ALL.into_iter().find(|b| b.key() == key.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_content_type_spellings() {
        assert_eq!(ContentType::parse("Movie"), Some(ContentType::Movie));
        assert_eq!(ContentType::parse("TV Show"), Some(ContentType::TvShow));
        assert_eq!(ContentType::parse("TVShow"), Some(ContentType::TvShow));
        assert_eq!(ContentType::parse("podcast"), None);
    }

    #[test]
    fn missing_runtime_is_distinct_from_zero() {
        let missing: MovieRuntimeRecord = serde_json::from_value(json!({
            "title": "A",
            "release_year": 2001,
            "runtime_minutes": null,
            "rating_group": "Kids"
        }))
        .expect("record deserialize");
        let absent_key: MovieRuntimeRecord = serde_json::from_value(json!({
            "title": "B",
            "release_year": 2001,
            "rating_group": "Teen"
        }))
        .expect("record deserialize");
        let zero: MovieRuntimeRecord = serde_json::from_value(json!({
            "title": "C",
            "release_year": 2001,
            "runtimeMinutes": 0,
            "ratingGroup": "Adult"
        }))
        .expect("record deserialize");
        assert_eq!(missing.runtime_minutes, None);
        assert_eq!(absent_key.runtime_minutes, None);
        assert_eq!(zero.runtime_minutes, Some(0));
        assert_eq!(zero.rating_group, RatingGroup::Adult);
    }

    #[test]
    fn metrics_accept_whole_floats_only() {
        let row = |seasons: serde_json::Value| {
            serde_json::from_value::<TvSeasonsRecord>(json!({
                "title": "S",
                "release_year": 2010,
                "seasons": seasons
            }))
        };
        assert_eq!(row(json!(3.0)).expect("whole float").seasons, Some(3));
        assert_eq!(row(json!(4)).expect("integer").seasons, Some(4));
        assert_eq!(row(json!(null)).expect("null").seasons, None);
        assert!(row(json!(2.5)).is_err());
        assert!(row(json!(-1)).is_err());
        assert!(row(json!("three")).is_err());

        let movie: MovieRuntimeRecord = serde_json::from_value(json!({
            "title": "M",
            "release_year": 2010,
            "runtime_minutes": 90.0
        }))
        .expect("record deserialize");
        assert_eq!(movie.runtime_minutes, Some(90));
    }

    #[test]
    fn unknown_rating_falls_back_to_other() {
        let record: RatingDistributionRecord = serde_json::from_value(json!({
            "type": "Movie",
            "rating_group": "NR",
            "count": 4
        }))
        .expect("record deserialize");
        assert_eq!(record.rating_group, RatingGroup::Other);
    }

    #[test]
    fn age_buckets_cover_non_negative_ages() {
        assert_eq!(AgeBucket::for_age(0), Some(AgeBucket::UpToOne));
        assert_eq!(AgeBucket::for_age(1), Some(AgeBucket::UpToOne));
        assert_eq!(AgeBucket::for_age(2), Some(AgeBucket::TwoToFour));
        assert_eq!(AgeBucket::for_age(9), Some(AgeBucket::FiveToNine));
        assert_eq!(AgeBucket::for_age(19), Some(AgeBucket::TenToNineteen));
        assert_eq!(AgeBucket::for_age(75), Some(AgeBucket::TwentyPlus));
        assert_eq!(AgeBucket::for_age(-1), None);
        assert_eq!(AgeBucket::from_key("10-19"), Some(AgeBucket::TenToNineteen));
    }

    #[test]
    fn actor_edge_accepts_camel_case_ids() {
        let edge: ActorEdge = serde_json::from_value(json!({
            "sourceId": "a1",
            "targetId": "a2",
            "weight": 3
        }))
        .expect("edge deserialize");
        assert_eq!(edge.other("a1"), Some("a2"));
        assert_eq!(edge.other("a3"), None);
    }
}
