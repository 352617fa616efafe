//! Records held by the resource store and the inputs that create or change them.
//!
//! Input types carry a `validate()` method. Handlers call it after the access
//! gate allows the request and before the store is touched, so a rejected
//! input never causes a partial write.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ClubError, ClubResult};

// ── Galleries ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A gallery together with its images in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryWithImages {
    #[serde(flatten)]
    pub gallery: Gallery,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub gallery_id: String,
    /// Location of the blob in the external blob store.
    pub image_url: String,
    pub caption: Option<String>,
    /// Ascending sort key within the gallery.
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGallery {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewGallery {
    pub fn validate(&self) -> ClubResult<()> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl GalleryPatch {
    pub fn validate(&self) -> ClubResult<()> {
        if self.title.is_none() && self.description.is_none() {
            return Err(ClubError::invalid("nothing to update"));
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGalleryImage {
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    /// Appended after the last image when absent.
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl NewGalleryImage {
    pub fn validate(&self) -> ClubResult<()> {
        let url = self.image_url.trim();
        require_text("image_url", url)?;
        let looks_like_blob =
            url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/');
        if !looks_like_blob {
            return Err(ClubError::invalid(format!(
                "image_url must be an http(s) URL or a root-relative path, got '{}'",
                url
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryImagePatch {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl GalleryImagePatch {
    pub fn validate(&self) -> ClubResult<()> {
        if self.caption.is_none() && self.display_order.is_none() {
            return Err(ClubError::invalid("nothing to update"));
        }
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeOrAway {
    #[default]
    Home,
    Away,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub opponent: String,
    pub match_date: NaiveDate,
    pub kickoff: Option<NaiveTime>,
    pub venue: Option<String>,
    pub home_or_away: HomeOrAway,
    pub competition: Option<String>,
    /// Which club side plays, e.g. "1st XV" or "U14".
    pub team: Option<String>,
    pub score_for: Option<u16>,
    pub score_against: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFixture {
    pub opponent: String,
    pub match_date: NaiveDate,
    #[serde(default)]
    pub kickoff: Option<NaiveTime>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub home_or_away: HomeOrAway,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub score_for: Option<u16>,
    #[serde(default)]
    pub score_against: Option<u16>,
}

impl NewFixture {
    pub fn validate(&self) -> ClubResult<()> {
        require_text("opponent", &self.opponent)?;
        validate_score_pair(self.score_for, self.score_against)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixturePatch {
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub match_date: Option<NaiveDate>,
    #[serde(default)]
    pub kickoff: Option<NaiveTime>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub home_or_away: Option<HomeOrAway>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub score_for: Option<u16>,
    #[serde(default)]
    pub score_against: Option<u16>,
}

impl FixturePatch {
    pub fn validate(&self) -> ClubResult<()> {
        let untouched = self.opponent.is_none()
            && self.match_date.is_none()
            && self.kickoff.is_none()
            && self.venue.is_none()
            && self.home_or_away.is_none()
            && self.competition.is_none()
            && self.team.is_none()
            && self.score_for.is_none()
            && self.score_against.is_none();
        if untouched {
            return Err(ClubError::invalid("nothing to update"));
        }
        if let Some(opponent) = &self.opponent {
            require_text("opponent", opponent)?;
        }
        Ok(())
    }
}

/// Which side of "today" a fixture listing covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureFilter {
    Upcoming,
    Past,
    #[default]
    All,
}

impl FixtureFilter {
    /// Partition rule: a fixture dated `today` is upcoming, never past.
    pub fn admits(self, match_date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            FixtureFilter::Upcoming => match_date >= today,
            FixtureFilter::Past => match_date < today,
            FixtureFilter::All => true,
        }
    }
}

impl fmt::Display for FixtureFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FixtureFilter::Upcoming => "upcoming",
            FixtureFilter::Past => "past",
            FixtureFilter::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for FixtureFilter {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(FixtureFilter::Upcoming),
            "past" => Ok(FixtureFilter::Past),
            "all" | "" => Ok(FixtureFilter::All),
            other => Err(ClubError::invalid(format!(
                "filter must be one of upcoming, past, all; got '{}'",
                other
            ))),
        }
    }
}

/// Parameters for `ResourceStore::list_fixtures`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureQuery {
    pub filter: FixtureFilter,
    /// Applied after ordering.
    pub limit: Option<usize>,
}

// ── Training sessions ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: String,
    /// The group that trains, e.g. "Seniors" or "Minis (U7-U12)".
    pub squad: String,
    pub day: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub notes: Option<String>,
}

impl TrainingSession {
    /// Schedule order: Monday first, then by start time.
    pub fn schedule_key(&self) -> (u32, NaiveTime) {
        (self.day.num_days_from_monday(), self.start_time)
    }

    pub fn validate_times(&self) -> ClubResult<()> {
        validate_time_window(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTrainingSession {
    pub squad: String,
    pub day: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewTrainingSession {
    pub fn validate(&self) -> ClubResult<()> {
        require_text("squad", &self.squad)?;
        require_text("location", &self.location)?;
        validate_time_window(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingSessionPatch {
    #[serde(default)]
    pub squad: Option<String>,
    #[serde(default)]
    pub day: Option<Weekday>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TrainingSessionPatch {
    /// Field-level checks only. The time window is re-checked by the store
    /// against the merged record, since a patch may carry one bound.
    pub fn validate(&self) -> ClubResult<()> {
        let untouched = self.squad.is_none()
            && self.day.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.location.is_none()
            && self.notes.is_none();
        if untouched {
            return Err(ClubError::invalid("nothing to update"));
        }
        if let Some(squad) = &self.squad {
            require_text("squad", squad)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            validate_time_window(start, end)?;
        }
        Ok(())
    }
}

// ── Home page ────────────────────────────────────────────────────────────────

/// What the public home page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSummary {
    pub next_fixture: Option<Fixture>,
    pub latest_result: Option<Fixture>,
    pub gallery_count: usize,
    pub training_session_count: usize,
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn require_text(field: &str, value: &str) -> ClubResult<()> {
    if value.trim().is_empty() {
        return Err(ClubError::invalid(format!("'{}' is required", field)));
    }
    Ok(())
}

fn validate_score_pair(score_for: Option<u16>, score_against: Option<u16>) -> ClubResult<()> {
    if score_for.is_some() != score_against.is_some() {
        return Err(ClubError::invalid(
            "score_for and score_against must be given together",
        ));
    }
    Ok(())
}

fn validate_time_window(start: NaiveTime, end: NaiveTime) -> ClubResult<()> {
    if end <= start {
        return Err(ClubError::invalid(format!(
            "end_time {} must be after start_time {}",
            end, start
        )));
    }
    Ok(())
}
