//! In-memory implementation of `ResourceStore`.
//!
//! All four resource kinds live in one `StoreState` behind a `RwLock`, so a
//! cascading delete (gallery → images) happens under a single write lock.
//! A poisoned lock is reported as `UpstreamFailure`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use clubhouse_contracts::{
    error::{ClubError, ClubResult},
    resource::{
        Fixture, FixtureFilter, FixturePatch, FixtureQuery, Gallery, GalleryImage,
        GalleryImagePatch, GalleryPatch, GalleryWithImages, HomeSummary, NewFixture, NewGallery,
        NewGalleryImage, NewTrainingSession, TrainingSession, TrainingSessionPatch,
    },
};
use clubhouse_core::traits::ResourceStore;

use crate::seed::SeedData;

/// Source of "today" for the fixture partition.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// The current UTC calendar date.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Default)]
struct StoreState {
    galleries: HashMap<String, Gallery>,
    images: HashMap<String, GalleryImage>,
    fixtures: HashMap<String, Fixture>,
    training_sessions: HashMap<String, TrainingSession>,
}

pub struct InMemoryResourceStore {
    state: RwLock<StoreState>,
    clock: Clock,
}

impl Default for InMemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryResourceStore {
    /// An empty store on the UTC clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(utc_today))
    }

    /// An empty store whose "today" comes from `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            clock,
        }
    }

    /// Insert every record in `seed`. Invalid seed entries are config errors.
    pub fn seed(&self, seed: SeedData) -> ClubResult<()> {
        let mut state = self.write()?;

        for gallery in seed.galleries {
            let input = NewGallery {
                title: gallery.title,
                description: gallery.description,
            };
            input.validate().map_err(seed_error)?;
            let created = insert_gallery(&mut state, input);
            for image in gallery.images {
                image.validate().map_err(seed_error)?;
                insert_image(&mut state, &created.id, image);
            }
        }
        for fixture in seed.fixtures {
            fixture.validate().map_err(seed_error)?;
            insert_fixture(&mut state, fixture);
        }
        for session in seed.training_sessions {
            session.validate().map_err(seed_error)?;
            insert_training_session(&mut state, session);
        }

        info!(
            galleries = state.galleries.len(),
            images = state.images.len(),
            fixtures = state.fixtures.len(),
            training_sessions = state.training_sessions.len(),
            "store seeded"
        );
        Ok(())
    }

    fn read(&self) -> ClubResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|e| ClubError::upstream(format!("store lock poisoned: {}", e)))
    }

    fn write(&self) -> ClubResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|e| ClubError::upstream(format!("store lock poisoned: {}", e)))
    }
}

// ── Sync helpers (used by both the trait impl and seeding) ───────────────────

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn seed_error(e: ClubError) -> ClubError {
    ClubError::ConfigError {
        reason: format!("invalid seed entry: {}", e),
    }
}

fn not_found(kind: &'static str, id: &str) -> ClubError {
    ClubError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn insert_gallery(state: &mut StoreState, input: NewGallery) -> Gallery {
    let gallery = Gallery {
        id: new_id(),
        title: input.title.trim().to_string(),
        description: input.description,
        created_at: Utc::now(),
    };
    state.galleries.insert(gallery.id.clone(), gallery.clone());
    gallery
}

fn insert_image(state: &mut StoreState, gallery_id: &str, input: NewGalleryImage) -> GalleryImage {
    // Append after the current last image unless an order was given.
    let display_order = input.display_order.unwrap_or_else(|| {
        state
            .images
            .values()
            .filter(|img| img.gallery_id == gallery_id)
            .map(|img| img.display_order)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    });

    let image = GalleryImage {
        id: new_id(),
        gallery_id: gallery_id.to_string(),
        image_url: input.image_url.trim().to_string(),
        caption: input.caption,
        display_order,
        created_at: Utc::now(),
    };
    state.images.insert(image.id.clone(), image.clone());
    image
}

fn insert_fixture(state: &mut StoreState, input: NewFixture) -> Fixture {
    let fixture = Fixture {
        id: new_id(),
        opponent: input.opponent.trim().to_string(),
        match_date: input.match_date,
        kickoff: input.kickoff,
        venue: input.venue,
        home_or_away: input.home_or_away,
        competition: input.competition,
        team: input.team,
        score_for: input.score_for,
        score_against: input.score_against,
    };
    state.fixtures.insert(fixture.id.clone(), fixture.clone());
    fixture
}

fn insert_training_session(state: &mut StoreState, input: NewTrainingSession) -> TrainingSession {
    let session = TrainingSession {
        id: new_id(),
        squad: input.squad.trim().to_string(),
        day: input.day,
        start_time: input.start_time,
        end_time: input.end_time,
        location: input.location.trim().to_string(),
        notes: input.notes,
    };
    state
        .training_sessions
        .insert(session.id.clone(), session.clone());
    session
}

fn ordered_images(state: &StoreState, gallery_id: &str) -> Vec<GalleryImage> {
    let mut images: Vec<GalleryImage> = state
        .images
        .values()
        .filter(|img| img.gallery_id == gallery_id)
        .cloned()
        .collect();
    images.sort_by(|a, b| {
        (a.display_order, a.created_at, &a.id).cmp(&(b.display_order, b.created_at, &b.id))
    });
    images
}

/// Fixtures admitted by `filter`, ordered for display.
///
/// Upcoming and all run soonest first; past runs most recent first.
fn ordered_fixtures(state: &StoreState, filter: FixtureFilter, today: NaiveDate) -> Vec<Fixture> {
    let mut fixtures: Vec<Fixture> = state
        .fixtures
        .values()
        .filter(|f| filter.admits(f.match_date, today))
        .cloned()
        .collect();
    fixtures.sort_by(|a, b| (a.match_date, a.kickoff, &a.id).cmp(&(b.match_date, b.kickoff, &b.id)));
    if filter == FixtureFilter::Past {
        fixtures.reverse();
    }
    fixtures
}

// ── ResourceStore impl ────────────────────────────────────────────────────────

#[async_trait]
impl ResourceStore for InMemoryResourceStore {
    async fn home_summary(&self) -> ClubResult<HomeSummary> {
        let state = self.read()?;
        let today = (self.clock)();

        Ok(HomeSummary {
            next_fixture: ordered_fixtures(&state, FixtureFilter::Upcoming, today)
                .into_iter()
                .next(),
            latest_result: ordered_fixtures(&state, FixtureFilter::Past, today)
                .into_iter()
                .next(),
            gallery_count: state.galleries.len(),
            training_session_count: state.training_sessions.len(),
        })
    }

    async fn list_galleries(&self) -> ClubResult<Vec<Gallery>> {
        let state = self.read()?;
        let mut galleries: Vec<Gallery> = state.galleries.values().cloned().collect();
        galleries.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        Ok(galleries)
    }

    async fn get_gallery(&self, id: &str) -> ClubResult<GalleryWithImages> {
        let state = self.read()?;
        let gallery = state
            .galleries
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("gallery", id))?;
        let images = ordered_images(&state, id);
        Ok(GalleryWithImages { gallery, images })
    }

    async fn create_gallery(&self, input: NewGallery) -> ClubResult<Gallery> {
        let mut state = self.write()?;
        let gallery = insert_gallery(&mut state, input);
        debug!(gallery_id = %gallery.id, "gallery created");
        Ok(gallery)
    }

    async fn update_gallery(&self, id: &str, patch: GalleryPatch) -> ClubResult<Gallery> {
        let mut state = self.write()?;
        let gallery = state
            .galleries
            .get_mut(id)
            .ok_or_else(|| not_found("gallery", id))?;
        if let Some(title) = patch.title {
            gallery.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            gallery.description = Some(description);
        }
        Ok(gallery.clone())
    }

    async fn delete_gallery(&self, id: &str) -> ClubResult<()> {
        let mut state = self.write()?;
        state
            .galleries
            .remove(id)
            .ok_or_else(|| not_found("gallery", id))?;
        let before = state.images.len();
        state.images.retain(|_, img| img.gallery_id != id);
        debug!(
            gallery_id = %id,
            images_removed = before - state.images.len(),
            "gallery deleted"
        );
        Ok(())
    }

    async fn add_gallery_image(
        &self,
        gallery_id: &str,
        input: NewGalleryImage,
    ) -> ClubResult<GalleryImage> {
        let mut state = self.write()?;
        if !state.galleries.contains_key(gallery_id) {
            return Err(not_found("gallery", gallery_id));
        }
        Ok(insert_image(&mut state, gallery_id, input))
    }

    async fn update_gallery_image(
        &self,
        id: &str,
        patch: GalleryImagePatch,
    ) -> ClubResult<GalleryImage> {
        let mut state = self.write()?;
        let image = state
            .images
            .get_mut(id)
            .ok_or_else(|| not_found("gallery image", id))?;
        if let Some(caption) = patch.caption {
            image.caption = Some(caption);
        }
        if let Some(order) = patch.display_order {
            image.display_order = order;
        }
        Ok(image.clone())
    }

    async fn delete_gallery_image(&self, id: &str) -> ClubResult<()> {
        let mut state = self.write()?;
        state
            .images
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("gallery image", id))
    }

    async fn list_fixtures(&self, query: FixtureQuery) -> ClubResult<Vec<Fixture>> {
        let state = self.read()?;
        let mut fixtures = ordered_fixtures(&state, query.filter, (self.clock)());
        if let Some(limit) = query.limit {
            fixtures.truncate(limit);
        }
        Ok(fixtures)
    }

    async fn create_fixture(&self, input: NewFixture) -> ClubResult<Fixture> {
        let mut state = self.write()?;
        Ok(insert_fixture(&mut state, input))
    }

    async fn update_fixture(&self, id: &str, patch: FixturePatch) -> ClubResult<Fixture> {
        let mut state = self.write()?;
        let current = state
            .fixtures
            .get(id)
            .ok_or_else(|| not_found("fixture", id))?;

        let mut updated = current.clone();
        if let Some(opponent) = patch.opponent {
            updated.opponent = opponent.trim().to_string();
        }
        if let Some(date) = patch.match_date {
            updated.match_date = date;
        }
        if patch.kickoff.is_some() {
            updated.kickoff = patch.kickoff;
        }
        if patch.venue.is_some() {
            updated.venue = patch.venue;
        }
        if let Some(side) = patch.home_or_away {
            updated.home_or_away = side;
        }
        if patch.competition.is_some() {
            updated.competition = patch.competition;
        }
        if patch.team.is_some() {
            updated.team = patch.team;
        }
        if patch.score_for.is_some() {
            updated.score_for = patch.score_for;
        }
        if patch.score_against.is_some() {
            updated.score_against = patch.score_against;
        }
        if updated.score_for.is_some() != updated.score_against.is_some() {
            return Err(ClubError::invalid(
                "score_for and score_against must be given together",
            ));
        }

        state.fixtures.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    async fn delete_fixture(&self, id: &str) -> ClubResult<()> {
        let mut state = self.write()?;
        state
            .fixtures
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("fixture", id))
    }

    async fn list_training_sessions(&self) -> ClubResult<Vec<TrainingSession>> {
        let state = self.read()?;
        let mut sessions: Vec<TrainingSession> =
            state.training_sessions.values().cloned().collect();
        sessions.sort_by(|a, b| (a.schedule_key(), &a.id).cmp(&(b.schedule_key(), &b.id)));
        Ok(sessions)
    }

    async fn create_training_session(
        &self,
        input: NewTrainingSession,
    ) -> ClubResult<TrainingSession> {
        let mut state = self.write()?;
        Ok(insert_training_session(&mut state, input))
    }

    async fn update_training_session(
        &self,
        id: &str,
        patch: TrainingSessionPatch,
    ) -> ClubResult<TrainingSession> {
        let mut state = self.write()?;
        let current = state
            .training_sessions
            .get(id)
            .ok_or_else(|| not_found("training session", id))?;

        // Merge into a copy so a rejected time window leaves the record as is.
        let mut updated = current.clone();
        if let Some(squad) = patch.squad {
            updated.squad = squad.trim().to_string();
        }
        if let Some(day) = patch.day {
            updated.day = day;
        }
        if let Some(start) = patch.start_time {
            updated.start_time = start;
        }
        if let Some(end) = patch.end_time {
            updated.end_time = end;
        }
        if let Some(location) = patch.location {
            updated.location = location.trim().to_string();
        }
        if patch.notes.is_some() {
            updated.notes = patch.notes;
        }
        updated.validate_times()?;

        state
            .training_sessions
            .insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    async fn delete_training_session(&self, id: &str) -> ClubResult<()> {
        let mut state = self.write()?;
        state
            .training_sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("training session", id))
    }
}
