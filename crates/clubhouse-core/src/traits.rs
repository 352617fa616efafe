//! Collaborator traits at the access gate's trust boundary.
//!
//! - `IdentityProvider` : untrusted input in, caller identity out
//! - `AccessAuditor`    : trusted sink for every protected decision
//! - `ResourceStore`    : the CRUD backend, reached only after `Allow`
//!
//! The gate itself performs no I/O; everything that talks to the outside
//! world sits behind one of these traits.

use async_trait::async_trait;

use clubhouse_contracts::{
    access::AccessRecord,
    error::ClubResult,
    identity::{CallerIdentity, SessionCredentials},
    resource::{
        Fixture, FixturePatch, FixtureQuery, Gallery, GalleryImage, GalleryImagePatch,
        GalleryPatch, GalleryWithImages, HomeSummary, NewFixture, NewGallery, NewGalleryImage,
        NewTrainingSession, TrainingSession, TrainingSessionPatch,
    },
};

/// Resolves request credentials to a caller identity.
///
/// "No session" is not an error: implementations return
/// `CallerIdentity::Anonymous`. An `Err` means the provider itself failed
/// (unreachable, misconfigured); the gate treats that as anonymous too.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, credentials: &SessionCredentials) -> ClubResult<CallerIdentity>;
}

/// Append-only record of access decisions for protected operations.
///
/// A failed write aborts the request: a protected operation that cannot be
/// recorded does not run.
pub trait AccessAuditor: Send + Sync {
    fn record(&self, record: &AccessRecord) -> ClubResult<()>;
}

/// CRUD backend for galleries, gallery images, fixtures and training sessions.
///
/// Mutating methods are only called after the access gate returns `Allow`
/// and the input has been validated. Implementations own ordering:
/// images by `display_order`, fixtures partitioned around the current UTC
/// date with "today" counted as upcoming.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn home_summary(&self) -> ClubResult<HomeSummary>;

    async fn list_galleries(&self) -> ClubResult<Vec<Gallery>>;
    async fn get_gallery(&self, id: &str) -> ClubResult<GalleryWithImages>;
    async fn create_gallery(&self, input: NewGallery) -> ClubResult<Gallery>;
    async fn update_gallery(&self, id: &str, patch: GalleryPatch) -> ClubResult<Gallery>;
    /// Removes the gallery and all of its images.
    async fn delete_gallery(&self, id: &str) -> ClubResult<()>;

    async fn add_gallery_image(
        &self,
        gallery_id: &str,
        input: NewGalleryImage,
    ) -> ClubResult<GalleryImage>;
    async fn update_gallery_image(
        &self,
        id: &str,
        patch: GalleryImagePatch,
    ) -> ClubResult<GalleryImage>;
    async fn delete_gallery_image(&self, id: &str) -> ClubResult<()>;

    async fn list_fixtures(&self, query: FixtureQuery) -> ClubResult<Vec<Fixture>>;
    async fn create_fixture(&self, input: NewFixture) -> ClubResult<Fixture>;
    async fn update_fixture(&self, id: &str, patch: FixturePatch) -> ClubResult<Fixture>;
    async fn delete_fixture(&self, id: &str) -> ClubResult<()>;

    async fn list_training_sessions(&self) -> ClubResult<Vec<TrainingSession>>;
    async fn create_training_session(
        &self,
        input: NewTrainingSession,
    ) -> ClubResult<TrainingSession>;
    async fn update_training_session(
        &self,
        id: &str,
        patch: TrainingSessionPatch,
    ) -> ClubResult<TrainingSession>;
    async fn delete_training_session(&self, id: &str) -> ClubResult<()>;
}
