//! JSON seed data for a fresh store.
//!
//! Seeds use the same input shapes as the admin API, so a seed file is just
//! a batch of creates:
//!
//! ```json
//! {
//!   "galleries": [{ "title": "Cup final", "images": [{ "image_url": "/uploads/1.jpg" }] }],
//!   "fixtures": [{ "opponent": "Old Boys RFC", "match_date": "2026-11-07" }],
//!   "training_sessions": [{ "squad": "Seniors", "day": "Tue",
//!                           "start_time": "19:00:00", "end_time": "20:30:00",
//!                           "location": "Main pitch" }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use clubhouse_contracts::{
    error::{ClubError, ClubResult},
    resource::{NewFixture, NewGalleryImage, NewTrainingSession},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub galleries: Vec<SeedGallery>,
    #[serde(default)]
    pub fixtures: Vec<NewFixture>,
    #[serde(default)]
    pub training_sessions: Vec<NewTrainingSession>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedGallery {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<NewGalleryImage>,
}

impl SeedData {
    pub fn from_json_str(s: &str) -> ClubResult<Self> {
        serde_json::from_str(s).map_err(|e| ClubError::ConfigError {
            reason: format!("failed to parse seed JSON: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> ClubResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClubError::ConfigError {
            reason: format!("failed to read seed file '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }
}
