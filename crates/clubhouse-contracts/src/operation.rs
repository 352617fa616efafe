//! Named operations and their authorization requirements.
//!
//! Every request handler names the `Operation` it performs. The
//! `OperationCatalog` tags each operation with an `AccessRequirement`, which
//! is what the access gate evaluates. Requirements are declared here once
//! instead of being re-implemented per handler.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClubError, ClubResult};

/// How much the caller must prove before an operation may run.
///
/// Expressed in TOML as kebab-case strings:
/// ```toml
/// create_fixture = "allow-listed"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessRequirement {
    /// Anyone, including anonymous callers.
    Public,
    /// Any signed-in caller.
    Authenticated,
    /// A signed-in caller whose verified email is on the allow-list.
    AllowListed,
}

impl fmt::Display for AccessRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessRequirement::Public => "public",
            AccessRequirement::Authenticated => "authenticated",
            AccessRequirement::AllowListed => "allow-listed",
        };
        f.write_str(s)
    }
}

/// Every action the site exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ViewHome,
    ListFixtures,
    ListTrainingSessions,
    ListGalleries,
    GetGallery,
    CreateGallery,
    UpdateGallery,
    DeleteGallery,
    AddGalleryImage,
    UpdateGalleryImage,
    DeleteGalleryImage,
    CreateFixture,
    UpdateFixture,
    DeleteFixture,
    CreateTrainingSession,
    UpdateTrainingSession,
    DeleteTrainingSession,
    AdminArea,
    ViewActivity,
}

impl Operation {
    pub const ALL: [Operation; 19] = [
        Operation::ViewHome,
        Operation::ListFixtures,
        Operation::ListTrainingSessions,
        Operation::ListGalleries,
        Operation::GetGallery,
        Operation::CreateGallery,
        Operation::UpdateGallery,
        Operation::DeleteGallery,
        Operation::AddGalleryImage,
        Operation::UpdateGalleryImage,
        Operation::DeleteGalleryImage,
        Operation::CreateFixture,
        Operation::UpdateFixture,
        Operation::DeleteFixture,
        Operation::CreateTrainingSession,
        Operation::UpdateTrainingSession,
        Operation::DeleteTrainingSession,
        Operation::AdminArea,
        Operation::ViewActivity,
    ];

    /// Stable snake_case name used in config files, logs and access records.
    pub fn name(self) -> &'static str {
        match self {
            Operation::ViewHome => "view_home",
            Operation::ListFixtures => "list_fixtures",
            Operation::ListTrainingSessions => "list_training_sessions",
            Operation::ListGalleries => "list_galleries",
            Operation::GetGallery => "get_gallery",
            Operation::CreateGallery => "create_gallery",
            Operation::UpdateGallery => "update_gallery",
            Operation::DeleteGallery => "delete_gallery",
            Operation::AddGalleryImage => "add_gallery_image",
            Operation::UpdateGalleryImage => "update_gallery_image",
            Operation::DeleteGalleryImage => "delete_gallery_image",
            Operation::CreateFixture => "create_fixture",
            Operation::UpdateFixture => "update_fixture",
            Operation::DeleteFixture => "delete_fixture",
            Operation::CreateTrainingSession => "create_training_session",
            Operation::UpdateTrainingSession => "update_training_session",
            Operation::DeleteTrainingSession => "delete_training_session",
            Operation::AdminArea => "admin_area",
            Operation::ViewActivity => "view_activity",
        }
    }

    /// True for operations that write to the resource store.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Operation::CreateGallery
                | Operation::UpdateGallery
                | Operation::DeleteGallery
                | Operation::AddGalleryImage
                | Operation::UpdateGalleryImage
                | Operation::DeleteGalleryImage
                | Operation::CreateFixture
                | Operation::UpdateFixture
                | Operation::DeleteFixture
                | Operation::CreateTrainingSession
                | Operation::UpdateTrainingSession
                | Operation::DeleteTrainingSession
        )
    }

    /// The requirement an operation carries unless the policy file overrides it.
    pub fn default_requirement(self) -> AccessRequirement {
        match self {
            Operation::ViewHome
            | Operation::ListFixtures
            | Operation::ListTrainingSessions
            | Operation::ListGalleries
            | Operation::GetGallery => AccessRequirement::Public,

            Operation::CreateGallery
            | Operation::UpdateGallery
            | Operation::AddGalleryImage
            | Operation::UpdateGalleryImage
            | Operation::CreateFixture
            | Operation::UpdateFixture
            | Operation::CreateTrainingSession
            | Operation::UpdateTrainingSession => AccessRequirement::Authenticated,

            Operation::DeleteGallery
            | Operation::DeleteGalleryImage
            | Operation::DeleteFixture
            | Operation::DeleteTrainingSession
            | Operation::AdminArea
            | Operation::ViewActivity => AccessRequirement::AllowListed,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| ClubError::ConfigError {
                reason: format!("unknown operation '{}'", s),
            })
    }
}

/// An operation paired with the requirement it is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedOperation {
    pub operation: Operation,
    pub requirement: AccessRequirement,
}

impl ProtectedOperation {
    pub fn new(operation: Operation, requirement: AccessRequirement) -> Self {
        Self {
            operation,
            requirement,
        }
    }

    /// False only for public operations.
    pub fn requires_auth(&self) -> bool {
        self.requirement != AccessRequirement::Public
    }

    /// True when the caller's email must be on the allow-list.
    pub fn requires_allow_list(&self) -> bool {
        self.requirement == AccessRequirement::AllowListed
    }
}

/// The per-operation requirement table.
///
/// Built once at startup and shared read-only. Any operation without an
/// explicit entry falls back to `Operation::default_requirement`.
#[derive(Debug, Clone, Default)]
pub struct OperationCatalog {
    overrides: BTreeMap<Operation, AccessRequirement>,
}

impl OperationCatalog {
    /// Every operation that needs a session by default raised to
    /// `AllowListed`. No valid policy file is stricter than this for those
    /// operations; public reads stay public.
    pub fn locked_down() -> Self {
        let overrides = Operation::ALL
            .into_iter()
            .filter(|op| op.default_requirement() != AccessRequirement::Public)
            .map(|op| (op, AccessRequirement::AllowListed))
            .collect();
        Self { overrides }
    }

    /// Override the requirement of one operation.
    ///
    /// Returns `ConfigError` when the override would make a mutating operation
    /// public: every write to the store requires a session.
    pub fn set(&mut self, operation: Operation, requirement: AccessRequirement) -> ClubResult<()> {
        if operation.is_mutating() && requirement == AccessRequirement::Public {
            return Err(ClubError::ConfigError {
                reason: format!("mutating operation '{}' cannot be public", operation),
            });
        }
        self.overrides.insert(operation, requirement);
        Ok(())
    }

    pub fn requirement(&self, operation: Operation) -> AccessRequirement {
        self.overrides
            .get(&operation)
            .copied()
            .unwrap_or_else(|| operation.default_requirement())
    }

    pub fn protect(&self, operation: Operation) -> ProtectedOperation {
        ProtectedOperation::new(operation, self.requirement(operation))
    }
}
