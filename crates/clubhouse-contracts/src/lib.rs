//! # clubhouse-contracts
//!
//! Shared types, schemas, and contracts for the Clubhouse site.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, input validation and error types.

pub mod access;
pub mod error;
pub mod identity;
pub mod operation;
pub mod policy;
pub mod resource;

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Weekday};

    use super::*;
    use error::ClubError;
    use identity::{CallerIdentity, SessionCredentials};
    use operation::{AccessRequirement, Operation, OperationCatalog};
    use policy::{AccessDecision, AuthorizationPolicy};
    use resource::{
        FixtureFilter, GalleryImagePatch, GalleryPatch, NewFixture, NewGallery, NewGalleryImage,
        NewTrainingSession, TrainingSessionPatch,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // ── AuthorizationPolicy ──────────────────────────────────────────────────

    #[test]
    fn policy_membership_is_case_insensitive() {
        let policy = AuthorizationPolicy::new(["Coach@Club.Example ", "secretary@club.example"]);

        assert!(policy.allows("coach@club.example"));
        assert!(policy.allows("  SECRETARY@club.example"));
        assert!(!policy.allows("random@x.com"));
        assert_eq!(policy.len(), 2);
    }

    #[test]
    fn policy_drops_blank_entries() {
        let policy = AuthorizationPolicy::new(["", "   ", "coach@club.example"]);
        assert_eq!(policy.len(), 1);
        assert!(!policy.allows(""));
    }

    #[test]
    fn deny_all_admits_nobody() {
        let policy = AuthorizationPolicy::deny_all();
        assert!(policy.is_empty());
        assert!(!policy.allows("coach@club.example"));
    }

    // ── AccessDecision ───────────────────────────────────────────────────────

    #[test]
    fn decision_into_result_maps_each_variant() {
        assert!(AccessDecision::Allow.into_result("p", "create_gallery").is_ok());

        match AccessDecision::DenyUnauthenticated.into_result("anonymous", "create_gallery") {
            Err(ClubError::Unauthenticated { operation }) => assert_eq!(operation, "create_gallery"),
            other => panic!("expected Unauthenticated, got {:?}", other),
        }

        match AccessDecision::DenyForbidden.into_result("user-7", "admin_area") {
            Err(ClubError::Forbidden { principal, operation }) => {
                assert_eq!(principal, "user-7");
                assert_eq!(operation, "admin_area");
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn decision_serializes_as_snake_case() {
        let json = serde_json::to_string(&AccessDecision::DenyForbidden).unwrap();
        assert_eq!(json, "\"deny_forbidden\"");
    }

    // ── CallerIdentity / SessionCredentials ──────────────────────────────────

    #[test]
    fn authenticated_identity_discards_blank_email() {
        let identity = CallerIdentity::authenticated("user-1", Some("  ".to_string()));
        assert_eq!(identity.email(), None);
        assert_eq!(identity.principal(), "user-1");
        assert!(!identity.is_anonymous());
    }

    #[test]
    fn anonymous_identity_reports_sentinel_principal() {
        let identity = CallerIdentity::Anonymous;
        assert!(identity.is_anonymous());
        assert_eq!(identity.principal(), "anonymous");
        assert_eq!(identity.email(), None);
    }

    #[test]
    fn bearer_token_wins_over_cookie() {
        let creds = SessionCredentials {
            bearer: Some("from-header".to_string()),
            cookie: Some("from-cookie".to_string()),
        };
        assert_eq!(creds.token(), Some("from-header"));

        let cookie_only = SessionCredentials {
            bearer: None,
            cookie: Some("from-cookie".to_string()),
        };
        assert_eq!(cookie_only.token(), Some("from-cookie"));

        assert_eq!(SessionCredentials::default().token(), None);
        assert_eq!(SessionCredentials::bearer("  ").token(), None);
    }

    // ── Operations and catalog ───────────────────────────────────────────────

    #[test]
    fn every_mutating_operation_requires_auth_by_default() {
        let catalog = OperationCatalog::default();
        for op in Operation::ALL {
            if op.is_mutating() {
                assert!(
                    catalog.protect(op).requires_auth(),
                    "{} must require a session",
                    op
                );
            }
        }
    }

    #[test]
    fn operation_names_round_trip_through_from_str() {
        for op in Operation::ALL {
            let parsed: Operation = op.name().parse().unwrap();
            assert_eq!(parsed, op);
        }
        assert!("drop_database".parse::<Operation>().is_err());
    }

    #[test]
    fn catalog_rejects_public_mutating_override() {
        let mut catalog = OperationCatalog::default();
        let err = catalog
            .set(Operation::DeleteGalleryImage, AccessRequirement::Public)
            .unwrap_err();
        assert!(err.to_string().contains("delete_gallery_image"));

        // Read operations may be tightened or loosened freely.
        catalog
            .set(Operation::ListGalleries, AccessRequirement::Authenticated)
            .unwrap();
        assert_eq!(
            catalog.requirement(Operation::ListGalleries),
            AccessRequirement::Authenticated
        );
    }

    #[test]
    fn catalog_override_replaces_default() {
        let mut catalog = OperationCatalog::default();
        assert_eq!(
            catalog.requirement(Operation::CreateGallery),
            AccessRequirement::Authenticated
        );
        catalog
            .set(Operation::CreateGallery, AccessRequirement::AllowListed)
            .unwrap();
        assert!(catalog.protect(Operation::CreateGallery).requires_allow_list());
    }

    #[test]
    fn locked_down_catalog_allow_lists_every_session_operation() {
        let catalog = OperationCatalog::locked_down();
        for op in Operation::ALL {
            let expected = if op.default_requirement() == AccessRequirement::Public {
                AccessRequirement::Public
            } else {
                AccessRequirement::AllowListed
            };
            assert_eq!(catalog.requirement(op), expected, "{}", op);
        }
    }

    // ── Fixture partition ────────────────────────────────────────────────────

    #[test]
    fn fixture_dated_today_is_upcoming_not_past() {
        let today = date(2026, 10, 17);
        assert!(FixtureFilter::Upcoming.admits(today, today));
        assert!(!FixtureFilter::Past.admits(today, today));
        assert!(FixtureFilter::All.admits(today, today));
    }

    #[test]
    fn fixture_filter_partitions_around_today() {
        let today = date(2026, 10, 17);
        let yesterday = date(2026, 10, 16);
        let tomorrow = date(2026, 10, 18);

        assert!(FixtureFilter::Past.admits(yesterday, today));
        assert!(!FixtureFilter::Upcoming.admits(yesterday, today));
        assert!(FixtureFilter::Upcoming.admits(tomorrow, today));
        assert!(!FixtureFilter::Past.admits(tomorrow, today));
    }

    #[test]
    fn fixture_filter_parses_query_values() {
        assert_eq!("upcoming".parse::<FixtureFilter>().unwrap(), FixtureFilter::Upcoming);
        assert_eq!("PAST".parse::<FixtureFilter>().unwrap(), FixtureFilter::Past);
        assert_eq!("".parse::<FixtureFilter>().unwrap(), FixtureFilter::All);
        assert!(matches!(
            "soon".parse::<FixtureFilter>(),
            Err(ClubError::InvalidInput { .. })
        ));
    }

    // ── Validation ───────────────────────────────────────────────────────────

    #[test]
    fn new_gallery_requires_title() {
        let gallery = NewGallery {
            title: "   ".to_string(),
            description: None,
        };
        let err = gallery.validate().unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn empty_patches_are_rejected() {
        assert!(GalleryPatch::default().validate().is_err());
        assert!(GalleryImagePatch::default().validate().is_err());
        assert!(TrainingSessionPatch::default().validate().is_err());

        let patch = GalleryImagePatch {
            caption: None,
            display_order: Some(3),
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn image_url_must_point_at_a_blob() {
        let ok = NewGalleryImage {
            image_url: "https://cdn.club.example/galleries/1/a.jpg".to_string(),
            caption: None,
            display_order: None,
        };
        assert!(ok.validate().is_ok());

        let relative = NewGalleryImage {
            image_url: "/uploads/a.jpg".to_string(),
            ..ok.clone()
        };
        assert!(relative.validate().is_ok());

        let bogus = NewGalleryImage {
            image_url: "javascript:alert(1)".to_string(),
            ..ok
        };
        assert!(matches!(bogus.validate(), Err(ClubError::InvalidInput { .. })));
    }

    #[test]
    fn fixture_scores_come_in_pairs() {
        let fixture = NewFixture {
            opponent: "Old Boys RFC".to_string(),
            match_date: date(2026, 9, 5),
            kickoff: None,
            venue: None,
            home_or_away: Default::default(),
            competition: None,
            team: None,
            score_for: Some(24),
            score_against: None,
        };
        assert!(fixture.validate().is_err());
    }

    #[test]
    fn training_session_end_must_follow_start() {
        let session = NewTrainingSession {
            squad: "Seniors".to_string(),
            day: Weekday::Tue,
            start_time: time(19, 0),
            end_time: time(18, 30),
            location: "Main pitch".to_string(),
            notes: None,
        };
        let err = session.validate().unwrap_err();
        assert!(err.to_string().contains("end_time"));
    }

    // ── ClubError display messages ───────────────────────────────────────────

    #[test]
    fn error_not_found_display() {
        let err = ClubError::NotFound {
            kind: "gallery",
            id: "g-1".to_string(),
        };
        assert_eq!(err.to_string(), "gallery 'g-1' not found");
    }

    #[test]
    fn error_upstream_display() {
        let err = ClubError::upstream("store lock poisoned");
        let msg = err.to_string();
        assert!(msg.contains("upstream failure"));
        assert!(msg.contains("store lock poisoned"));
    }

    #[test]
    fn error_config_display() {
        let err = ClubError::ConfigError {
            reason: "missing jwt secret".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }
}
