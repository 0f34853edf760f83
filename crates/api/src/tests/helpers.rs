// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API tests.
//!
//! The standard org chart: user 1 is the HR admin, user 2 manages
//! contributors 7, 8, and 9.

use crate::auth::AuthenticatedActor;
use crate::handlers::{activate_cycle, create_assignments, create_cycle};
use crate::request_response::{
    ActivateCycleRequest, AssignmentRequest, CreateAssignmentsRequest, CreateCycleRequest,
    WindowInfo,
};
use crate::store::{InMemoryStore, ReviewStore};
use tempo_audit::Cause;
use tempo_domain::{
    ManagerReviewForm, OrgProfile, PeerReviewForm, Rating, ReviewForm, UserRole,
};
use time::OffsetDateTime;
use time::macros::datetime;

/// Inside the self-assessment window.
pub fn during_self_assessment() -> OffsetDateTime {
    datetime!(2026-04-03 12:00 UTC)
}

/// Inside the peer-review window.
pub fn during_peer_review() -> OffsetDateTime {
    datetime!(2026-04-10 12:00 UTC)
}

/// Inside the manager-review window.
pub fn during_manager_review() -> OffsetDateTime {
    datetime!(2026-04-18 12:00 UTC)
}

/// After every window has closed.
pub fn after_all_windows() -> OffsetDateTime {
    datetime!(2026-05-01 12:00 UTC)
}

pub fn hr_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("session-admin"), 1, UserRole::HrAdmin)
}

pub fn manager() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("session-manager"), 2, UserRole::Manager)
}

pub fn contributor(user_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(
        format!("session-ic-{user_id}"),
        user_id,
        UserRole::IndividualContributor,
    )
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

/// A store seeded with the standard org chart.
pub fn seeded_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.upsert_profile(OrgProfile::new(1, UserRole::HrAdmin, None, 0));
    store.upsert_profile(OrgProfile::new(2, UserRole::Manager, None, 3));
    for user_id in [7, 8, 9] {
        store.upsert_profile(OrgProfile::new(
            user_id,
            UserRole::IndividualContributor,
            Some(2),
            0,
        ));
    }
    store
}

pub fn create_cycle_request() -> CreateCycleRequest {
    CreateCycleRequest {
        name: String::from("Q1 2026 Review"),
        review_type: String::from("quarterly"),
        review_period: WindowInfo {
            start: datetime!(2026-01-01 00:00 UTC),
            end: datetime!(2026-03-31 00:00 UTC),
        },
        self_assessment: WindowInfo {
            start: datetime!(2026-04-01 00:00 UTC),
            end: datetime!(2026-04-08 00:00 UTC),
        },
        peer_review: WindowInfo {
            start: datetime!(2026-04-08 00:00 UTC),
            end: datetime!(2026-04-15 00:00 UTC),
        },
        manager_review: WindowInfo {
            start: datetime!(2026-04-15 00:00 UTC),
            end: datetime!(2026-04-22 00:00 UTC),
        },
    }
}

/// Creates and activates a cycle, returning its identifier.
pub fn bootstrap_active_cycle(store: &mut InMemoryStore) -> i64 {
    let created = match create_cycle(store, create_cycle_request(), &hr_admin(), test_cause()) {
        Ok(r) => r,
        Err(e) => panic!("Cycle creation failed: {e}"),
    };
    let cycle_id = created.response.cycle_id;

    match activate_cycle(
        store,
        &ActivateCycleRequest { cycle_id },
        &hr_admin(),
        test_cause(),
        during_self_assessment(),
    ) {
        Ok(_) => {}
        Err(e) => panic!("Cycle activation failed: {e}"),
    }

    cycle_id
}

/// Seeds the standard assignments for the org chart: a self-assessment
/// for user 7, a peer review 7 -> 8, and a manager review 2 -> 7.
/// Returns the created instance identifiers in that order.
pub fn seed_standard_assignments(store: &mut InMemoryStore, cycle_id: i64) -> Vec<i64> {
    let request = CreateAssignmentsRequest {
        cycle_id,
        assignments: vec![
            AssignmentRequest {
                kind: String::from("self_assessment"),
                author_id: 7,
                subject_id: 7,
            },
            AssignmentRequest {
                kind: String::from("peer_review"),
                author_id: 7,
                subject_id: 8,
            },
            AssignmentRequest {
                kind: String::from("manager_review"),
                author_id: 2,
                subject_id: 7,
            },
        ],
    };

    match create_assignments(
        store,
        &request,
        &hr_admin(),
        test_cause(),
        during_self_assessment(),
    ) {
        Ok(r) => r.response.instance_ids,
        Err(e) => panic!("Assignment seeding failed: {e}"),
    }
}

pub fn rating(value: u8) -> Option<Rating> {
    match Rating::new(value) {
        Ok(r) => Some(r),
        Err(e) => panic!("Invalid test rating: {e}"),
    }
}

/// A patch that fully populates a peer-review form.
pub fn full_peer_patch() -> ReviewForm {
    ReviewForm::PeerReview(PeerReviewForm {
        collaboration_rating: rating(4),
        impact_rating: rating(5),
        collaboration_example: Some(String::from("Unblocked the data migration")),
        impact_example: Some(String::from("Halved page load times")),
        strengths_feedback: Some(String::from("Great written communication")),
        growth_feedback: Some(String::from("Could delegate more")),
    })
}

/// A patch that fully populates a manager-review form.
pub fn full_manager_patch() -> ReviewForm {
    ReviewForm::ManagerReview(ManagerReviewForm {
        overall_rating: rating(4),
        delivery_rating: rating(4),
        collaboration_rating: rating(4),
        growth_rating: rating(3),
        leadership_rating: rating(3),
        delivery_justification: Some(String::from("Shipped every committed milestone")),
        collaboration_justification: Some(String::from("Pairs well across teams")),
        growth_justification: Some(String::from("Took on on-call ownership")),
        leadership_justification: Some(String::from("Mentors two juniors")),
        strengths: Some(String::from("Execution and reliability")),
        growth_areas: Some(String::from("Strategic planning")),
        development_plan: Some(String::from("Lead the next platform project")),
    })
}
