// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Review save/submit behavior through the API boundary.

use super::helpers::{
    bootstrap_active_cycle, contributor, during_peer_review, during_self_assessment,
    full_peer_patch, manager, rating, seed_standard_assignments, seeded_store, test_cause,
};
use crate::error::ApiError;
use crate::handlers::{save_review, submit_review};
use crate::request_response::{SaveReviewRequest, SubmitReviewRequest};
use crate::store::ReviewStore;
use tempo_domain::{InstanceStatus, PeerReviewForm, ReviewForm};

#[test]
fn test_partial_save_reports_completion() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let ids = seed_standard_assignments(&mut store, cycle_id);
    let peer_id = ids[1];

    let patch = ReviewForm::PeerReview(PeerReviewForm {
        collaboration_rating: rating(4),
        impact_rating: rating(5),
        collaboration_example: Some(String::from("Unblocked the migration")),
        ..PeerReviewForm::default()
    });

    let result = match save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: peer_id,
            fields: patch,
        },
        &contributor(7),
        test_cause(),
        during_peer_review(),
    ) {
        Ok(r) => r,
        Err(e) => panic!("Save failed: {e}"),
    };

    assert_eq!(result.response.status, "in_progress");
    assert_eq!(result.response.completion_percentage, 50);

    let persisted = match store.get_instance(peer_id) {
        Ok(i) => i,
        Err(e) => panic!("Instance not persisted: {e}"),
    };
    assert_eq!(persisted.status, InstanceStatus::InProgress);
}

#[test]
fn test_incomplete_submission_enumerates_missing_fields() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let ids = seed_standard_assignments(&mut store, cycle_id);

    let result = submit_review(
        &mut store,
        &SubmitReviewRequest {
            instance_id: ids[1],
        },
        &contributor(7),
        test_cause(),
        during_peer_review(),
    );

    match result {
        Err(ApiError::ValidationFailed { missing_fields, .. }) => {
            assert_eq!(missing_fields.len(), 6);
            assert!(missing_fields.contains(&String::from("collaboration_rating")));
            assert!(missing_fields.contains(&String::from("growth_feedback")));
        }
        other => panic!("Expected ValidationFailed with missing fields, got {other:?}"),
    }
}

#[test]
fn test_full_save_then_submit_then_resubmit_fails() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let ids = seed_standard_assignments(&mut store, cycle_id);
    let peer_id = ids[1];

    match save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: peer_id,
            fields: full_peer_patch(),
        },
        &contributor(7),
        test_cause(),
        during_peer_review(),
    ) {
        Ok(r) => assert_eq!(r.response.completion_percentage, 100),
        Err(e) => panic!("Save failed: {e}"),
    }

    let submitted_at = during_peer_review();
    let submitted = match submit_review(
        &mut store,
        &SubmitReviewRequest {
            instance_id: peer_id,
        },
        &contributor(7),
        test_cause(),
        submitted_at,
    ) {
        Ok(r) => r,
        Err(e) => panic!("Submit failed: {e}"),
    };

    assert_eq!(submitted.response.status, "completed");
    assert_eq!(submitted.response.submitted_at, submitted_at);

    let persisted = match store.get_instance(peer_id) {
        Ok(i) => i,
        Err(e) => panic!("Instance not persisted: {e}"),
    };
    assert_eq!(persisted.submitted_at, Some(submitted_at));

    // Submission is not idempotent
    let again = submit_review(
        &mut store,
        &SubmitReviewRequest {
            instance_id: peer_id,
        },
        &contributor(7),
        test_cause(),
        during_peer_review(),
    );
    assert!(matches!(again, Err(ApiError::ValidationFailed { .. })));
}

#[test]
fn test_save_after_submit_is_rejected() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let ids = seed_standard_assignments(&mut store, cycle_id);
    let peer_id = ids[1];

    match save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: peer_id,
            fields: full_peer_patch(),
        },
        &contributor(7),
        test_cause(),
        during_peer_review(),
    )
    .and_then(|_| {
        submit_review(
            &mut store,
            &SubmitReviewRequest {
                instance_id: peer_id,
            },
            &contributor(7),
            test_cause(),
            during_peer_review(),
        )
    }) {
        Ok(_) => {}
        Err(e) => panic!("Setup failed: {e}"),
    }

    let result = save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: peer_id,
            fields: full_peer_patch(),
        },
        &contributor(7),
        test_cause(),
        during_peer_review(),
    );

    assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));
}

#[test]
fn test_manager_review_save_by_manager() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let ids = seed_standard_assignments(&mut store, cycle_id);
    let manager_review_id = ids[2];

    let result = match save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: manager_review_id,
            fields: super::helpers::full_manager_patch(),
        },
        &manager(),
        test_cause(),
        super::helpers::during_manager_review(),
    ) {
        Ok(r) => r,
        Err(e) => panic!("Save failed: {e}"),
    };

    assert_eq!(result.response.completion_percentage, 100);
}

#[test]
fn test_unknown_instance_is_not_found() {
    let mut store = seeded_store();
    bootstrap_active_cycle(&mut store);

    let result = save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: 999,
            fields: full_peer_patch(),
        },
        &contributor(7),
        test_cause(),
        during_self_assessment(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_failed_submission_leaves_store_untouched() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let ids = seed_standard_assignments(&mut store, cycle_id);
    let audit_len_before = store.audit_log().len();

    let result = submit_review(
        &mut store,
        &SubmitReviewRequest {
            instance_id: ids[1],
        },
        &contributor(7),
        test_cause(),
        during_peer_review(),
    );
    assert!(result.is_err());

    let persisted = match store.get_instance(ids[1]) {
        Ok(i) => i,
        Err(e) => panic!("Instance not persisted: {e}"),
    };
    assert_eq!(persisted.status, InstanceStatus::NotStarted);
    assert_eq!(persisted.submitted_at, None);
    // No audit event for the failed transition
    assert_eq!(store.audit_log().len(), audit_len_before);
}
