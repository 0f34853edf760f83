// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Progress rollups and dashboard reads through the API boundary.

use super::helpers::{
    after_all_windows, bootstrap_active_cycle, contributor, during_manager_review,
    during_peer_review, during_self_assessment, full_manager_patch, full_peer_patch, manager,
    seed_standard_assignments, seeded_store, test_cause,
};
use crate::error::ApiError;
use crate::handlers::{get_cycle_progress, get_dashboard, save_review, submit_review};
use crate::request_response::{
    AssignmentRequest, CreateAssignmentsRequest, SaveReviewRequest, SubmitReviewRequest,
};
use tempo_domain::InstanceStatus;

#[test]
fn test_cycle_progress_partitions_by_variant() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let ids = seed_standard_assignments(&mut store, cycle_id);

    // Complete the peer review only
    match save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: ids[1],
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
                instance_id: ids[1],
            },
            &contributor(7),
            test_cause(),
            during_peer_review(),
        )
    }) {
        Ok(_) => {}
        Err(e) => panic!("Setup failed: {e}"),
    }

    let progress = match get_cycle_progress(&store, cycle_id) {
        Ok(p) => p,
        Err(e) => panic!("Progress read failed: {e}"),
    };

    assert_eq!(progress.self_assessment.total, 1);
    assert_eq!(progress.self_assessment.completed, 0);
    assert_eq!(progress.peer_review.completed, 1);
    assert_eq!(progress.peer_review.percentage, 100);
    assert_eq!(progress.manager_review.completed, 0);
}

#[test]
fn test_progress_for_unknown_cycle_is_not_found() {
    let store = seeded_store();
    assert!(matches!(
        get_cycle_progress(&store, 999),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_manager_dashboard_counts_reviews_owed() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);

    // Manager 2 owes reviews for their three reports
    let request = CreateAssignmentsRequest {
        cycle_id,
        assignments: [7, 8, 9]
            .iter()
            .map(|employee_id| AssignmentRequest {
                kind: String::from("manager_review"),
                author_id: 2,
                subject_id: *employee_id,
            })
            .collect(),
    };
    let ids = match crate::handlers::create_assignments(
        &mut store,
        &request,
        &super::helpers::hr_admin(),
        test_cause(),
        during_self_assessment(),
    ) {
        Ok(r) => r.response.instance_ids,
        Err(e) => panic!("Seeding failed: {e}"),
    };

    // Two reviews completed, one saved but unsubmitted
    for id in &ids[..2] {
        match save_review(
            &mut store,
            &SaveReviewRequest {
                instance_id: *id,
                fields: full_manager_patch(),
            },
            &manager(),
            test_cause(),
            during_manager_review(),
        )
        .and_then(|_| {
            submit_review(
                &mut store,
                &SubmitReviewRequest { instance_id: *id },
                &manager(),
                test_cause(),
                during_manager_review(),
            )
        }) {
            Ok(_) => {}
            Err(e) => panic!("Setup failed: {e}"),
        }
    }
    match save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: ids[2],
            fields: full_manager_patch(),
        },
        &manager(),
        test_cause(),
        during_manager_review(),
    ) {
        Ok(_) => {}
        Err(e) => panic!("Setup failed: {e}"),
    }

    let dashboard = get_dashboard(&store, 2, during_manager_review()).dashboard;

    assert_eq!(dashboard.pending_tasks.manager_reviews_to_give, 1);
    assert_eq!(dashboard.completed_reviews, 2);
    assert_eq!(dashboard.cycles.len(), 1);
    assert_eq!(dashboard.cycles[0].manager_reviews_owed, 1);
    assert_eq!(dashboard.cycles[0].own_self_assessment, None);
}

#[test]
fn test_dashboard_tracks_own_self_assessment_status() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let ids = seed_standard_assignments(&mut store, cycle_id);

    let before = get_dashboard(&store, 7, during_self_assessment()).dashboard;
    assert_eq!(
        before.cycles[0].own_self_assessment,
        Some(InstanceStatus::NotStarted)
    );
    assert_eq!(before.pending_tasks.self_assessments_to_write, 1);
    assert_eq!(before.pending_tasks.peer_reviews_to_give, 1);

    // Complete the peer review; the self-assessment stays pending
    match save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: ids[1],
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
                instance_id: ids[1],
            },
            &contributor(7),
            test_cause(),
            during_peer_review(),
        )
    }) {
        Ok(_) => {}
        Err(e) => panic!("Setup failed: {e}"),
    }

    let after = get_dashboard(&store, 7, during_peer_review()).dashboard;
    assert_eq!(after.pending_tasks.peer_reviews_to_give, 0);
    assert_eq!(after.pending_tasks.self_assessments_to_write, 1);
    assert_eq!(after.completed_reviews, 1);
}

#[test]
fn test_unfinished_work_is_flagged_overdue_after_windows_close() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    seed_standard_assignments(&mut store, cycle_id);

    let during = get_dashboard(&store, 7, during_self_assessment()).dashboard;
    assert!(!during.cycles[0].has_overdue_obligations);

    let after = get_dashboard(&store, 7, after_all_windows()).dashboard;
    assert!(after.cycles[0].has_overdue_obligations);
    assert_eq!(after.cycles[0].phase, tempo_domain::CyclePhase::Completed);
}

#[test]
fn test_dashboard_is_empty_without_active_cycles() {
    let store = seeded_store();
    let dashboard = get_dashboard(&store, 7, during_self_assessment()).dashboard;

    assert!(dashboard.cycles.is_empty());
    assert_eq!(dashboard.pending_tasks.total(), 0);
    assert_eq!(dashboard.completed_reviews, 0);
}
