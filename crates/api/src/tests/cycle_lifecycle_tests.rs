// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cycle lifecycle enforcement through the API boundary.
//!
//! These tests verify that cycles only move draft → active → completed
//! (or → cancelled), that activation validates the schedule, and that
//! review content is frozen outside the active state.

use super::helpers::{
    bootstrap_active_cycle, create_cycle_request, during_self_assessment, full_peer_patch,
    hr_admin, seed_standard_assignments, seeded_store, test_cause,
};
use crate::error::ApiError;
use crate::handlers::{
    activate_cycle, cancel_cycle, complete_cycle, create_cycle, delete_cycle, get_cycle_progress,
    list_cycles, save_review, update_cycle,
};
use crate::request_response::{
    ActivateCycleRequest, CancelCycleRequest, CompleteCycleRequest, DeleteCycleRequest,
    SaveReviewRequest, UpdateCycleRequest,
};
use crate::store::ReviewStore;
use tempo_domain::CycleStatus;

#[test]
fn test_created_cycle_starts_in_draft() {
    let mut store = seeded_store();

    let result = match create_cycle(&mut store, create_cycle_request(), &hr_admin(), test_cause())
    {
        Ok(r) => r,
        Err(e) => panic!("Cycle creation failed: {e}"),
    };

    assert_eq!(result.response.status, "draft");
    assert_eq!(result.audit_event.action.name, "CreateCycle");

    let persisted = match store.get_cycle(result.response.cycle_id) {
        Ok(c) => c,
        Err(e) => panic!("Cycle not persisted: {e}"),
    };
    assert_eq!(persisted.status, CycleStatus::Draft);
    assert_eq!(persisted.created_by, 1);
}

#[test]
fn test_create_cycle_rejects_unknown_review_type() {
    let mut store = seeded_store();
    let mut request = create_cycle_request();
    request.review_type = String::from("biweekly");

    let result = create_cycle(&mut store, request, &hr_admin(), test_cause());
    assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));
}

#[test]
fn test_activation_persists_and_audits() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);

    let persisted = match store.get_cycle(cycle_id) {
        Ok(c) => c,
        Err(e) => panic!("Cycle not persisted: {e}"),
    };
    assert_eq!(persisted.status, CycleStatus::Active);

    let actions: Vec<&str> = store
        .audit_log()
        .iter()
        .map(|e| e.action.name.as_str())
        .collect();
    assert_eq!(actions, vec!["CreateCycle", "ActivateCycle"]);
}

#[test]
fn test_activation_with_inverted_window_fails() {
    let mut store = seeded_store();
    let mut request = create_cycle_request();
    std::mem::swap(
        &mut request.manager_review.start,
        &mut request.manager_review.end,
    );

    let created = match create_cycle(&mut store, request, &hr_admin(), test_cause()) {
        Ok(r) => r,
        Err(e) => panic!("Cycle creation failed: {e}"),
    };

    // Drafts accept malformed schedules; activation is where they become binding
    let result = activate_cycle(
        &mut store,
        &ActivateCycleRequest {
            cycle_id: created.response.cycle_id,
        },
        &hr_admin(),
        test_cause(),
        during_self_assessment(),
    );

    assert!(matches!(result, Err(ApiError::InvalidCycleState { .. })));

    // The failed activation left the cycle in draft
    let persisted = match store.get_cycle(created.response.cycle_id) {
        Ok(c) => c,
        Err(e) => panic!("Cycle not persisted: {e}"),
    };
    assert_eq!(persisted.status, CycleStatus::Draft);
}

#[test]
fn test_complete_then_cancel_is_rejected() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);

    match complete_cycle(
        &mut store,
        &CompleteCycleRequest { cycle_id },
        &hr_admin(),
        test_cause(),
        during_self_assessment(),
    ) {
        Ok(r) => assert_eq!(r.response.status, "completed"),
        Err(e) => panic!("Completion failed: {e}"),
    }

    let result = cancel_cycle(
        &mut store,
        &CancelCycleRequest { cycle_id },
        &hr_admin(),
        test_cause(),
        during_self_assessment(),
    );
    assert!(matches!(result, Err(ApiError::InvalidCycleState { .. })));
}

#[test]
fn test_cancelled_cycle_leaves_instances_readable_but_frozen() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    let instance_ids = seed_standard_assignments(&mut store, cycle_id);

    match cancel_cycle(
        &mut store,
        &CancelCycleRequest { cycle_id },
        &hr_admin(),
        test_cause(),
        during_self_assessment(),
    ) {
        Ok(_) => {}
        Err(e) => panic!("Cancellation failed: {e}"),
    }

    // Instances are still there to read
    assert_eq!(store.list_instances_for_cycle(cycle_id).len(), 3);
    assert!(get_cycle_progress(&store, cycle_id).is_ok());

    // But writing is rejected
    let result = save_review(
        &mut store,
        &SaveReviewRequest {
            instance_id: instance_ids[1],
            fields: full_peer_patch(),
        },
        &super::helpers::contributor(7),
        test_cause(),
        during_self_assessment(),
    );
    assert!(matches!(result, Err(ApiError::InvalidCycleState { .. })));
}

#[test]
fn test_unknown_cycle_is_not_found() {
    let mut store = seeded_store();

    let result = activate_cycle(
        &mut store,
        &ActivateCycleRequest { cycle_id: 999 },
        &hr_admin(),
        test_cause(),
        during_self_assessment(),
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_list_cycles_reports_phase_and_reverse_creation_order() {
    let mut store = seeded_store();
    let first = bootstrap_active_cycle(&mut store);
    let mut second_request = create_cycle_request();
    second_request.name = String::from("Q2 2026 Review");
    let second = match create_cycle(&mut store, second_request, &hr_admin(), test_cause()) {
        Ok(r) => r.response.cycle_id,
        Err(e) => panic!("Cycle creation failed: {e}"),
    };

    let listing = list_cycles(&store, during_self_assessment());

    let ids: Vec<i64> = listing.cycles.iter().map(|c| c.cycle_id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(listing.cycles[1].current_phase, "self_assessment");
    assert_eq!(listing.cycles[1].status, "active");
    assert_eq!(listing.cycles[0].status, "draft");
}

#[test]
fn test_draft_cycle_can_be_renamed_and_rescheduled() {
    let mut store = seeded_store();
    let created = match create_cycle(&mut store, create_cycle_request(), &hr_admin(), test_cause())
    {
        Ok(r) => r,
        Err(e) => panic!("Cycle creation failed: {e}"),
    };
    let cycle_id = created.response.cycle_id;

    let result = match update_cycle(
        &mut store,
        &UpdateCycleRequest {
            cycle_id,
            name: Some(String::from("Q1 2026 Review (revised)")),
            review_type: None,
            review_period: None,
            self_assessment: None,
            peer_review: None,
            manager_review: None,
        },
        &hr_admin(),
        test_cause(),
    ) {
        Ok(r) => r,
        Err(e) => panic!("Update failed: {e}"),
    };

    assert_eq!(result.response.name, "Q1 2026 Review (revised)");
    let persisted = match store.get_cycle(cycle_id) {
        Ok(c) => c,
        Err(e) => panic!("Cycle not persisted: {e}"),
    };
    assert_eq!(persisted.name, "Q1 2026 Review (revised)");
}

#[test]
fn test_active_cycle_cannot_be_edited_or_deleted() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);

    let update = update_cycle(
        &mut store,
        &UpdateCycleRequest {
            cycle_id,
            name: Some(String::from("Renamed")),
            review_type: None,
            review_period: None,
            self_assessment: None,
            peer_review: None,
            manager_review: None,
        },
        &hr_admin(),
        test_cause(),
    );
    assert!(matches!(update, Err(ApiError::InvalidCycleState { .. })));

    let delete = delete_cycle(
        &mut store,
        &DeleteCycleRequest { cycle_id },
        &hr_admin(),
        test_cause(),
    );
    assert!(matches!(delete, Err(ApiError::InvalidCycleState { .. })));
}

#[test]
fn test_empty_draft_cycle_can_be_deleted() {
    let mut store = seeded_store();
    let created = match create_cycle(&mut store, create_cycle_request(), &hr_admin(), test_cause())
    {
        Ok(r) => r,
        Err(e) => panic!("Cycle creation failed: {e}"),
    };
    let cycle_id = created.response.cycle_id;

    match delete_cycle(
        &mut store,
        &DeleteCycleRequest { cycle_id },
        &hr_admin(),
        test_cause(),
    ) {
        Ok(r) => assert_eq!(r.audit_event.action.name, "DeleteCycle"),
        Err(e) => panic!("Delete failed: {e}"),
    }

    assert!(store.get_cycle(cycle_id).is_err());
}

#[test]
fn test_assignments_update_participant_count() {
    let mut store = seeded_store();
    let cycle_id = bootstrap_active_cycle(&mut store);
    seed_standard_assignments(&mut store, cycle_id);

    let persisted = match store.get_cycle(cycle_id) {
        Ok(c) => c,
        Err(e) => panic!("Cycle not persisted: {e}"),
    };
    // Users 2, 7, and 8 appear across the seeded assignments
    assert_eq!(persisted.participant_count, 3);
}
