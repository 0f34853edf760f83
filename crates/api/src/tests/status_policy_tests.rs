// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The generic status-transition operation and its role policy.

use super::helpers::{contributor, hr_admin};
use crate::error::ApiError;
use crate::handlers::transition_entity_status;
use crate::request_response::TransitionStatusRequest;
use tempo_domain::{PolicyRule, Status, TransitionPolicy, UserRole};

fn request(from: &str, to: &str) -> TransitionStatusRequest {
    TransitionStatusRequest {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[test]
fn test_legal_transition_is_permitted_for_any_role_by_default() {
    let policy = TransitionPolicy::new();

    let result = transition_entity_status(
        &request("in_progress", "completed"),
        &contributor(7),
        &policy,
    );

    match result {
        Ok(response) => {
            assert_eq!(response.from, "in_progress");
            assert_eq!(response.to, "completed");
        }
        Err(e) => panic!("Transition rejected: {e}"),
    }
}

#[test]
fn test_matrix_violations_are_validation_failures() {
    let policy = TransitionPolicy::new();

    let result = transition_entity_status(
        &request("completed", "in_progress"),
        &hr_admin(),
        &policy,
    );
    assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));

    let result = transition_entity_status(&request("draft", "draft"), &hr_admin(), &policy);
    assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));
}

#[test]
fn test_unknown_status_strings_rejected() {
    let policy = TransitionPolicy::new();

    let result =
        transition_entity_status(&request("paused", "active"), &hr_admin(), &policy);
    assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));
}

#[test]
fn test_policy_table_restricts_configured_edges_by_role() {
    let policy = TransitionPolicy::with_rules(vec![PolicyRule {
        from: Status::Active,
        to: Status::Cancelled,
        allowed_roles: vec![UserRole::HrAdmin],
    }]);

    assert!(
        transition_entity_status(&request("active", "cancelled"), &hr_admin(), &policy).is_ok()
    );

    let denied =
        transition_entity_status(&request("active", "cancelled"), &contributor(7), &policy);
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    // Unruled edges stay open
    assert!(
        transition_entity_status(&request("active", "completed"), &contributor(7), &policy)
            .is_ok()
    );
}
