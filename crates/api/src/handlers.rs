// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same shape: authorize,
//! translate the request into a core command, apply it, persist the
//! result through the store port, and return the response together with
//! the audit event the transition produced.

use tempo::{Command, CycleState, apply};
use tempo_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tempo_domain::{
    OnboardingGate, OrgProfile, ReviewAssignment, ReviewCycle, ReviewInstance, Status,
    TransitionPolicy, cycle_progress, dashboard_summary, evaluate_gate,
};
use time::OffsetDateTime;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::compute_global_capabilities;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::onboarding_policy::{GateError, GatePolicy};
use crate::request_response::{
    ActivateCycleRequest, ActivateCycleResponse, AssignManagerRequest, AssignManagerResponse,
    AssignTeamMembersRequest, AssignTeamMembersResponse, AssignmentRequest, CancelCycleRequest,
    CancelCycleResponse, CompleteCycleRequest, CompleteCycleResponse, CreateAssignmentsRequest,
    CreateAssignmentsResponse, CreateCycleRequest, CreateCycleResponse, CycleInfo,
    GetCycleProgressResponse, GetDashboardResponse, ListCyclesResponse, PhaseProgressInfo,
    SaveReviewRequest, SaveReviewResponse, SkipTeamAssignmentRequest, SkipTeamAssignmentResponse,
    SubmitReviewRequest, SubmitReviewResponse, TransitionStatusRequest, TransitionStatusResponse,
    WhoAmIResponse, WindowInfo,
};
use crate::request_response::{
    DeleteCycleRequest, DeleteCycleResponse, UpdateCycleRequest, UpdateCycleResponse,
};
use crate::store::{ReviewStore, StoreError};
use tempo::{SessionAction, SessionState, reduce};
use tempo_domain::{CycleSchedule, CycleStatus, PhaseProgress, ReviewType, Window};

/// The result of an API operation that includes both the response and the
/// audit event.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

/// The result of a session-affecting API operation.
///
/// Onboarding assignments mutate the org chart and move the session's
/// gate; the caller replaces its session state with the returned one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionApiResult<T> {
    /// The API response.
    pub response: T,
    /// The session state after the operation.
    pub session: SessionState,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

fn store_error(err: &StoreError) -> ApiError {
    match err {
        StoreError::NotFound { resource_type, id } => ApiError::ResourceNotFound {
            resource_type: resource_type.clone(),
            message: format!("{resource_type} {id} does not exist"),
        },
        StoreError::Conflict { message } => ApiError::Internal {
            message: message.clone(),
        },
    }
}

fn window(info: WindowInfo) -> Window {
    Window::new(info.start, info.end)
}

/// Loads the cycle-scoped state the reducer operates on.
fn load_state<S: ReviewStore>(store: &S, cycle_id: i64) -> Result<CycleState, ApiError> {
    let cycle = store.get_cycle(cycle_id).map_err(|e| store_error(&e))?;
    Ok(CycleState {
        cycle,
        instances: store.list_instances_for_cycle(cycle_id),
    })
}

/// Rejects callers whose onboarding gate is still blocking.
fn require_onboarded<S: ReviewStore>(
    store: &S,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    let profile = store
        .get_profile(actor.user_id)
        .map_err(|e| store_error(&e))?;
    let gate = evaluate_gate(&profile);
    if gate.is_blocking() {
        return Err(ApiError::OnboardingIncomplete {
            gate: gate.as_str().to_string(),
        });
    }
    Ok(())
}

/// Creates a new review cycle via the API boundary with authorization.
///
/// Creation precedes cycle-scoped state, so this handler builds its audit
/// event directly instead of going through the reducer.
///
/// # Arguments
///
/// * `store` - The persistence port
/// * `request` - The API request to create a cycle
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(ApiResult<CreateCycleResponse>)` on success
/// * `Err(ApiError)` if unauthorized or the request is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an HR admin
/// - The review type or name is invalid
pub fn create_cycle<S: ReviewStore>(
    store: &mut S,
    request: CreateCycleRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<CreateCycleResponse>, ApiError> {
    // Enforce authorization before executing command
    AuthorizationService::authorize_create_cycle(authenticated_actor)?;

    let review_type: ReviewType = request
        .review_type
        .parse()
        .map_err(translate_domain_error)?;
    let schedule = CycleSchedule::new(
        window(request.review_period),
        window(request.self_assessment),
        window(request.peer_review),
        window(request.manager_review),
    );

    let cycle = ReviewCycle::new(
        &request.name,
        review_type,
        schedule,
        authenticated_actor.user_id,
    )
    .map_err(translate_domain_error)?;

    let cycles_before = store.list_cycles().len();
    let cycle_id = store.insert_cycle(cycle).map_err(|e| store_error(&e))?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let before = StateSnapshot::new(
        serde_json::json!({ "cycles_count": cycles_before }).to_string(),
    );
    let after = StateSnapshot::new(
        serde_json::json!({ "cycles_count": cycles_before + 1 }).to_string(),
    );
    let action = Action::new(
        String::from("CreateCycle"),
        Some(format!("Created cycle '{}'", request.name)),
    );
    let audit_event = AuditEvent::new(actor, cause, action, before, after, Some(cycle_id));
    store.append_audit(audit_event.clone());

    tracing::info!(cycle_id, name = %request.name, "created review cycle");

    Ok(ApiResult {
        response: CreateCycleResponse {
            cycle_id,
            name: request.name.trim().to_string(),
            review_type: review_type.as_str().to_string(),
            status: String::from("draft"),
            message: format!("Successfully created cycle '{}'", request.name.trim()),
        },
        audit_event,
    })
}

/// Edits a draft cycle via the API boundary with authorization.
///
/// Schedule edits are accepted as-is; the chronological invariants become
/// binding at activation.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an HR admin
/// - The cycle does not exist or is no longer in draft
/// - The new name or review type is invalid
pub fn update_cycle<S: ReviewStore>(
    store: &mut S,
    request: &UpdateCycleRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<UpdateCycleResponse>, ApiError> {
    AuthorizationService::authorize_create_cycle(authenticated_actor)?;

    let mut cycle = store
        .get_cycle(request.cycle_id)
        .map_err(|e| store_error(&e))?;
    if cycle.status != CycleStatus::Draft {
        return Err(ApiError::InvalidCycleState {
            message: format!(
                "only draft cycles can be edited (cycle is '{}')",
                cycle.status
            ),
        });
    }
    let name_before = cycle.name.clone();

    if let Some(name) = &request.name {
        tempo_domain::validate_cycle_name(name).map_err(translate_domain_error)?;
        cycle.name = name.trim().to_string();
    }
    if let Some(review_type) = &request.review_type {
        cycle.review_type = review_type.parse().map_err(translate_domain_error)?;
    }
    if let Some(info) = request.review_period {
        cycle.schedule.review_period = window(info);
    }
    if let Some(info) = request.self_assessment {
        cycle.schedule.self_assessment = window(info);
    }
    if let Some(info) = request.peer_review {
        cycle.schedule.peer_review = window(info);
    }
    if let Some(info) = request.manager_review {
        cycle.schedule.manager_review = window(info);
    }

    store.update_cycle(&cycle).map_err(|e| store_error(&e))?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let before = StateSnapshot::new(
        serde_json::json!({ "cycle_id": request.cycle_id, "name": &name_before }).to_string(),
    );
    let after = StateSnapshot::new(
        serde_json::json!({ "cycle_id": request.cycle_id, "name": &cycle.name }).to_string(),
    );
    let action = Action::new(
        String::from("UpdateCycle"),
        Some(format!("Updated draft cycle '{}'", cycle.name)),
    );
    let audit_event = AuditEvent::new(actor, cause, action, before, after, Some(request.cycle_id));
    store.append_audit(audit_event.clone());

    tracing::info!(cycle_id = request.cycle_id, "updated draft cycle");

    Ok(ApiResult {
        response: UpdateCycleResponse {
            cycle_id: request.cycle_id,
            name: cycle.name,
            message: String::from("Cycle updated"),
        },
        audit_event,
    })
}

/// Deletes a draft cycle via the API boundary with authorization.
///
/// Only drafts can be deleted: instances are never deleted, so a cycle
/// that has been staffed or activated can only be cancelled.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an HR admin
/// - The cycle does not exist, is not in draft, or already has instances
pub fn delete_cycle<S: ReviewStore>(
    store: &mut S,
    request: &DeleteCycleRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<DeleteCycleResponse>, ApiError> {
    AuthorizationService::authorize_cancel_cycle(authenticated_actor)?;

    let cycle = store
        .get_cycle(request.cycle_id)
        .map_err(|e| store_error(&e))?;
    if cycle.status != CycleStatus::Draft {
        return Err(ApiError::InvalidCycleState {
            message: format!(
                "only draft cycles can be deleted (cycle is '{}')",
                cycle.status
            ),
        });
    }
    if !store.list_instances_for_cycle(request.cycle_id).is_empty() {
        return Err(ApiError::InvalidCycleState {
            message: String::from("cycles with review instances cannot be deleted"),
        });
    }

    store
        .delete_cycle(request.cycle_id)
        .map_err(|e| store_error(&e))?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let before = StateSnapshot::new(
        serde_json::json!({ "cycle_id": request.cycle_id, "name": &cycle.name }).to_string(),
    );
    let after = StateSnapshot::new(String::from("{}"));
    let action = Action::new(
        String::from("DeleteCycle"),
        Some(format!("Deleted draft cycle '{}'", cycle.name)),
    );
    let audit_event = AuditEvent::new(actor, cause, action, before, after, Some(request.cycle_id));
    store.append_audit(audit_event.clone());

    tracing::info!(cycle_id = request.cycle_id, "deleted draft cycle");

    Ok(ApiResult {
        response: DeleteCycleResponse {
            cycle_id: request.cycle_id,
            message: String::from("Cycle deleted"),
        },
        audit_event,
    })
}

/// Activates a draft cycle via the API boundary with authorization.
///
/// Activation makes the schedule invariants binding: a cycle with a
/// malformed schedule cannot go live.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an HR admin
/// - The cycle does not exist or is not in draft
/// - The schedule fails validation
pub fn activate_cycle<S: ReviewStore>(
    store: &mut S,
    request: &ActivateCycleRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ActivateCycleResponse>, ApiError> {
    AuthorizationService::authorize_activate_cycle(authenticated_actor)?;

    let state = load_state(store, request.cycle_id)?;
    let actor: Actor = authenticated_actor.to_audit_actor();

    let transition = apply(&state, Command::ActivateCycle, actor, cause, now)
        .map_err(translate_core_error)?;

    store
        .update_cycle(&transition.new_state.cycle)
        .map_err(|e| store_error(&e))?;
    store.append_audit(transition.audit_event.clone());

    tracing::info!(cycle_id = request.cycle_id, "activated review cycle");

    Ok(ApiResult {
        response: ActivateCycleResponse {
            cycle_id: request.cycle_id,
            status: transition.new_state.cycle.status.as_str().to_string(),
            message: format!(
                "Successfully activated cycle '{}'",
                transition.new_state.cycle.name
            ),
        },
        audit_event: transition.audit_event,
    })
}

/// Completes an active cycle via the API boundary with authorization.
///
/// # Errors
///
/// Returns an error if the actor is not an HR admin, or the cycle does not
/// exist or is not active.
pub fn complete_cycle<S: ReviewStore>(
    store: &mut S,
    request: &CompleteCycleRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<CompleteCycleResponse>, ApiError> {
    AuthorizationService::authorize_complete_cycle(authenticated_actor)?;

    let state = load_state(store, request.cycle_id)?;
    let actor: Actor = authenticated_actor.to_audit_actor();

    let transition = apply(&state, Command::CompleteCycle, actor, cause, now)
        .map_err(translate_core_error)?;

    store
        .update_cycle(&transition.new_state.cycle)
        .map_err(|e| store_error(&e))?;
    store.append_audit(transition.audit_event.clone());

    tracing::info!(cycle_id = request.cycle_id, "completed review cycle");

    Ok(ApiResult {
        response: CompleteCycleResponse {
            cycle_id: request.cycle_id,
            status: transition.new_state.cycle.status.as_str().to_string(),
            message: format!(
                "Successfully completed cycle '{}'",
                transition.new_state.cycle.name
            ),
        },
        audit_event: transition.audit_event,
    })
}

/// Cancels a draft or active cycle via the API boundary with authorization.
///
/// Instances of the cancelled cycle remain readable but frozen.
///
/// # Errors
///
/// Returns an error if the actor is not an HR admin, or the cycle does not
/// exist or is already finished.
pub fn cancel_cycle<S: ReviewStore>(
    store: &mut S,
    request: &CancelCycleRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<CancelCycleResponse>, ApiError> {
    AuthorizationService::authorize_cancel_cycle(authenticated_actor)?;

    let state = load_state(store, request.cycle_id)?;
    let actor: Actor = authenticated_actor.to_audit_actor();

    let transition = apply(&state, Command::CancelCycle, actor, cause, now)
        .map_err(translate_core_error)?;

    store
        .update_cycle(&transition.new_state.cycle)
        .map_err(|e| store_error(&e))?;
    store.append_audit(transition.audit_event.clone());

    tracing::info!(cycle_id = request.cycle_id, "cancelled review cycle");

    Ok(ApiResult {
        response: CancelCycleResponse {
            cycle_id: request.cycle_id,
            status: transition.new_state.cycle.status.as_str().to_string(),
            message: format!(
                "Successfully cancelled cycle '{}'",
                transition.new_state.cycle.name
            ),
        },
        audit_event: transition.audit_event,
    })
}

fn translate_assignment(request: &AssignmentRequest) -> Result<ReviewAssignment, ApiError> {
    match request.kind.as_str() {
        "self_assessment" => Ok(ReviewAssignment::SelfAssessment {
            subject_id: request.author_id,
        }),
        "peer_review" => Ok(ReviewAssignment::PeerReview {
            reviewer_id: request.author_id,
            reviewee_id: request.subject_id,
        }),
        "manager_review" => Ok(ReviewAssignment::ManagerReview {
            manager_id: request.author_id,
            employee_id: request.subject_id,
        }),
        other => Err(ApiError::ValidationFailed {
            field: String::from("kind"),
            message: format!("Unknown review kind: {other}"),
            missing_fields: Vec::new(),
        }),
    }
}

/// Seeds review instances for a cycle via the API boundary.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an HR admin
/// - The cycle does not exist or is already finished
/// - An assignment is invalid or duplicated
pub fn create_assignments<S: ReviewStore>(
    store: &mut S,
    request: &CreateAssignmentsRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<CreateAssignmentsResponse>, ApiError> {
    AuthorizationService::authorize_create_assignments(authenticated_actor)?;

    let assignments: Vec<ReviewAssignment> = request
        .assignments
        .iter()
        .map(translate_assignment)
        .collect::<Result<_, _>>()?;

    let state = load_state(store, request.cycle_id)?;
    let actor: Actor = authenticated_actor.to_audit_actor();

    let transition = apply(
        &state,
        Command::CreateAssignments {
            assignments: assignments.clone(),
        },
        actor,
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    // Persist the seeded instances; the store assigns their identifiers
    let existing = state.instances.len();
    let mut instance_ids = Vec::with_capacity(assignments.len());
    for instance in transition.new_state.instances.iter().skip(existing) {
        let id = store
            .insert_instance(instance.clone())
            .map_err(|e| store_error(&e))?;
        instance_ids.push(id);
    }

    let mut cycle = transition.new_state.cycle.clone();
    cycle.participant_count = participant_count(&store.list_instances_for_cycle(request.cycle_id));
    store.update_cycle(&cycle).map_err(|e| store_error(&e))?;
    store.append_audit(transition.audit_event.clone());

    tracing::info!(
        cycle_id = request.cycle_id,
        count = instance_ids.len(),
        "seeded review assignments"
    );

    Ok(ApiResult {
        response: CreateAssignmentsResponse {
            cycle_id: request.cycle_id,
            message: format!("Created {} review assignments", instance_ids.len()),
            instance_ids,
        },
        audit_event: transition.audit_event,
    })
}

/// Distinct users appearing in a cycle's assignments.
fn participant_count(instances: &[ReviewInstance]) -> u32 {
    let mut users: Vec<i64> = instances
        .iter()
        .flat_map(|i| [i.assignment.author_id(), i.assignment.subject_id()])
        .collect();
    users.sort_unstable();
    users.dedup();
    u32::try_from(users.len()).unwrap_or(u32::MAX)
}

/// Merges a partial update into a review via the API boundary.
///
/// # Errors
///
/// Returns an error if:
/// - The actor's onboarding gate is still blocking
/// - The actor is not the review's author
/// - The owning cycle is not active
/// - The instance is already submitted
pub fn save_review<S: ReviewStore>(
    store: &mut S,
    request: &SaveReviewRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<SaveReviewResponse>, ApiError> {
    require_onboarded(store, authenticated_actor)?;

    let instance = store
        .get_instance(request.instance_id)
        .map_err(|e| store_error(&e))?;
    AuthorizationService::authorize_edit_review(authenticated_actor, &instance.assignment)?;

    let state = load_state(store, instance.cycle_id)?;
    let actor: Actor = authenticated_actor.to_audit_actor();

    let transition = apply(
        &state,
        Command::SaveReview {
            instance_id: request.instance_id,
            patch: request.fields.clone(),
        },
        actor,
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let Some(updated) = transition.new_state.find_instance(request.instance_id) else {
        return Err(ApiError::Internal {
            message: format!("instance {} vanished during save", request.instance_id),
        });
    };
    store
        .update_instance(updated)
        .map_err(|e| store_error(&e))?;
    store.append_audit(transition.audit_event.clone());

    tracing::debug!(
        instance_id = request.instance_id,
        completion = updated.completion_percentage(),
        "saved review"
    );

    Ok(ApiResult {
        response: SaveReviewResponse {
            instance_id: request.instance_id,
            status: updated.status.as_str().to_string(),
            completion_percentage: updated.completion_percentage(),
            message: String::from("Review saved"),
        },
        audit_event: transition.audit_event,
    })
}

/// Finalizes a review via the API boundary.
///
/// Submission is final: the instance becomes immutable and `submitted_at`
/// is stamped exactly once. An incomplete submission is rejected with the
/// enumerated missing fields.
///
/// # Errors
///
/// Returns an error if:
/// - The actor's onboarding gate is still blocking
/// - The actor is not the review's author
/// - The owning cycle is not active
/// - Required fields are missing or the instance is already submitted
pub fn submit_review<S: ReviewStore>(
    store: &mut S,
    request: &SubmitReviewRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<SubmitReviewResponse>, ApiError> {
    require_onboarded(store, authenticated_actor)?;

    let instance = store
        .get_instance(request.instance_id)
        .map_err(|e| store_error(&e))?;
    AuthorizationService::authorize_edit_review(authenticated_actor, &instance.assignment)?;

    let state = load_state(store, instance.cycle_id)?;
    let actor: Actor = authenticated_actor.to_audit_actor();

    let transition = apply(
        &state,
        Command::SubmitReview {
            instance_id: request.instance_id,
        },
        actor,
        cause,
        now,
    )
    .map_err(|err| {
        tracing::warn!(instance_id = request.instance_id, error = %err, "submission rejected");
        translate_core_error(err)
    })?;

    let Some(submitted) = transition.new_state.find_instance(request.instance_id) else {
        return Err(ApiError::Internal {
            message: format!("instance {} vanished during submit", request.instance_id),
        });
    };
    store
        .update_instance(submitted)
        .map_err(|e| store_error(&e))?;
    store.append_audit(transition.audit_event.clone());

    tracing::info!(instance_id = request.instance_id, "submitted review");

    Ok(ApiResult {
        response: SubmitReviewResponse {
            instance_id: request.instance_id,
            status: submitted.status.as_str().to_string(),
            submitted_at: now,
            message: String::from("Review submitted"),
        },
        audit_event: transition.audit_event,
    })
}

fn gate_error(err: &GateError) -> ApiError {
    ApiError::ValidationFailed {
        field: String::from("onboarding"),
        message: err.to_string(),
        missing_fields: Vec::new(),
    }
}

/// Assigns a manager to a user, satisfying the manager gate.
///
/// A failed assignment leaves the session's gate untouched; there is no
/// partial-satisfaction state.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is neither the target user nor an HR admin
/// - The user or manager profile does not exist
/// - The user names themselves as manager
pub fn assign_manager<S: ReviewStore>(
    store: &mut S,
    session: &SessionState,
    request: &AssignManagerRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    policy: &GatePolicy,
) -> Result<SessionApiResult<AssignManagerResponse>, ApiError> {
    AuthorizationService::authorize_assign_manager(authenticated_actor, request.user_id)?;
    policy
        .validate_manager_assignment(request.user_id, request.manager_id)
        .map_err(|e| gate_error(&e))?;

    // Both ends of the edge must exist in the org chart
    let profile = store
        .get_profile(request.user_id)
        .map_err(|e| store_error(&e))?;
    store
        .get_profile(request.manager_id)
        .map_err(|e| store_error(&e))?;

    let manager_before = profile.manager_id;
    let updated = OrgProfile {
        manager_id: Some(request.manager_id),
        ..profile
    };
    store.upsert_profile(updated.clone());

    // The gate moves only for the session of the user who was assigned
    let session = if authenticated_actor.user_id == request.user_id {
        reduce(session, &SessionAction::ManagerAssigned(request.manager_id))
    } else {
        session.clone()
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let before = StateSnapshot::new(
        serde_json::json!({ "user_id": request.user_id, "manager_id": manager_before })
            .to_string(),
    );
    let after = StateSnapshot::new(
        serde_json::json!({ "user_id": request.user_id, "manager_id": request.manager_id })
            .to_string(),
    );
    let action = Action::new(
        String::from("AssignManager"),
        Some(format!(
            "Assigned manager {} to user {}",
            request.manager_id, request.user_id
        )),
    );
    let audit_event = AuditEvent::new(actor, cause, action, before, after, None);
    store.append_audit(audit_event.clone());

    tracing::info!(
        user_id = request.user_id,
        manager_id = request.manager_id,
        "assigned manager"
    );

    Ok(SessionApiResult {
        response: AssignManagerResponse {
            user_id: request.user_id,
            manager_id: request.manager_id,
            gate: evaluate_gate(&updated).as_str().to_string(),
            message: String::from("Manager assigned"),
        },
        session,
        audit_event,
    })
}

/// Assigns team members to a manager, satisfying the team gate.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is neither the target manager nor an HR admin
/// - The manager or any member profile does not exist
/// - The member list is empty or contains the manager
pub fn assign_team_members<S: ReviewStore>(
    store: &mut S,
    session: &SessionState,
    request: &AssignTeamMembersRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    policy: &GatePolicy,
) -> Result<SessionApiResult<AssignTeamMembersResponse>, ApiError> {
    AuthorizationService::authorize_assign_team(authenticated_actor, request.manager_id)?;
    policy
        .validate_team_assignment(request.manager_id, &request.member_ids)
        .map_err(|e| gate_error(&e))?;

    let profile = store
        .get_profile(request.manager_id)
        .map_err(|e| store_error(&e))?;

    // Every member becomes a report of this manager
    for member_id in &request.member_ids {
        let member = store.get_profile(*member_id).map_err(|e| store_error(&e))?;
        store.upsert_profile(OrgProfile {
            manager_id: Some(request.manager_id),
            ..member
        });
    }

    let team_count_before = profile.team_member_count;
    let team_member_count = u32::try_from(request.member_ids.len()).unwrap_or(u32::MAX);
    let updated = OrgProfile {
        team_member_count,
        ..profile
    };
    store.upsert_profile(updated.clone());

    let session = if authenticated_actor.user_id == request.manager_id {
        reduce(session, &SessionAction::TeamAssigned(request.member_ids.clone()))
    } else {
        session.clone()
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let before = StateSnapshot::new(
        serde_json::json!({
            "manager_id": request.manager_id,
            "team_member_count": team_count_before,
        })
        .to_string(),
    );
    let after = StateSnapshot::new(
        serde_json::json!({
            "manager_id": request.manager_id,
            "team_member_count": team_member_count,
        })
        .to_string(),
    );
    let action = Action::new(
        String::from("AssignTeamMembers"),
        Some(format!(
            "Assigned {} team members to manager {}",
            request.member_ids.len(),
            request.manager_id
        )),
    );
    let audit_event = AuditEvent::new(actor, cause, action, before, after, None);
    store.append_audit(audit_event.clone());

    tracing::info!(
        manager_id = request.manager_id,
        count = request.member_ids.len(),
        "assigned team members"
    );

    Ok(SessionApiResult {
        response: AssignTeamMembersResponse {
            manager_id: request.manager_id,
            team_member_count,
            gate: evaluate_gate(&updated).as_str().to_string(),
            message: String::from("Team members assigned"),
        },
        session,
        audit_event,
    })
}

/// Dismisses the advisory team gate without an assignment.
///
/// The manager gate is never skippable; only `needs_team` can be
/// dismissed, and only when the policy allows it.
///
/// # Errors
///
/// Returns an error if the blocking gate is not the team gate or skipping
/// is disabled.
pub fn skip_team_assignment<S: ReviewStore>(
    store: &mut S,
    session: &SessionState,
    request: &SkipTeamAssignmentRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    policy: &GatePolicy,
) -> Result<SessionApiResult<SkipTeamAssignmentResponse>, ApiError> {
    AuthorizationService::authorize_assign_team(authenticated_actor, request.manager_id)?;
    policy.validate_skip(session.gate).map_err(|e| gate_error(&e))?;

    let session = reduce(session, &SessionAction::TeamAssignmentSkipped);

    let actor: Actor = authenticated_actor.to_audit_actor();
    let before = StateSnapshot::new(String::from("gate=needs_team"));
    let after = StateSnapshot::new(format!("gate={}", session.gate));
    let action = Action::new(
        String::from("SkipTeamAssignment"),
        Some(format!(
            "Manager {} skipped team assignment",
            request.manager_id
        )),
    );
    let audit_event = AuditEvent::new(actor, cause, action, before, after, None);
    store.append_audit(audit_event.clone());

    tracing::info!(manager_id = request.manager_id, "skipped team assignment");

    Ok(SessionApiResult {
        response: SkipTeamAssignmentResponse {
            gate: session.gate.as_str().to_string(),
            message: String::from("Team assignment skipped"),
        },
        session,
        audit_event,
    })
}

/// Lists all cycles with their derived current phase.
///
/// This is a read-only operation that requires no authorization.
#[must_use]
pub fn list_cycles<S: ReviewStore>(store: &S, now: OffsetDateTime) -> ListCyclesResponse {
    let cycles = store
        .list_cycles()
        .into_iter()
        .filter_map(|cycle| {
            let cycle_id = cycle.cycle_id?;
            Some(CycleInfo {
                cycle_id,
                name: cycle.name.clone(),
                review_type: cycle.review_type.as_str().to_string(),
                status: cycle.status.as_str().to_string(),
                current_phase: cycle.current_phase(now).as_str().to_string(),
                participant_count: cycle.participant_count,
            })
        })
        .collect();

    ListCyclesResponse { cycles }
}

const fn phase_info(progress: PhaseProgress) -> PhaseProgressInfo {
    PhaseProgressInfo {
        completed: progress.completed,
        total: progress.total,
        percentage: progress.percentage(),
    }
}

/// Rolls up per-phase completion for a cycle.
///
/// This is a read-only operation that requires no authorization.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the cycle does not exist.
pub fn get_cycle_progress<S: ReviewStore>(
    store: &S,
    cycle_id: i64,
) -> Result<GetCycleProgressResponse, ApiError> {
    // Existence check; progress itself comes from the instances
    store.get_cycle(cycle_id).map_err(|e| store_error(&e))?;

    let progress = cycle_progress(&store.list_instances_for_cycle(cycle_id));

    Ok(GetCycleProgressResponse {
        cycle_id,
        self_assessment: phase_info(progress.self_assessment),
        peer_review: phase_info(progress.peer_review),
        manager_review: phase_info(progress.manager_review),
    })
}

/// Assembles a user's review dashboard.
///
/// Cycles are supplied to the aggregator most recently created first, so
/// the dashboard lists newest cycles at the top.
#[must_use]
pub fn get_dashboard<S: ReviewStore>(
    store: &S,
    user_id: i64,
    now: OffsetDateTime,
) -> GetDashboardResponse {
    let cycles = store.list_cycles();
    let instances = store.list_instances_for_user(user_id);

    GetDashboardResponse {
        dashboard: dashboard_summary(user_id, &cycles, &instances, now),
    }
}

/// Describes the signed-in user: role, gate, and capabilities.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the actor has no profile.
pub fn whoami<S: ReviewStore>(
    store: &S,
    authenticated_actor: &AuthenticatedActor,
) -> Result<WhoAmIResponse, ApiError> {
    let profile = store
        .get_profile(authenticated_actor.user_id)
        .map_err(|e| store_error(&e))?;
    let gate: OnboardingGate = evaluate_gate(&profile);

    Ok(WhoAmIResponse {
        user_id: profile.user_id,
        role: profile.role.as_str().to_string(),
        gate: gate.as_str().to_string(),
        capabilities: compute_global_capabilities(authenticated_actor, gate),
    })
}

/// Validates a generic entity status transition.
///
/// Tasks and goals share the universal status vocabulary; this operation
/// applies the legality matrix and the configured role policy. It is pure:
/// the caller persists the new status itself.
///
/// # Errors
///
/// Returns an error if either status string is unknown, the matrix forbids
/// the transition, or the policy denies it for the actor's role.
pub fn transition_entity_status(
    request: &TransitionStatusRequest,
    authenticated_actor: &AuthenticatedActor,
    policy: &TransitionPolicy,
) -> Result<TransitionStatusResponse, ApiError> {
    let from: Status = request.from.parse().map_err(translate_domain_error)?;
    let to: Status = request.to.parse().map_err(translate_domain_error)?;

    from.validate_transition_for_role(to, authenticated_actor.role, policy)
        .map_err(translate_domain_error)?;

    Ok(TransitionStatusResponse {
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
        message: format!("Transition {from} -> {to} is permitted"),
    })
}
