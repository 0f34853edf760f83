// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CycleState, TransitionResult};
use tempo_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tempo_domain::{CycleStatus, DomainError, ReviewInstance};
use time::OffsetDateTime;

/// Applies a command to the current state, producing a new state and audit event.
///
/// The function is pure: the input state is never mutated, wall-clock time
/// is an explicit argument, and a failed command leaves no trace.
///
/// # Arguments
///
/// * `state` - The current cycle-scoped state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The current instant (injected for testability)
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - Review content is touched while the cycle is not active
#[allow(clippy::needless_pass_by_value, clippy::too_many_lines)]
pub fn apply(
    state: &CycleState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::ActivateCycle => {
            let new_cycle = state.cycle.activate()?;

            let before: StateSnapshot = state.to_snapshot();
            let new_state = CycleState {
                cycle: new_cycle,
                instances: state.instances.clone(),
            };
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("ActivateCycle"),
                Some(format!("Activated cycle '{}'", state.cycle.name)),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, state.cycle.cycle_id);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::CompleteCycle => {
            let new_cycle = state.cycle.complete()?;

            let before: StateSnapshot = state.to_snapshot();
            let new_state = CycleState {
                cycle: new_cycle,
                instances: state.instances.clone(),
            };
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("CompleteCycle"),
                Some(format!("Completed cycle '{}'", state.cycle.name)),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, state.cycle.cycle_id);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::CancelCycle => {
            let new_cycle = state.cycle.cancel()?;

            let before: StateSnapshot = state.to_snapshot();
            let new_state = CycleState {
                cycle: new_cycle,
                instances: state.instances.clone(),
            };
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("CancelCycle"),
                Some(format!("Cancelled cycle '{}'", state.cycle.name)),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, state.cycle.cycle_id);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::CreateAssignments { assignments } => {
            // Seeding happens while a cycle is being staffed (draft) or live
            if state.cycle.status.is_terminal() {
                return Err(CoreError::CycleInactive {
                    status: state.cycle.status.as_str().to_string(),
                });
            }
            let Some(cycle_id) = state.cycle.cycle_id else {
                return Err(CoreError::UnpersistedCycle);
            };

            let mut new_instances = state.instances.clone();
            for assignment in &assignments {
                if new_instances.iter().any(|i| i.assignment == *assignment) {
                    return Err(CoreError::DomainViolation(DomainError::InvalidAssignment {
                        reason: format!(
                            "duplicate {} assignment for author {}",
                            assignment.kind(),
                            assignment.author_id()
                        ),
                    }));
                }
                new_instances.push(ReviewInstance::new(cycle_id, *assignment)?);
            }

            let before: StateSnapshot = state.to_snapshot();
            let new_state = CycleState {
                cycle: state.cycle.clone(),
                instances: new_instances,
            };
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("CreateAssignments"),
                Some(format!(
                    "Created {} review assignments for cycle '{}'",
                    assignments.len(),
                    state.cycle.name
                )),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, state.cycle.cycle_id);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::SaveReview { instance_id, patch } => {
            require_active(state)?;
            let instance = state
                .find_instance(instance_id)
                .ok_or(DomainError::InstanceNotFound(instance_id))?;

            let updated = instance.save(&patch)?;
            let completion = updated.completion_percentage();

            let before: StateSnapshot = state.to_snapshot();
            let new_state = replace_instance(state, instance_id, updated);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("SaveReview"),
                Some(format!(
                    "Saved {} review {instance_id} ({completion}% complete)",
                    instance.kind()
                )),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, state.cycle.cycle_id);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::SubmitReview { instance_id } => {
            require_active(state)?;
            let instance = state
                .find_instance(instance_id)
                .ok_or(DomainError::InstanceNotFound(instance_id))?;

            let submitted = instance.submit(now)?;

            let before: StateSnapshot = state.to_snapshot();
            let new_state = replace_instance(state, instance_id, submitted);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("SubmitReview"),
                Some(format!(
                    "Submitted {} review {instance_id}",
                    instance.kind()
                )),
            );
            let audit_event: AuditEvent =
                AuditEvent::new(actor, cause, action, before, after, state.cycle.cycle_id);

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
    }
}

/// Suggests completing an active cycle whose manager-review window has closed.
///
/// A suggestion in the same sense as `tempo_domain::auto_status`: the caller
/// decides whether to apply the returned command. Pure and idempotent.
#[must_use]
pub fn auto_complete_cycle(state: &CycleState, now: OffsetDateTime) -> Option<Command> {
    state
        .cycle
        .ready_for_completion(now)
        .then_some(Command::CompleteCycle)
}

/// Review content only changes while the owning cycle is active.
fn require_active(state: &CycleState) -> Result<(), CoreError> {
    if state.cycle.status == CycleStatus::Active {
        Ok(())
    } else {
        Err(CoreError::CycleInactive {
            status: state.cycle.status.as_str().to_string(),
        })
    }
}

/// Returns a copy of the state with one instance replaced.
fn replace_instance(
    state: &CycleState,
    instance_id: i64,
    replacement: ReviewInstance,
) -> CycleState {
    let instances = state
        .instances
        .iter()
        .map(|i| {
            if i.instance_id == Some(instance_id) {
                replacement.clone()
            } else {
                i.clone()
            }
        })
        .collect();

    CycleState {
        cycle: state.cycle.clone(),
        instances,
    }
}
