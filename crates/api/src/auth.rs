// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use tempo_audit::Actor;
use tempo_domain::{ReviewAssignment, UserRole};

use crate::error::AuthError;

/// An authenticated actor with an associated role.
///
/// This represents a signed-in user who has been authenticated by the
/// external auth/session provider and may perform actions based on their
/// role and review authorship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The session identifier for this actor (opaque to this layer).
    pub id: String,
    /// The actor's canonical user identifier in the org chart.
    pub user_id: i64,
    /// The role assigned to this actor.
    pub role: UserRole,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The session identifier for this actor
    /// * `user_id` - The actor's canonical user identifier
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, user_id: i64, role: UserRole) -> Self {
        Self { id, user_id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the authenticated user.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role, and for review
/// content, their authorship.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to create a review cycle.
    ///
    /// Only HR admins may create cycles.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the `hr_admin` role.
    pub fn authorize_create_cycle(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_hr_admin(actor, "create_cycle")
    }

    /// Checks if an actor is authorized to activate a review cycle.
    ///
    /// Only HR admins may activate cycles.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the `hr_admin` role.
    pub fn authorize_activate_cycle(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_hr_admin(actor, "activate_cycle")
    }

    /// Checks if an actor is authorized to complete a review cycle.
    ///
    /// Only HR admins may complete cycles manually.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the `hr_admin` role.
    pub fn authorize_complete_cycle(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_hr_admin(actor, "complete_cycle")
    }

    /// Checks if an actor is authorized to cancel a review cycle.
    ///
    /// Only HR admins may cancel cycles.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the `hr_admin` role.
    pub fn authorize_cancel_cycle(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_hr_admin(actor, "cancel_cycle")
    }

    /// Checks if an actor is authorized to seed review assignments.
    ///
    /// Only HR admins may create assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the `hr_admin` role.
    pub fn authorize_create_assignments(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_hr_admin(actor, "create_assignments")
    }

    /// Checks if an actor may edit a review instance.
    ///
    /// Reviews are edited only by their author: the subject for
    /// self-assessments, the reviewer for peer reviews, the manager for
    /// manager reviews.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `assignment` - The assignment being edited
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not the assignment's author.
    pub fn authorize_edit_review(
        actor: &AuthenticatedActor,
        assignment: &ReviewAssignment,
    ) -> Result<(), AuthError> {
        if assignment.author_id() == actor.user_id {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("edit_review"),
                required_role: String::from("review author"),
            })
        }
    }

    /// Checks if an actor may assign a manager to a user.
    ///
    /// Users assign their own manager during onboarding; HR admins may do
    /// it on anyone's behalf.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `target_user_id` - The user receiving the manager
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither the target user nor an
    /// HR admin.
    pub fn authorize_assign_manager(
        actor: &AuthenticatedActor,
        target_user_id: i64,
    ) -> Result<(), AuthError> {
        if actor.user_id == target_user_id || actor.role == UserRole::HrAdmin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("assign_manager"),
                required_role: String::from("self or hr_admin"),
            })
        }
    }

    /// Checks if an actor may assign team members to a manager.
    ///
    /// Managers assign their own team; HR admins may do it on anyone's
    /// behalf.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `target_manager_id` - The manager receiving the team
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither the target manager nor an
    /// HR admin.
    pub fn authorize_assign_team(
        actor: &AuthenticatedActor,
        target_manager_id: i64,
    ) -> Result<(), AuthError> {
        let is_own_team = actor.user_id == target_manager_id && actor.role == UserRole::Manager;
        if is_own_team || actor.role == UserRole::HrAdmin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("assign_team_members"),
                required_role: String::from("manager (own team) or hr_admin"),
            })
        }
    }

    fn require_hr_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.role == UserRole::HrAdmin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("hr_admin"),
            })
        }
    }
}
