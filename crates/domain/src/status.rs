// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Universal entity status vocabulary and transition legality.
//!
//! Every stateful entity in the system (tasks, goals, reviews) shares this
//! status set and its legal-transition matrix. `completed` is terminal:
//! nothing in the matrix leads out of it. `cancelled` is terminal-like but
//! allows explicit reactivation back to `not_started` or `draft`.
//!
//! Status changes are caller-initiated; `auto_status` only suggests a
//! time-driven change, it never applies one.

use crate::error::DomainError;
use crate::types::UserRole;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Universal status vocabulary shared by every stateful entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Entity exists but work has not begun.
    NotStarted,
    /// Entity is being drafted and is not yet live.
    Draft,
    /// Work is underway.
    InProgress,
    /// Entity is live and within its scheduled window.
    Active,
    /// Work finished. Terminal.
    Completed,
    /// Work cannot proceed until something external is resolved.
    Blocked,
    /// The entity's due date has passed without completion.
    Overdue,
    /// Entity was abandoned. Reactivation is the only way out.
    Cancelled,
}

impl Status {
    /// Every status, in declaration order. Used by exhaustive matrix checks.
    pub const ALL: [Self; 8] = [
        Self::NotStarted,
        Self::Draft,
        Self::InProgress,
        Self::Active,
        Self::Completed,
        Self::Blocked,
        Self::Overdue,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the human-facing display label for the status.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Draft => "Draft",
            Self::InProgress => "In Progress",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
            Self::Overdue => "Overdue",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns the numeric sort priority for this status.
    ///
    /// Lower sorts first: attention-demanding statuses (overdue, blocked)
    /// surface at the top of dashboard lists.
    #[must_use]
    pub const fn sort_priority(&self) -> u8 {
        match self {
            Self::Overdue => 1,
            Self::Blocked => 2,
            Self::InProgress => 3,
            Self::Active => 4,
            Self::NotStarted => 5,
            Self::Draft => 6,
            Self::Completed => 7,
            Self::Cancelled => 8,
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "draft" => Ok(Self::Draft),
            "in_progress" => Ok(Self::InProgress),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "blocked" => Ok(Self::Blocked),
            "overdue" => Ok(Self::Overdue),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }

    /// Returns the set of statuses this status may legally transition to.
    #[must_use]
    pub const fn transitions(&self) -> &'static [Self] {
        match self {
            Self::NotStarted => &[Self::Draft, Self::InProgress, Self::Active, Self::Cancelled],
            Self::Draft => &[
                Self::NotStarted,
                Self::InProgress,
                Self::Active,
                Self::Cancelled,
            ],
            Self::InProgress => &[
                Self::Active,
                Self::Completed,
                Self::Blocked,
                Self::Cancelled,
            ],
            Self::Active => &[
                Self::InProgress,
                Self::Completed,
                Self::Blocked,
                Self::Overdue,
                Self::Cancelled,
            ],
            Self::Completed => &[],
            Self::Blocked => &[Self::InProgress, Self::Active, Self::Cancelled],
            Self::Overdue => &[
                Self::InProgress,
                Self::Active,
                Self::Completed,
                Self::Blocked,
                Self::Cancelled,
            ],
            Self::Cancelled => &[Self::NotStarted, Self::Draft],
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    ///
    /// Only `completed` is terminal in the matrix sense; `cancelled` keeps
    /// its explicit reactivation transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Checks whether a transition from this status to `target` is legal.
    ///
    /// A transition is legal iff `target` appears in this status's
    /// transition set and the two statuses differ.
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        *self != target && self.transitions().contains(&target)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// The terminal lock on `completed` is applied before the matrix so the
    /// error names the real cause.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        // completed is write-locked regardless of anything else
        if self.is_terminal() {
            return Err(DomainError::TerminalStatusLocked {
                status: self.as_str().to_string(),
            });
        }

        if self.can_transition_to(new_status) {
            Ok(())
        } else {
            let reason = if *self == new_status {
                "status is unchanged"
            } else {
                "transition not permitted by the status lifecycle rules"
            };
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: reason.to_string(),
            })
        }
    }

    /// Validates a transition for a specific actor role against a policy table.
    ///
    /// The matrix check runs first; the policy table only further restricts
    /// transitions it has rules for. With the default (empty) policy this is
    /// equivalent to [`Self::validate_transition`].
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is illegal or denied by policy.
    pub fn validate_transition_for_role(
        &self,
        new_status: Self,
        role: UserRole,
        policy: &TransitionPolicy,
    ) -> Result<(), DomainError> {
        self.validate_transition(new_status)?;
        policy.check(*self, new_status, role)
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single role restriction on one edge of the transition matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRule {
    /// The transition's source status.
    pub from: Status,
    /// The transition's target status.
    pub to: Status,
    /// Roles permitted to perform this transition.
    pub allowed_roles: Vec<UserRole>,
}

/// Configurable role restrictions layered over the transition matrix.
///
/// The matrix defines what is structurally legal; the policy table defines
/// who may do it. Transitions without a rule are open to every role, so the
/// default (empty) policy enforces nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionPolicy {
    rules: Vec<PolicyRule>,
}

impl TransitionPolicy {
    /// Creates an empty policy that permits every legal transition.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates a policy from an explicit rule table.
    #[must_use]
    pub fn with_rules(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Checks whether `role` may perform the `from` → `to` transition.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TransitionDeniedByPolicy` if a rule exists for
    /// this edge and does not list `role`.
    pub fn check(&self, from: Status, to: Status, role: UserRole) -> Result<(), DomainError> {
        let denied = self
            .rules
            .iter()
            .filter(|rule| rule.from == from && rule.to == to)
            .any(|rule| !rule.allowed_roles.contains(&role));

        if denied {
            Err(DomainError::TransitionDeniedByPolicy {
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
                role: role.as_str().to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Suggests a time-driven status change for an entity, if one applies.
///
/// Pure and idempotent: callers decide whether to apply the suggestion.
/// Only transitions the matrix permits are ever suggested.
///
/// # Arguments
///
/// * `current` - The entity's current status
/// * `start_date` - When the entity is scheduled to become active, if set
/// * `due_date` - When the entity is due, if set
/// * `now` - The current instant (injected for testability)
///
/// # Returns
///
/// * `Some(Status::Overdue)` if the due date has passed and the entity is active
/// * `Some(Status::Active)` if the start date has arrived and the entity has not started
/// * `None` if no change is suggested
#[must_use]
pub fn auto_status(
    current: Status,
    start_date: Option<OffsetDateTime>,
    due_date: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Option<Status> {
    if let Some(due) = due_date
        && now > due
        && current.can_transition_to(Status::Overdue)
    {
        return Some(Status::Overdue);
    }

    if let Some(start) = start_date
        && now >= start
        && current == Status::NotStarted
    {
        return Some(Status::Active);
    }

    None
}

/// Sorts items in place by their status's sort priority.
///
/// The sort is stable: items with equal priority keep their caller-supplied
/// order, so no ordering beyond the priority is imposed.
pub fn sort_by_status_priority<T, F>(items: &mut [T], status_of: F)
where
    F: Fn(&T) -> Status,
{
    items.sort_by_key(|item| status_of(item).sort_priority());
}
