// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the cadence of a review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewType {
    /// Four cycles per year.
    Quarterly,
    /// Two cycles per year.
    HalfYearly,
    /// One cycle per year.
    Annual,
}

impl ReviewType {
    /// Returns the string representation of this review type.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quarterly => "quarterly",
            Self::HalfYearly => "half_yearly",
            Self::Annual => "annual",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "quarterly" => Ok(Self::Quarterly),
            "half_yearly" => Ok(Self::HalfYearly),
            "annual" => Ok(Self::Annual),
            _ => Err(DomainError::InvalidReviewType(s.to_string())),
        }
    }
}

impl FromStr for ReviewType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ReviewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle state of a review cycle.
///
/// Explicit lifecycle states govern what operations are permitted:
/// review content may only change while a cycle is `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    /// Initial state after creation. Schedule editing allowed, no reviews yet.
    #[default]
    Draft,
    /// Cycle is live. Participants may save and submit reviews.
    Active,
    /// Cycle finished. System read-only for this cycle.
    Completed,
    /// Cycle abandoned. Instances remain readable but frozen.
    Cancelled,
}

impl CycleStatus {
    /// Returns the string representation of this cycle status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Active
    /// - Active → Completed
    /// - Draft → Cancelled
    /// - Active → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Active)
                | (Self::Active, Self::Completed)
                | (Self::Draft | Self::Active, Self::Cancelled)
        )
    }

    /// Returns true if this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCycleState` if the transition is not allowed.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            let reason = if self.is_terminal() {
                "cycle is in a terminal state"
            } else {
                "transition not permitted by the cycle lifecycle"
            };
            Err(DomainError::InvalidCycleState {
                current: self.as_str().to_string(),
                attempted: target.as_str().to_string(),
                reason: reason.to_string(),
            })
        }
    }
}

impl FromStr for CycleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The time-derived phase a review cycle is currently in.
///
/// The phase is never stored; it is derived by comparing wall-clock
/// time against the cycle's schedule windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// Before the self-assessment window opens.
    NotStarted,
    /// Participants write their own assessments.
    SelfAssessment,
    /// Peers review each other.
    PeerReview,
    /// Managers review their reports.
    ManagerReview,
    /// All review windows have closed.
    Completed,
}

impl CyclePhase {
    /// Returns the string representation of this phase.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::SelfAssessment => "self_assessment",
            Self::PeerReview => "peer_review",
            Self::ManagerReview => "manager_review",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a user's role within the organization.
///
/// Roles determine review obligations and which onboarding gate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A contributor with no direct reports. Must have a manager on file.
    IndividualContributor,
    /// A people manager. Expected to have a team on file.
    Manager,
    /// HR administration. Creates and operates review cycles.
    HrAdmin,
}

impl UserRole {
    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IndividualContributor => "individual_contributor",
            Self::Manager => "manager",
            Self::HrAdmin => "hr_admin",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "individual_contributor" => Ok(Self::IndividualContributor),
            "manager" => Ok(Self::Manager),
            "hr_admin" => Ok(Self::HrAdmin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rating on the 1-5 scale used by every review form.
///
/// Validated at construction; a `Rating` value is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// The rating value (1-5).
    value: u8,
}

impl Rating {
    /// Creates a new `Rating`.
    ///
    /// # Arguments
    ///
    /// * `value` - The rating value (must be between 1 and 5 inclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRating` if the value is not in the range 1-5.
    pub const fn new(value: u8) -> Result<Self, DomainError> {
        if value >= 1 && value <= 5 {
            Ok(Self { value })
        } else {
            Err(DomainError::InvalidRating { value })
        }
    }

    /// Returns the rating value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

/// The org-chart snapshot of an authenticated user.
///
/// This is the input to onboarding-gate evaluation and review-obligation
/// derivation. It is supplied by the auth/session provider and refetched
/// whenever the authenticated user record changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgProfile {
    /// Canonical user identifier.
    pub user_id: i64,
    /// The user's organizational role.
    pub role: UserRole,
    /// The user's manager, if one is on file.
    pub manager_id: Option<i64>,
    /// Number of direct reports on file for this user.
    pub team_member_count: u32,
}

impl OrgProfile {
    /// Creates a new `OrgProfile`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Canonical user identifier
    /// * `role` - The user's organizational role
    /// * `manager_id` - The user's manager, if any
    /// * `team_member_count` - Number of direct reports on file
    #[must_use]
    pub const fn new(
        user_id: i64,
        role: UserRole,
        manager_id: Option<i64>,
        team_member_count: u32,
    ) -> Self {
        Self {
            user_id,
            role,
            manager_id,
            team_member_count,
        }
    }
}
