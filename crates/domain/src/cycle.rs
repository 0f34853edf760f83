// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Review cycle records and their lifecycle operations.
//!
//! A cycle is created in `draft` by an HR admin, activated once its
//! schedule passes validation, and ends in `completed` or `cancelled`.
//! Lifecycle operations are pure: they return a new record and never
//! mutate the input.

use crate::error::DomainError;
use crate::schedule::CycleSchedule;
use crate::types::{CyclePhase, CycleStatus, ReviewType};
use crate::validation::validate_cycle_name;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A performance review cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCycle {
    /// Canonical identifier assigned by the persistence layer.
    /// `None` indicates the cycle has not been persisted yet.
    pub cycle_id: Option<i64>,
    /// Display name (e.g., "Q2 2026 Review").
    pub name: String,
    /// The cycle's cadence classification.
    pub review_type: ReviewType,
    /// The cycle's lifecycle status.
    pub status: CycleStatus,
    /// The cycle's schedule windows.
    pub schedule: CycleSchedule,
    /// Number of participants enrolled in this cycle.
    pub participant_count: u32,
    /// The user who created the cycle.
    pub created_by: i64,
}

impl ReviewCycle {
    /// Creates a new `ReviewCycle` in `draft` status without a persisted ID.
    ///
    /// The schedule is accepted as-is; chronological validation happens at
    /// activation so a draft can be edited freely.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name for the cycle
    /// * `review_type` - The cycle's cadence classification
    /// * `schedule` - The cycle's schedule windows
    /// * `created_by` - The creating user
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCycleName` if the name is empty or too long.
    pub fn new(
        name: &str,
        review_type: ReviewType,
        schedule: CycleSchedule,
        created_by: i64,
    ) -> Result<Self, DomainError> {
        validate_cycle_name(name)?;
        Ok(Self {
            cycle_id: None,
            name: name.trim().to_string(),
            review_type,
            status: CycleStatus::Draft,
            schedule,
            participant_count: 0,
            created_by,
        })
    }

    /// Creates a `ReviewCycle` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `cycle_id` - The canonical identifier
    /// * `name` - Display name for the cycle
    /// * `review_type` - The cycle's cadence classification
    /// * `status` - The cycle's lifecycle status
    /// * `schedule` - The cycle's schedule windows
    /// * `participant_count` - Number of enrolled participants
    /// * `created_by` - The creating user
    #[must_use]
    pub const fn with_id(
        cycle_id: i64,
        name: String,
        review_type: ReviewType,
        status: CycleStatus,
        schedule: CycleSchedule,
        participant_count: u32,
        created_by: i64,
    ) -> Self {
        Self {
            cycle_id: Some(cycle_id),
            name,
            review_type,
            status,
            schedule,
            participant_count,
            created_by,
        }
    }

    /// Derives the phase this cycle is in at `now`.
    #[must_use]
    pub fn current_phase(&self, now: OffsetDateTime) -> CyclePhase {
        self.schedule.current_phase(now)
    }

    /// Activates a draft cycle.
    ///
    /// Activation is the point where the schedule invariants become binding:
    /// a cycle with a malformed schedule cannot go live.
    ///
    /// # Errors
    ///
    /// Returns an error if the cycle is not in `draft` or the schedule
    /// fails validation.
    pub fn activate(&self) -> Result<Self, DomainError> {
        self.status.validate_transition(CycleStatus::Active)?;
        self.schedule.validate()?;

        let mut activated = self.clone();
        activated.status = CycleStatus::Active;
        Ok(activated)
    }

    /// Completes an active cycle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCycleState` if the cycle is not active.
    pub fn complete(&self) -> Result<Self, DomainError> {
        self.status.validate_transition(CycleStatus::Completed)?;

        let mut completed = self.clone();
        completed.status = CycleStatus::Completed;
        Ok(completed)
    }

    /// Cancels a draft or active cycle.
    ///
    /// Instances belonging to a cancelled cycle are left in place, readable
    /// but frozen.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCycleState` if the cycle is already
    /// completed or cancelled.
    pub fn cancel(&self) -> Result<Self, DomainError> {
        self.status.validate_transition(CycleStatus::Cancelled)?;

        let mut cancelled = self.clone();
        cancelled.status = CycleStatus::Cancelled;
        Ok(cancelled)
    }

    /// Returns true if the manager-review window has closed on an active
    /// cycle, i.e. the cycle is eligible for automatic completion.
    ///
    /// A suggestion in the same sense as `auto_status`: the caller decides
    /// whether to apply it.
    #[must_use]
    pub fn ready_for_completion(&self, now: OffsetDateTime) -> bool {
        self.status == CycleStatus::Active && self.schedule.manager_review.is_overdue(now)
    }
}
