// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Progress aggregation over review instances.
//!
//! Progress is computed, not stored. It's a pure function of the cycle and
//! instance records supplied by the caller. Cycles are reported in the
//! order supplied; no ordering is imposed here beyond the status-priority
//! sort offered for generic status lists.

use crate::cycle::ReviewCycle;
use crate::instance::{InstanceStatus, ReviewInstance, ReviewKind};
use crate::schedule::CycleSchedule;
use crate::types::{CyclePhase, CycleStatus};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Completion counts for one phase of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PhaseProgress {
    /// Instances submitted.
    pub completed: usize,
    /// Instances expected.
    pub total: usize,
}

impl PhaseProgress {
    /// Returns the completion percentage for this phase, 0 when empty.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        // Safe cast: the quotient is at most 100
        (self.completed * 100 / self.total) as u8
    }
}

/// Per-phase completion rollup for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CycleProgress {
    /// Self-assessment completion counts.
    pub self_assessment: PhaseProgress,
    /// Peer-review completion counts.
    pub peer_review: PhaseProgress,
    /// Manager-review completion counts.
    pub manager_review: PhaseProgress,
}

/// Rolls up instance completion for one cycle, partitioned by variant.
#[must_use]
pub fn cycle_progress(instances: &[ReviewInstance]) -> CycleProgress {
    let mut progress = CycleProgress::default();

    for instance in instances {
        let phase = match instance.kind() {
            ReviewKind::SelfAssessment => &mut progress.self_assessment,
            ReviewKind::PeerReview => &mut progress.peer_review,
            ReviewKind::ManagerReview => &mut progress.manager_review,
        };
        phase.total += 1;
        if instance.status == InstanceStatus::Completed {
            phase.completed += 1;
        }
    }

    progress
}

/// The schedule phase a review variant is worked in.
#[must_use]
pub const fn phase_for_kind(kind: ReviewKind) -> CyclePhase {
    match kind {
        ReviewKind::SelfAssessment => CyclePhase::SelfAssessment,
        ReviewKind::PeerReview => CyclePhase::PeerReview,
        ReviewKind::ManagerReview => CyclePhase::ManagerReview,
    }
}

/// Returns true if an unfinished instance has outlived its phase window.
#[must_use]
pub fn instance_overdue(
    schedule: &CycleSchedule,
    instance: &ReviewInstance,
    now: OffsetDateTime,
) -> bool {
    if instance.status == InstanceStatus::Completed {
        return false;
    }
    schedule
        .window_for_phase(phase_for_kind(instance.kind()))
        .is_some_and(|window| window.is_overdue(now))
}

/// Outstanding review obligations for one user, totalled across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PendingTasks {
    /// Own self-assessments not yet submitted.
    pub self_assessments_to_write: usize,
    /// Peer reviews owed to others.
    pub peer_reviews_to_give: usize,
    /// Manager reviews owed to direct reports.
    pub manager_reviews_to_give: usize,
}

impl PendingTasks {
    /// Total outstanding obligations.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.self_assessments_to_write + self.peer_reviews_to_give + self.manager_reviews_to_give
    }
}

/// One user's view of one active cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDashboardEntry {
    /// The cycle's canonical identifier.
    pub cycle_id: i64,
    /// The cycle's display name.
    pub name: String,
    /// The phase the cycle is in at the evaluation instant.
    pub phase: CyclePhase,
    /// Status of the user's own self-assessment, if one was assigned.
    pub own_self_assessment: Option<InstanceStatus>,
    /// Peer reviews the user still owes in this cycle.
    pub peer_reviews_owed: usize,
    /// Manager reviews the user still owes in this cycle.
    pub manager_reviews_owed: usize,
    /// True if any of the user's unfinished obligations has outlived its
    /// phase window.
    pub has_overdue_obligations: bool,
}

/// A user's review obligations and history across cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReviewDashboard {
    /// The user this dashboard belongs to.
    pub user_id: i64,
    /// One entry per active cycle, in the order cycles were supplied.
    pub cycles: Vec<CycleDashboardEntry>,
    /// Outstanding obligations totalled across active cycles.
    pub pending_tasks: PendingTasks,
    /// Reviews the user has authored and submitted, across all cycles.
    pub completed_reviews: usize,
}

/// Builds a user's dashboard from caller-supplied cycle and instance records.
///
/// Active cycles each get an entry; pending counts accumulate over them.
/// `completed_reviews` counts the user's submitted authorship across every
/// supplied cycle regardless of cycle status.
#[must_use]
pub fn dashboard_summary(
    user_id: i64,
    cycles: &[ReviewCycle],
    instances: &[ReviewInstance],
    now: OffsetDateTime,
) -> UserReviewDashboard {
    let completed_reviews = instances
        .iter()
        .filter(|i| i.assignment.author_id() == user_id)
        .filter(|i| i.status == InstanceStatus::Completed)
        .count();

    let mut entries = Vec::new();
    let mut pending = PendingTasks::default();

    for cycle in cycles {
        if cycle.status != CycleStatus::Active {
            continue;
        }
        let Some(cycle_id) = cycle.cycle_id else {
            continue;
        };

        let in_cycle: Vec<&ReviewInstance> = instances
            .iter()
            .filter(|i| i.cycle_id == cycle_id)
            .collect();

        let own_self_assessment = in_cycle
            .iter()
            .find(|i| {
                i.kind() == ReviewKind::SelfAssessment && i.assignment.author_id() == user_id
            })
            .map(|i| i.status);

        let owed = |kind: ReviewKind| {
            in_cycle
                .iter()
                .filter(|i| i.kind() == kind)
                .filter(|i| i.assignment.author_id() == user_id)
                .filter(|i| i.status != InstanceStatus::Completed)
                .count()
        };
        let peer_reviews_owed = owed(ReviewKind::PeerReview);
        let manager_reviews_owed = owed(ReviewKind::ManagerReview);

        let has_overdue_obligations = in_cycle
            .iter()
            .filter(|i| i.assignment.author_id() == user_id)
            .any(|i| instance_overdue(&cycle.schedule, i, now));

        if own_self_assessment
            .is_some_and(|status| status != InstanceStatus::Completed)
        {
            pending.self_assessments_to_write += 1;
        }
        pending.peer_reviews_to_give += peer_reviews_owed;
        pending.manager_reviews_to_give += manager_reviews_owed;

        entries.push(CycleDashboardEntry {
            cycle_id,
            name: cycle.name.clone(),
            phase: cycle.current_phase(now),
            own_self_assessment,
            peer_reviews_owed,
            manager_reviews_owed,
            has_overdue_obligations,
        });
    }

    UserReviewDashboard {
        user_id,
        cycles: entries,
        pending_tasks: pending,
        completed_reviews,
    }
}
