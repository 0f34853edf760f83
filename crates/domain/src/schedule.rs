// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cycle schedule windows and wall-clock phase derivation.
//!
//! ## Invariants
//!
//! - Windows are half-open `[start, end)` UTC instants
//! - The current phase is derived, never stored
//! - Phase-window starts are expected non-decreasing (self-assessment ≤
//!   peer review ≤ manager review); this is checked at cycle activation,
//!   not silently repaired here
//! - Gaps between windows fall through to the nearest subsequent phase;
//!   overlapping windows resolve to the earliest phase that contains `now`

use crate::error::DomainError;
use crate::types::CyclePhase;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A half-open time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Window start instant (inclusive).
    pub start: OffsetDateTime,
    /// Window end instant (exclusive).
    pub end: OffsetDateTime,
}

impl Window {
    /// Creates a new `Window`.
    ///
    /// # Arguments
    ///
    /// * `start` - Window start instant (inclusive)
    /// * `end` - Window end instant (exclusive)
    #[must_use]
    pub const fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self { start, end }
    }

    /// Returns true if `now` falls within this window.
    #[must_use]
    pub fn contains(&self, now: OffsetDateTime) -> bool {
        self.start <= now && now < self.end
    }

    /// Returns true if this window has closed.
    #[must_use]
    pub fn is_overdue(&self, now: OffsetDateTime) -> bool {
        now > self.end
    }

    /// Validates that the window is chronologically sane.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedSchedule` if the start is after the end.
    pub fn validate(&self, name: &str) -> Result<(), DomainError> {
        if self.start > self.end {
            return Err(DomainError::MalformedSchedule {
                reason: format!("{name} window starts after it ends"),
            });
        }
        Ok(())
    }
}

/// The ordered time windows of a review cycle.
///
/// The review period describes the span of work being reviewed; the three
/// phase windows schedule the assessment work itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSchedule {
    /// The period of work under review.
    pub review_period: Window,
    /// When participants write their self-assessments.
    pub self_assessment: Window,
    /// When peers review each other.
    pub peer_review: Window,
    /// When managers review their reports.
    pub manager_review: Window,
}

impl CycleSchedule {
    /// Creates a new `CycleSchedule`.
    ///
    /// # Arguments
    ///
    /// * `review_period` - The period of work under review
    /// * `self_assessment` - The self-assessment window
    /// * `peer_review` - The peer-review window
    /// * `manager_review` - The manager-review window
    #[must_use]
    pub const fn new(
        review_period: Window,
        self_assessment: Window,
        peer_review: Window,
        manager_review: Window,
    ) -> Self {
        Self {
            review_period,
            self_assessment,
            peer_review,
            manager_review,
        }
    }

    /// Validates the schedule's chronological sanity.
    ///
    /// Each window must start no later than it ends, and the three phase
    /// windows must start in non-decreasing order. Windows may overlap.
    /// Called at cycle activation; a draft cycle may hold a malformed
    /// schedule while it is being edited.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedSchedule` naming the violated constraint.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.review_period.validate("review period")?;
        self.self_assessment.validate("self-assessment")?;
        self.peer_review.validate("peer review")?;
        self.manager_review.validate("manager review")?;

        if self.peer_review.start < self.self_assessment.start {
            return Err(DomainError::MalformedSchedule {
                reason: String::from(
                    "peer-review window starts before the self-assessment window",
                ),
            });
        }
        if self.manager_review.start < self.peer_review.start {
            return Err(DomainError::MalformedSchedule {
                reason: String::from(
                    "manager-review window starts before the peer-review window",
                ),
            });
        }

        Ok(())
    }

    /// Derives the cycle phase for a given instant.
    ///
    /// Piecewise over the phase windows: before the self-assessment window
    /// the cycle has not started; after the manager-review window it is
    /// completed; a gap between windows belongs to the next labeled phase.
    /// The derivation is a pure function of `now` and the windows.
    #[must_use]
    pub fn current_phase(&self, now: OffsetDateTime) -> CyclePhase {
        if now < self.self_assessment.start {
            CyclePhase::NotStarted
        } else if self.self_assessment.contains(now) {
            CyclePhase::SelfAssessment
        } else if now < self.peer_review.end {
            CyclePhase::PeerReview
        } else if now < self.manager_review.end {
            CyclePhase::ManagerReview
        } else {
            CyclePhase::Completed
        }
    }

    /// Returns the schedule window for a labeled phase, if it has one.
    #[must_use]
    pub const fn window_for_phase(&self, phase: CyclePhase) -> Option<Window> {
        match phase {
            CyclePhase::SelfAssessment => Some(self.self_assessment),
            CyclePhase::PeerReview => Some(self.peer_review),
            CyclePhase::ManagerReview => Some(self.manager_review),
            CyclePhase::NotStarted | CyclePhase::Completed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn schedule() -> CycleSchedule {
        CycleSchedule::new(
            Window::new(
                datetime!(2026-01-01 00:00 UTC),
                datetime!(2026-03-31 00:00 UTC),
            ),
            Window::new(
                datetime!(2026-04-01 00:00 UTC),
                datetime!(2026-04-08 00:00 UTC),
            ),
            Window::new(
                datetime!(2026-04-08 00:00 UTC),
                datetime!(2026-04-15 00:00 UTC),
            ),
            Window::new(
                datetime!(2026-04-15 00:00 UTC),
                datetime!(2026-04-22 00:00 UTC),
            ),
        )
    }

    #[test]
    fn test_window_is_half_open() {
        let window = Window::new(
            datetime!(2026-04-01 00:00 UTC),
            datetime!(2026-04-08 00:00 UTC),
        );

        assert!(window.contains(datetime!(2026-04-01 00:00 UTC)));
        assert!(window.contains(datetime!(2026-04-07 23:59 UTC)));
        assert!(!window.contains(datetime!(2026-04-08 00:00 UTC)));
        assert!(!window.contains(datetime!(2026-03-31 23:59 UTC)));
    }

    #[test]
    fn test_window_overdue() {
        let window = Window::new(
            datetime!(2026-03-01 00:00 UTC),
            datetime!(2026-03-01 00:00 UTC),
        );

        assert!(window.is_overdue(datetime!(2026-03-05 00:00 UTC)));
        assert!(!window.is_overdue(datetime!(2026-03-01 00:00 UTC)));
    }

    #[test]
    fn test_phase_progression() {
        let schedule = schedule();

        assert_eq!(
            schedule.current_phase(datetime!(2026-03-15 00:00 UTC)),
            CyclePhase::NotStarted
        );
        assert_eq!(
            schedule.current_phase(datetime!(2026-04-03 00:00 UTC)),
            CyclePhase::SelfAssessment
        );
        assert_eq!(
            schedule.current_phase(datetime!(2026-04-10 00:00 UTC)),
            CyclePhase::PeerReview
        );
        assert_eq!(
            schedule.current_phase(datetime!(2026-04-18 00:00 UTC)),
            CyclePhase::ManagerReview
        );
        assert_eq!(
            schedule.current_phase(datetime!(2026-05-01 00:00 UTC)),
            CyclePhase::Completed
        );
    }

    #[test]
    fn test_phase_boundaries_are_inclusive_start_exclusive_end() {
        let schedule = schedule();

        assert_eq!(
            schedule.current_phase(datetime!(2026-04-01 00:00 UTC)),
            CyclePhase::SelfAssessment
        );
        // The instant a window ends belongs to the next phase
        assert_eq!(
            schedule.current_phase(datetime!(2026-04-08 00:00 UTC)),
            CyclePhase::PeerReview
        );
        assert_eq!(
            schedule.current_phase(datetime!(2026-04-22 00:00 UTC)),
            CyclePhase::Completed
        );
    }

    #[test]
    fn test_gap_falls_through_to_next_phase() {
        // Peer review starts two days after self-assessment ends
        let schedule = CycleSchedule::new(
            Window::new(
                datetime!(2026-01-01 00:00 UTC),
                datetime!(2026-03-31 00:00 UTC),
            ),
            Window::new(
                datetime!(2026-04-01 00:00 UTC),
                datetime!(2026-04-08 00:00 UTC),
            ),
            Window::new(
                datetime!(2026-04-10 00:00 UTC),
                datetime!(2026-04-15 00:00 UTC),
            ),
            Window::new(
                datetime!(2026-04-15 00:00 UTC),
                datetime!(2026-04-22 00:00 UTC),
            ),
        );

        assert_eq!(
            schedule.current_phase(datetime!(2026-04-09 00:00 UTC)),
            CyclePhase::PeerReview
        );
    }

    #[test]
    fn test_phase_derivation_is_deterministic() {
        let schedule = schedule();
        let t = datetime!(2026-04-10 12:00 UTC);

        let first = schedule.current_phase(t);
        for _ in 0..10 {
            assert_eq!(schedule.current_phase(t), first);
        }
    }

    #[test]
    fn test_validate_accepts_sane_schedule() {
        assert!(schedule().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let mut schedule = schedule();
        schedule.peer_review = Window::new(
            datetime!(2026-04-15 00:00 UTC),
            datetime!(2026-04-08 00:00 UTC),
        );

        match schedule.validate() {
            Err(DomainError::MalformedSchedule { reason }) => {
                assert!(reason.contains("peer review"));
            }
            other => panic!("Expected MalformedSchedule, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_out_of_order_phase_starts() {
        let mut schedule = schedule();
        schedule.manager_review = Window::new(
            datetime!(2026-04-05 00:00 UTC),
            datetime!(2026-04-22 00:00 UTC),
        );

        match schedule.validate() {
            Err(DomainError::MalformedSchedule { reason }) => {
                assert!(reason.contains("manager-review"));
            }
            other => panic!("Expected MalformedSchedule, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_allows_overlapping_windows() {
        let mut schedule = schedule();
        // Peer review overlaps the tail of self-assessment
        schedule.peer_review = Window::new(
            datetime!(2026-04-05 00:00 UTC),
            datetime!(2026-04-15 00:00 UTC),
        );

        assert!(schedule.validate().is_ok());
        // Overlap resolves to the earliest containing phase
        assert_eq!(
            schedule.current_phase(datetime!(2026-04-06 00:00 UTC)),
            CyclePhase::SelfAssessment
        );
    }
}
