// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for core tests.

use crate::CycleState;
use tempo_audit::{Actor, Cause};
use tempo_domain::{
    CycleSchedule, CycleStatus, PeerReviewForm, Rating, ReviewCycle, ReviewForm, ReviewType,
    Window,
};
use time::OffsetDateTime;
use time::macros::datetime;

/// An instant inside the peer-review window of the test schedule.
pub fn during_peer_review() -> OffsetDateTime {
    datetime!(2026-04-10 12:00 UTC)
}

pub fn test_schedule() -> CycleSchedule {
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

pub fn draft_state(cycle_id: i64) -> CycleState {
    CycleState::new(ReviewCycle::with_id(
        cycle_id,
        String::from("Q1 2026 Review"),
        ReviewType::Quarterly,
        CycleStatus::Draft,
        test_schedule(),
        0,
        1,
    ))
}

pub fn active_state(cycle_id: i64) -> CycleState {
    let mut state = draft_state(cycle_id);
    state.cycle.status = CycleStatus::Active;
    state
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("hr_admin"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

pub fn rating(value: u8) -> Option<Rating> {
    match Rating::new(value) {
        Ok(r) => Some(r),
        Err(e) => panic!("Invalid test rating: {e}"),
    }
}

/// A patch that fully populates a peer-review form.
pub fn full_peer_patch() -> ReviewForm {
    ReviewForm::PeerReview(PeerReviewForm {
        collaboration_rating: rating(4),
        impact_rating: rating(5),
        collaboration_example: Some(String::from("Unblocked the data migration")),
        impact_example: Some(String::from("Halved page load times")),
        strengths_feedback: Some(String::from("Great written communication")),
        growth_feedback: Some(String::from("Could delegate more")),
    })
}
