// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cycle;
mod error;
mod instance;
mod onboarding;
mod progress;
mod schedule;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use cycle::ReviewCycle;
pub use error::DomainError;
pub use instance::{
    InstanceStatus, ManagerReviewForm, PeerReviewForm, ReviewAssignment, ReviewForm,
    ReviewInstance, ReviewKind, SelfAssessmentForm,
};
pub use onboarding::{OnboardingGate, evaluate_gate};
pub use progress::{
    CycleDashboardEntry, CycleProgress, PendingTasks, PhaseProgress, UserReviewDashboard,
    cycle_progress, dashboard_summary, instance_overdue, phase_for_kind,
};
pub use schedule::{CycleSchedule, Window};
pub use status::{
    PolicyRule, Status, TransitionPolicy, auto_status, sort_by_status_priority,
};
pub use types::{CyclePhase, CycleStatus, OrgProfile, Rating, ReviewType, UserRole};
pub use validation::{validate_assignment, validate_cycle_name};
