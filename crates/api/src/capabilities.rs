// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions a user is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capability, CycleCapabilities, GlobalCapabilities};
use tempo_domain::{CyclePhase, CycleStatus, OnboardingGate, ReviewCycle, UserRole};
use time::OffsetDateTime;

/// Computes global capabilities for an authenticated user.
///
/// Global capabilities depend on:
/// - The user's role
/// - The onboarding gate (a blocking gate denies everything except the
///   assignment flow itself)
///
/// # Arguments
///
/// * `actor` - The authenticated actor
/// * `gate` - The actor's current onboarding gate
///
/// # Returns
///
/// A `GlobalCapabilities` struct with all capability flags set.
#[must_use]
pub const fn compute_global_capabilities(
    actor: &AuthenticatedActor,
    gate: OnboardingGate,
) -> GlobalCapabilities {
    // A blocked gate locks the application down to the assignment flow
    if gate.is_blocking() {
        return GlobalCapabilities {
            can_create_cycle: Capability::Denied,
            can_operate_cycles: Capability::Denied,
            can_write_reviews: Capability::Denied,
            can_view_dashboard: Capability::Denied,
            can_complete_onboarding: Capability::Allowed,
        };
    }

    match actor.role {
        UserRole::HrAdmin => GlobalCapabilities {
            can_create_cycle: Capability::Allowed,
            can_operate_cycles: Capability::Allowed,
            can_write_reviews: Capability::Allowed,
            can_view_dashboard: Capability::Allowed,
            can_complete_onboarding: Capability::Allowed,
        },
        UserRole::Manager | UserRole::IndividualContributor => GlobalCapabilities {
            can_create_cycle: Capability::Denied,
            can_operate_cycles: Capability::Denied,
            can_write_reviews: Capability::Allowed,
            can_view_dashboard: Capability::Allowed,
            can_complete_onboarding: Capability::Allowed,
        },
    }
}

/// Computes phase-aware capabilities for one cycle.
///
/// Review forms only open while the cycle is active and their phase window
/// is current; overlapping windows resolve to the earliest phase, so later
/// forms stay closed until their window arrives.
///
/// # Arguments
///
/// * `cycle` - The cycle being evaluated
/// * `now` - The evaluation instant
#[must_use]
pub fn compute_cycle_capabilities(
    cycle: &ReviewCycle,
    now: OffsetDateTime,
) -> CycleCapabilities {
    if cycle.status != CycleStatus::Active {
        return CycleCapabilities {
            can_edit_self_assessment: Capability::Denied,
            can_edit_peer_reviews: Capability::Denied,
            can_edit_manager_reviews: Capability::Denied,
        };
    }

    let phase = cycle.current_phase(now);
    CycleCapabilities {
        can_edit_self_assessment: allowed_during(phase, CyclePhase::SelfAssessment),
        can_edit_peer_reviews: allowed_during(phase, CyclePhase::PeerReview),
        can_edit_manager_reviews: allowed_during(phase, CyclePhase::ManagerReview),
    }
}

fn allowed_during(current: CyclePhase, wanted: CyclePhase) -> Capability {
    if current == wanted {
        Capability::Allowed
    } else {
        Capability::Denied
    }
}
