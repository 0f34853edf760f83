// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-scoped reducer for the onboarding gate.
//!
//! The session's lifecycle is `SignedIn` on app start, `ProfileRefreshed`
//! on every auth change, `SignedOut` on teardown. The gate is recomputed
//! from the profile on every action that touches it, so gate state is
//! always consistent with the most recently observed user snapshot.
//!
//! There is no cross-session consistency: two concurrent sessions for the
//! same user converge only when each refetches the profile.

use tempo_domain::{OnboardingGate, OrgProfile, evaluate_gate};

/// The per-session state: the observed profile and the derived gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    /// The most recently observed profile, if signed in.
    pub profile: Option<OrgProfile>,
    /// The onboarding gate derived from that profile.
    pub gate: OnboardingGate,
}

impl SessionState {
    /// Creates a signed-out session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            profile: None,
            gate: OnboardingGate::Unchecked,
        }
    }
}

/// User or system intent against the session, as data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Authentication produced a user profile.
    SignedIn(OrgProfile),
    /// The authenticated user record changed and was refetched.
    ProfileRefreshed(OrgProfile),
    /// `assign_manager` succeeded with this manager.
    ManagerAssigned(i64),
    /// `assign_team_members` succeeded with these members.
    TeamAssigned(Vec<i64>),
    /// The user dismissed the advisory team gate.
    TeamAssignmentSkipped,
    /// An assignment call failed. The gate must not move.
    AssignmentFailed,
    /// Session teardown.
    SignedOut,
}

/// Pure session transition function.
///
/// Consumes the current state and an action and returns the next state;
/// never performs I/O. Failure semantics: `AssignmentFailed` leaves the
/// gate in its current blocking state, with no partial-satisfaction state.
#[must_use]
pub fn reduce(state: &SessionState, action: &SessionAction) -> SessionState {
    match action {
        SessionAction::SignedIn(profile) | SessionAction::ProfileRefreshed(profile) => {
            SessionState {
                profile: Some(profile.clone()),
                gate: evaluate_gate(profile),
            }
        }
        SessionAction::ManagerAssigned(manager_id) => {
            state.profile.as_ref().map_or_else(SessionState::new, |profile| {
                let updated = OrgProfile {
                    manager_id: Some(*manager_id),
                    ..profile.clone()
                };
                SessionState {
                    gate: evaluate_gate(&updated),
                    profile: Some(updated),
                }
            })
        }
        SessionAction::TeamAssigned(member_ids) => {
            state.profile.as_ref().map_or_else(SessionState::new, |profile| {
                let updated = OrgProfile {
                    team_member_count: u32::try_from(member_ids.len()).unwrap_or(u32::MAX),
                    ..profile.clone()
                };
                SessionState {
                    gate: evaluate_gate(&updated),
                    profile: Some(updated),
                }
            })
        }
        SessionAction::TeamAssignmentSkipped => {
            // Only the advisory team gate is dismissible
            if state.gate == OnboardingGate::NeedsTeam {
                SessionState {
                    profile: state.profile.clone(),
                    gate: OnboardingGate::Satisfied,
                }
            } else {
                state.clone()
            }
        }
        SessionAction::AssignmentFailed => state.clone(),
        SessionAction::SignedOut => SessionState::new(),
    }
}
