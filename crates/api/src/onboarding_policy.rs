// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Policy rules for the blocking onboarding assignment flow.
//!
//! The manager gate is mandatory: a contributor cannot enter the
//! application without a manager on file. The team gate is advisory and
//! may be skipped.

use tempo_domain::OnboardingGate;
use thiserror::Error;

/// Violations of the onboarding assignment policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// A user tried to assign themselves as their own manager.
    #[error("users cannot be their own manager")]
    SelfManager,

    /// A team assignment named no members.
    #[error("team assignment requires at least one member")]
    EmptyTeam,

    /// A manager tried to put themselves on their own team.
    #[error("managers cannot be members of their own team")]
    ManagerInOwnTeam,

    /// Skip was requested while the non-dismissible manager gate blocks.
    #[error("the manager assignment gate cannot be skipped")]
    ManagerGateNotSkippable,

    /// Skip was requested with no blocking gate, or skipping is disabled.
    #[error("no skippable onboarding gate is currently blocking")]
    NothingToSkip,
}

/// Configuration of the onboarding gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    /// Whether the team gate may be dismissed without an assignment.
    pub allow_team_skip: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            allow_team_skip: true,
        }
    }
}

impl GatePolicy {
    /// Validates a manager assignment.
    ///
    /// # Errors
    ///
    /// Returns `GateError::SelfManager` if the user names themselves.
    pub const fn validate_manager_assignment(
        &self,
        user_id: i64,
        manager_id: i64,
    ) -> Result<(), GateError> {
        if user_id == manager_id {
            Err(GateError::SelfManager)
        } else {
            Ok(())
        }
    }

    /// Validates a team assignment.
    ///
    /// # Errors
    ///
    /// Returns `GateError::EmptyTeam` for an empty member list, or
    /// `GateError::ManagerInOwnTeam` if the manager lists themselves.
    pub fn validate_team_assignment(
        &self,
        manager_id: i64,
        member_ids: &[i64],
    ) -> Result<(), GateError> {
        if member_ids.is_empty() {
            return Err(GateError::EmptyTeam);
        }
        if member_ids.contains(&manager_id) {
            return Err(GateError::ManagerInOwnTeam);
        }
        Ok(())
    }

    /// Validates a skip request against the current gate.
    ///
    /// # Errors
    ///
    /// Returns an error if the manager gate blocks (never skippable), if
    /// no gate blocks, or if skipping is disabled by configuration.
    pub const fn validate_skip(&self, gate: OnboardingGate) -> Result<(), GateError> {
        match gate {
            OnboardingGate::NeedsManager => Err(GateError::ManagerGateNotSkippable),
            OnboardingGate::NeedsTeam => {
                if self.allow_team_skip {
                    Ok(())
                } else {
                    Err(GateError::NothingToSkip)
                }
            }
            OnboardingGate::Unchecked | OnboardingGate::Satisfied => {
                Err(GateError::NothingToSkip)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_manager_rejected() {
        let policy = GatePolicy::default();
        assert_eq!(
            policy.validate_manager_assignment(7, 7),
            Err(GateError::SelfManager)
        );
        assert!(policy.validate_manager_assignment(7, 2).is_ok());
    }

    #[test]
    fn test_team_assignment_rules() {
        let policy = GatePolicy::default();
        assert_eq!(policy.validate_team_assignment(2, &[]), Err(GateError::EmptyTeam));
        assert_eq!(
            policy.validate_team_assignment(2, &[7, 2]),
            Err(GateError::ManagerInOwnTeam)
        );
        assert!(policy.validate_team_assignment(2, &[7, 8]).is_ok());
    }

    #[test]
    fn test_only_the_team_gate_is_skippable() {
        let policy = GatePolicy::default();
        assert!(policy.validate_skip(OnboardingGate::NeedsTeam).is_ok());
        assert_eq!(
            policy.validate_skip(OnboardingGate::NeedsManager),
            Err(GateError::ManagerGateNotSkippable)
        );
        assert_eq!(
            policy.validate_skip(OnboardingGate::Satisfied),
            Err(GateError::NothingToSkip)
        );
    }

    #[test]
    fn test_skip_can_be_disabled_by_configuration() {
        let policy = GatePolicy {
            allow_team_skip: false,
        };
        assert_eq!(
            policy.validate_skip(OnboardingGate::NeedsTeam),
            Err(GateError::NothingToSkip)
        );
    }
}
