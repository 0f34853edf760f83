// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::instance::ReviewAssignment;

/// Maximum accepted length for a cycle display name.
const MAX_CYCLE_NAME_LEN: usize = 200;

/// Validates a review cycle's display name.
///
/// # Arguments
///
/// * `name` - The candidate name
///
/// # Errors
///
/// Returns `DomainError::InvalidCycleName` if the name is empty after
/// trimming or exceeds the maximum length.
pub fn validate_cycle_name(name: &str) -> Result<(), DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidCycleName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.len() > MAX_CYCLE_NAME_LEN {
        return Err(DomainError::InvalidCycleName(format!(
            "Name cannot exceed {MAX_CYCLE_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates that a review assignment pairs distinct participants.
///
/// Self-assessments are inherently reflexive; peer and manager reviews must
/// name two different users.
///
/// # Errors
///
/// Returns `DomainError::InvalidAssignment` if a reviewer is paired with
/// themselves.
pub fn validate_assignment(assignment: &ReviewAssignment) -> Result<(), DomainError> {
    match assignment {
        ReviewAssignment::SelfAssessment { .. } => Ok(()),
        ReviewAssignment::PeerReview {
            reviewer_id,
            reviewee_id,
        } => {
            if reviewer_id == reviewee_id {
                Err(DomainError::InvalidAssignment {
                    reason: String::from("a peer cannot review themselves"),
                })
            } else {
                Ok(())
            }
        }
        ReviewAssignment::ManagerReview {
            manager_id,
            employee_id,
        } => {
            if manager_id == employee_id {
                Err(DomainError::InvalidAssignment {
                    reason: String::from("a manager cannot review themselves"),
                })
            } else {
                Ok(())
            }
        }
    }
}
