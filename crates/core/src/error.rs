// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tempo_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Review content was touched while the owning cycle is not active.
    CycleInactive {
        /// The cycle's current status.
        status: String,
    },
    /// An operation that needs a persisted cycle was applied to an
    /// unpersisted one.
    UnpersistedCycle,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::CycleInactive { status } => {
                write!(
                    f,
                    "Reviews can only change while their cycle is active (cycle is '{status}')"
                )
            }
            Self::UnpersistedCycle => {
                write!(f, "Cycle must be persisted before reviews can be assigned")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
