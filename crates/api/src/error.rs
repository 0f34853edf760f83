// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use tempo::CoreError;
use tempo_domain::DomainError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Validation failures carry the enumerated missing fields so
/// the caller can highlight them instead of showing a generic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid or incomplete input.
    ValidationFailed {
        /// The field or rule that failed.
        field: String,
        /// A human-readable description of the failure.
        message: String,
        /// Required fields that are still unpopulated, when the failure is
        /// an incomplete submission.
        missing_fields: Vec<String>,
    },
    /// A cycle operation was attempted from the wrong cycle state.
    InvalidCycleState {
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The actor's onboarding gate is still blocking.
    OnboardingIncomplete {
        /// The gate state blocking the request.
        gate: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::ValidationFailed {
                field,
                message,
                missing_fields,
            } => {
                if missing_fields.is_empty() {
                    write!(f, "Validation failed for '{field}': {message}")
                } else {
                    write!(
                        f,
                        "Validation failed for '{field}': {message} (missing: {})",
                        missing_fields.join(", ")
                    )
                }
            }
            Self::InvalidCycleState { message } => {
                write!(f, "Invalid cycle state: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::OnboardingIncomplete { gate } => {
                write!(f, "Onboarding incomplete: gate is '{gate}'")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly across the API contract.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::ValidationFailed {
            field: String::from("status"),
            message: format!("Cannot move from '{from}' to '{to}': {reason}"),
            missing_fields: Vec::new(),
        },
        DomainError::TerminalStatusLocked { status } => ApiError::ValidationFailed {
            field: String::from("status"),
            message: format!("Status '{status}' is terminal and cannot be changed"),
            missing_fields: Vec::new(),
        },
        DomainError::TransitionDeniedByPolicy { from, to, role } => ApiError::Unauthorized {
            action: format!("transition {from} -> {to}"),
            required_role: format!("a role other than {role}"),
        },
        DomainError::InvalidStatus(s) => ApiError::ValidationFailed {
            field: String::from("status"),
            message: format!("Unknown status: {s}"),
            missing_fields: Vec::new(),
        },
        DomainError::InvalidReviewType(s) => ApiError::ValidationFailed {
            field: String::from("review_type"),
            message: format!("Unknown review type: {s}"),
            missing_fields: Vec::new(),
        },
        DomainError::InvalidRole(s) => ApiError::ValidationFailed {
            field: String::from("role"),
            message: format!("Unknown role: {s}"),
            missing_fields: Vec::new(),
        },
        DomainError::InvalidRating { value } => ApiError::ValidationFailed {
            field: String::from("rating"),
            message: format!("Invalid rating: {value}. Ratings use a 1-5 scale"),
            missing_fields: Vec::new(),
        },
        DomainError::MissingRequiredFields { fields } => ApiError::ValidationFailed {
            field: String::from("form"),
            message: String::from("Cannot submit: required fields are missing"),
            missing_fields: fields,
        },
        DomainError::AlreadySubmitted => ApiError::ValidationFailed {
            field: String::from("status"),
            message: String::from("Review has already been submitted and is immutable"),
            missing_fields: Vec::new(),
        },
        DomainError::ReviewKindMismatch { expected, actual } => ApiError::ValidationFailed {
            field: String::from("form"),
            message: format!("Review content mismatch: expected '{expected}', got '{actual}'"),
            missing_fields: Vec::new(),
        },
        DomainError::InvalidCycleState {
            current,
            attempted,
            reason,
        } => ApiError::InvalidCycleState {
            message: format!("cycle cannot move from '{current}' to '{attempted}': {reason}"),
        },
        DomainError::MalformedSchedule { reason } => ApiError::InvalidCycleState {
            message: format!("malformed schedule: {reason}"),
        },
        DomainError::InvalidCycleName(msg) => ApiError::ValidationFailed {
            field: String::from("name"),
            message: msg,
            missing_fields: Vec::new(),
        },
        DomainError::InvalidAssignment { reason } => ApiError::ValidationFailed {
            field: String::from("assignment"),
            message: reason,
            missing_fields: Vec::new(),
        },
        DomainError::CycleNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Review cycle"),
            message: format!("cycle {id} does not exist"),
        },
        DomainError::InstanceNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Review instance"),
            message: format!("instance {id} does not exist"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::CycleInactive { status } => ApiError::InvalidCycleState {
            message: format!("reviews can only change while their cycle is active (cycle is '{status}')"),
        },
        CoreError::UnpersistedCycle => ApiError::Internal {
            message: String::from("cycle must be persisted before reviews can be assigned"),
        },
    }
}
