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
    clippy::all
)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod onboarding_policy;
mod request_response;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use auth::{AuthenticatedActor, AuthorizationService};
pub use capabilities::{compute_cycle_capabilities, compute_global_capabilities};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiResult, SessionApiResult, activate_cycle, assign_manager, assign_team_members,
    cancel_cycle, complete_cycle, create_assignments, create_cycle, delete_cycle,
    get_cycle_progress, get_dashboard, list_cycles, save_review, skip_team_assignment,
    submit_review, transition_entity_status, update_cycle, whoami,
};
pub use onboarding_policy::{GateError, GatePolicy};
pub use request_response::{
    ActivateCycleRequest, ActivateCycleResponse, AssignManagerRequest, AssignManagerResponse,
    AssignTeamMembersRequest, AssignTeamMembersResponse, AssignmentRequest, CancelCycleRequest,
    CancelCycleResponse, Capability, CompleteCycleRequest, CompleteCycleResponse,
    CreateAssignmentsRequest, CreateAssignmentsResponse, CreateCycleRequest, CreateCycleResponse,
    CycleCapabilities, CycleInfo, DeleteCycleRequest, DeleteCycleResponse,
    GetCycleProgressResponse, GetDashboardResponse, GlobalCapabilities, ListCyclesResponse,
    PhaseProgressInfo, SaveReviewRequest, SaveReviewResponse, SkipTeamAssignmentRequest,
    SkipTeamAssignmentResponse, SubmitReviewRequest, SubmitReviewResponse,
    TransitionStatusRequest, TransitionStatusResponse, UpdateCycleRequest, UpdateCycleResponse,
    WhoAmIResponse, WindowInfo,
};
pub use store::{InMemoryStore, ReviewStore, StoreError};
