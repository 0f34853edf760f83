// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use tempo_domain::{ReviewForm, UserReviewDashboard};
use time::OffsetDateTime;

/// A schedule window as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Window start instant (inclusive).
    pub start: OffsetDateTime,
    /// Window end instant (exclusive).
    pub end: OffsetDateTime,
}

/// API request to create a new review cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCycleRequest {
    /// Display name for the cycle.
    pub name: String,
    /// The cycle's cadence (quarterly, half_yearly, annual).
    pub review_type: String,
    /// The period of work under review.
    pub review_period: WindowInfo,
    /// The self-assessment window.
    pub self_assessment: WindowInfo,
    /// The peer-review window.
    pub peer_review: WindowInfo,
    /// The manager-review window.
    pub manager_review: WindowInfo,
}

/// API response for a successful cycle creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCycleResponse {
    /// The canonical cycle identifier.
    pub cycle_id: i64,
    /// The cycle's display name.
    pub name: String,
    /// The cycle's cadence.
    pub review_type: String,
    /// The cycle's status (always "draft" at creation).
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to edit a draft cycle.
///
/// Only draft cycles may be edited; a field left as `None` keeps its
/// current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCycleRequest {
    /// The cycle to edit.
    pub cycle_id: i64,
    /// A new display name, if changing.
    pub name: Option<String>,
    /// A new cadence, if changing.
    pub review_type: Option<String>,
    /// A new review period, if changing.
    pub review_period: Option<WindowInfo>,
    /// A new self-assessment window, if changing.
    pub self_assessment: Option<WindowInfo>,
    /// A new peer-review window, if changing.
    pub peer_review: Option<WindowInfo>,
    /// A new manager-review window, if changing.
    pub manager_review: Option<WindowInfo>,
}

/// API response for a successful cycle edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCycleResponse {
    /// The cycle identifier.
    pub cycle_id: i64,
    /// The cycle's display name after the edit.
    pub name: String,
    /// A success message.
    pub message: String,
}

/// API request to delete a draft cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCycleRequest {
    /// The cycle to delete.
    pub cycle_id: i64,
}

/// API response for a successful cycle deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCycleResponse {
    /// The deleted cycle's identifier.
    pub cycle_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to activate a draft cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivateCycleRequest {
    /// The cycle to activate.
    pub cycle_id: i64,
}

/// API response for a successful cycle activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateCycleResponse {
    /// The cycle identifier.
    pub cycle_id: i64,
    /// The cycle's new status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to complete an active cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteCycleRequest {
    /// The cycle to complete.
    pub cycle_id: i64,
}

/// API response for a successful cycle completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteCycleResponse {
    /// The cycle identifier.
    pub cycle_id: i64,
    /// The cycle's new status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to cancel a draft or active cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelCycleRequest {
    /// The cycle to cancel.
    pub cycle_id: i64,
}

/// API response for a successful cycle cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelCycleResponse {
    /// The cycle identifier.
    pub cycle_id: i64,
    /// The cycle's new status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// One review assignment as it appears on the wire.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// The review variant (self_assessment, peer_review, manager_review).
    pub kind: String,
    /// The user who writes the review.
    pub author_id: i64,
    /// The user the review is about. Equal to `author_id` for
    /// self-assessments.
    pub subject_id: i64,
}

/// API request to seed review instances for a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAssignmentsRequest {
    /// The owning cycle.
    pub cycle_id: i64,
    /// The assignments to create.
    pub assignments: Vec<AssignmentRequest>,
}

/// API response for successful assignment seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAssignmentsResponse {
    /// The owning cycle.
    pub cycle_id: i64,
    /// Identifiers of the created instances, in request order.
    pub instance_ids: Vec<i64>,
    /// A success message.
    pub message: String,
}

/// API request to merge a partial update into a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReviewRequest {
    /// The instance to update.
    pub instance_id: i64,
    /// The fields to merge in. Must match the instance's variant.
    pub fields: ReviewForm,
}

/// API response for a successful review save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReviewResponse {
    /// The instance identifier.
    pub instance_id: i64,
    /// The instance's status after the save.
    pub status: String,
    /// The derived completion percentage after the save.
    pub completion_percentage: u8,
    /// A success message.
    pub message: String,
}

/// API request to finalize a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReviewRequest {
    /// The instance to submit.
    pub instance_id: i64,
}

/// API response for a successful review submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    /// The instance identifier.
    pub instance_id: i64,
    /// The instance's status after submission (always "completed").
    pub status: String,
    /// When the review was submitted.
    pub submitted_at: OffsetDateTime,
    /// A success message.
    pub message: String,
}

/// API request to assign a manager to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignManagerRequest {
    /// The user receiving a manager.
    pub user_id: i64,
    /// The manager being assigned.
    pub manager_id: i64,
}

/// API response for a successful manager assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignManagerResponse {
    /// The user who received a manager.
    pub user_id: i64,
    /// The assigned manager.
    pub manager_id: i64,
    /// The onboarding gate after the assignment.
    pub gate: String,
    /// A success message.
    pub message: String,
}

/// API request to assign team members to a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTeamMembersRequest {
    /// The manager receiving a team.
    pub manager_id: i64,
    /// The team members being assigned.
    pub member_ids: Vec<i64>,
}

/// API response for a successful team assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignTeamMembersResponse {
    /// The manager who received a team.
    pub manager_id: i64,
    /// The team size after the assignment.
    pub team_member_count: u32,
    /// The onboarding gate after the assignment.
    pub gate: String,
    /// A success message.
    pub message: String,
}

/// API request to skip the advisory team gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipTeamAssignmentRequest {
    /// The manager skipping team assignment.
    pub manager_id: i64,
}

/// API response for a successful gate skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipTeamAssignmentResponse {
    /// The onboarding gate after the skip.
    pub gate: String,
    /// A success message.
    pub message: String,
}

/// Per-phase completion counts for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseProgressInfo {
    /// Instances submitted.
    pub completed: usize,
    /// Instances expected.
    pub total: usize,
    /// Completion percentage, 0 when the phase has no instances.
    pub percentage: u8,
}

/// API response for a cycle progress read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCycleProgressResponse {
    /// The cycle identifier.
    pub cycle_id: i64,
    /// Self-assessment completion.
    pub self_assessment: PhaseProgressInfo,
    /// Peer-review completion.
    pub peer_review: PhaseProgressInfo,
    /// Manager-review completion.
    pub manager_review: PhaseProgressInfo,
}

/// API response for a user dashboard read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDashboardResponse {
    /// The assembled dashboard.
    pub dashboard: UserReviewDashboard,
}

/// Cycle information for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInfo {
    /// The canonical cycle identifier.
    pub cycle_id: i64,
    /// The cycle's display name.
    pub name: String,
    /// The cycle's cadence.
    pub review_type: String,
    /// The cycle's lifecycle status.
    pub status: String,
    /// The phase the cycle is in at the evaluation instant.
    pub current_phase: String,
    /// Number of participants enrolled.
    pub participant_count: u32,
}

/// API response for listing cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCyclesResponse {
    /// Cycles, most recently created first.
    pub cycles: Vec<CycleInfo>,
}

/// A single capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

/// Application-wide capabilities for the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCapabilities {
    /// May create review cycles.
    pub can_create_cycle: Capability,
    /// May activate, complete, or cancel cycles.
    pub can_operate_cycles: Capability,
    /// May save and submit review forms.
    pub can_write_reviews: Capability,
    /// May view the review dashboard.
    pub can_view_dashboard: Capability,
    /// May use the onboarding assignment flow.
    pub can_complete_onboarding: Capability,
}

/// Phase-aware capabilities for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleCapabilities {
    /// May edit self-assessments right now.
    pub can_edit_self_assessment: Capability,
    /// May edit peer reviews right now.
    pub can_edit_peer_reviews: Capability,
    /// May edit manager reviews right now.
    pub can_edit_manager_reviews: Capability,
}

/// API response describing the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The user's canonical identifier.
    pub user_id: i64,
    /// The user's organizational role.
    pub role: String,
    /// The user's onboarding gate.
    pub gate: String,
    /// The user's application-wide capabilities.
    pub capabilities: GlobalCapabilities,
}

/// API request to transition a generic entity status.
///
/// Tasks and goals share the universal status vocabulary; this operation
/// exposes the legality matrix plus the configured role policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionStatusRequest {
    /// The entity's current status.
    pub from: String,
    /// The requested status.
    pub to: String,
}

/// API response for a permitted status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionStatusResponse {
    /// The entity's previous status.
    pub from: String,
    /// The entity's new status.
    pub to: String,
    /// A success message.
    pub message: String,
}
