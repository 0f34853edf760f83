// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Review instance records: per-participant-per-cycle state.
//!
//! An instance is one person's (or pair's) review record within one cycle.
//! Instances carry a restricted status sub-lattice (`not_started`,
//! `in_progress`, `completed`) and derive their completion percentage from
//! required-field presence. Submission is final: a completed instance is
//! immutable and `submitted_at` is set exactly once.
//!
//! Instances are never deleted. A cancelled cycle leaves its instances in
//! place, readable but frozen.

use crate::error::DomainError;
use crate::types::Rating;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Status sub-lattice for review instances.
///
/// Instances never block, lapse, or cancel at this granularity; those
/// states live on cycles and generic work items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    /// No required field has been populated.
    #[default]
    NotStarted,
    /// At least one required field has been populated.
    InProgress,
    /// Submitted. Terminal and immutable.
    Completed,
}

impl InstanceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Checks whether a transition from this status to `target` is legal.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::NotStarted, Self::InProgress | Self::Completed)
                | (Self::InProgress, Self::Completed)
        )
    }
}

impl FromStr for InstanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three review variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewKind {
    /// A participant's own assessment.
    SelfAssessment,
    /// One peer reviewing another.
    PeerReview,
    /// A manager reviewing a direct report.
    ManagerReview,
}

impl ReviewKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SelfAssessment => "self_assessment",
            Self::PeerReview => "peer_review",
            Self::ManagerReview => "manager_review",
        }
    }
}

impl std::fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalizes a free-text field value.
///
/// Whitespace-only text counts as unpopulated, so a field holding it is
/// treated as cleared.
fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn text_present(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn merge_rating(current: Option<Rating>, patch: Option<Rating>) -> Option<Rating> {
    patch.or(current)
}

fn merge_text(current: &Option<String>, patch: &Option<String>) -> Option<String> {
    match patch {
        Some(value) => normalize_text(value),
        None => current.clone(),
    }
}

/// A participant's self-assessment form.
///
/// The four rating/example pairs are required for submission; the three
/// development prompts are saved but advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelfAssessmentForm {
    /// Rating for key accomplishments this period.
    pub accomplishments_rating: Option<Rating>,
    /// Rating for collaboration and teamwork.
    pub collaboration_rating: Option<Rating>,
    /// Rating for personal growth.
    pub growth_rating: Option<Rating>,
    /// Rating for execution and delivery.
    pub execution_rating: Option<Rating>,
    /// Supporting example for the accomplishments rating.
    pub accomplishments_example: Option<String>,
    /// Supporting example for the collaboration rating.
    pub collaboration_example: Option<String>,
    /// Supporting example for the growth rating.
    pub growth_example: Option<String>,
    /// Supporting example for the execution rating.
    pub execution_example: Option<String>,
    /// Development prompt: strengths to build on.
    pub strengths: Option<String>,
    /// Development prompt: areas to grow.
    pub growth_areas: Option<String>,
    /// Development prompt: support needed from the organization.
    pub support_needed: Option<String>,
}

impl SelfAssessmentForm {
    /// Required fields and whether each is populated, in stable order.
    #[must_use]
    pub fn required_field_presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("accomplishments_rating", self.accomplishments_rating.is_some()),
            ("collaboration_rating", self.collaboration_rating.is_some()),
            ("growth_rating", self.growth_rating.is_some()),
            ("execution_rating", self.execution_rating.is_some()),
            (
                "accomplishments_example",
                text_present(self.accomplishments_example.as_ref()),
            ),
            (
                "collaboration_example",
                text_present(self.collaboration_example.as_ref()),
            ),
            ("growth_example", text_present(self.growth_example.as_ref())),
            (
                "execution_example",
                text_present(self.execution_example.as_ref()),
            ),
        ]
    }

    /// Merges a partial update into this form, returning the merged form.
    #[must_use]
    pub fn merge(&self, patch: &Self) -> Self {
        Self {
            accomplishments_rating: merge_rating(
                self.accomplishments_rating,
                patch.accomplishments_rating,
            ),
            collaboration_rating: merge_rating(
                self.collaboration_rating,
                patch.collaboration_rating,
            ),
            growth_rating: merge_rating(self.growth_rating, patch.growth_rating),
            execution_rating: merge_rating(self.execution_rating, patch.execution_rating),
            accomplishments_example: merge_text(
                &self.accomplishments_example,
                &patch.accomplishments_example,
            ),
            collaboration_example: merge_text(
                &self.collaboration_example,
                &patch.collaboration_example,
            ),
            growth_example: merge_text(&self.growth_example, &patch.growth_example),
            execution_example: merge_text(&self.execution_example, &patch.execution_example),
            strengths: merge_text(&self.strengths, &patch.strengths),
            growth_areas: merge_text(&self.growth_areas, &patch.growth_areas),
            support_needed: merge_text(&self.support_needed, &patch.support_needed),
        }
    }
}

/// A peer-review form. All six fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PeerReviewForm {
    /// Rating for collaboration with the reviewer.
    pub collaboration_rating: Option<Rating>,
    /// Rating for impact on shared work.
    pub impact_rating: Option<Rating>,
    /// Supporting example for the collaboration rating.
    pub collaboration_example: Option<String>,
    /// Supporting example for the impact rating.
    pub impact_example: Option<String>,
    /// Feedback on strengths the reviewee should keep.
    pub strengths_feedback: Option<String>,
    /// Feedback on where the reviewee could grow.
    pub growth_feedback: Option<String>,
}

impl PeerReviewForm {
    /// Required fields and whether each is populated, in stable order.
    #[must_use]
    pub fn required_field_presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("collaboration_rating", self.collaboration_rating.is_some()),
            ("impact_rating", self.impact_rating.is_some()),
            (
                "collaboration_example",
                text_present(self.collaboration_example.as_ref()),
            ),
            ("impact_example", text_present(self.impact_example.as_ref())),
            (
                "strengths_feedback",
                text_present(self.strengths_feedback.as_ref()),
            ),
            (
                "growth_feedback",
                text_present(self.growth_feedback.as_ref()),
            ),
        ]
    }

    /// Merges a partial update into this form, returning the merged form.
    #[must_use]
    pub fn merge(&self, patch: &Self) -> Self {
        Self {
            collaboration_rating: merge_rating(
                self.collaboration_rating,
                patch.collaboration_rating,
            ),
            impact_rating: merge_rating(self.impact_rating, patch.impact_rating),
            collaboration_example: merge_text(
                &self.collaboration_example,
                &patch.collaboration_example,
            ),
            impact_example: merge_text(&self.impact_example, &patch.impact_example),
            strengths_feedback: merge_text(&self.strengths_feedback, &patch.strengths_feedback),
            growth_feedback: merge_text(&self.growth_feedback, &patch.growth_feedback),
        }
    }
}

/// A manager-review form. All twelve fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ManagerReviewForm {
    /// Overall performance rating.
    pub overall_rating: Option<Rating>,
    /// Competency rating: delivery.
    pub delivery_rating: Option<Rating>,
    /// Competency rating: collaboration.
    pub collaboration_rating: Option<Rating>,
    /// Competency rating: growth.
    pub growth_rating: Option<Rating>,
    /// Competency rating: leadership.
    pub leadership_rating: Option<Rating>,
    /// Justification for the delivery rating.
    pub delivery_justification: Option<String>,
    /// Justification for the collaboration rating.
    pub collaboration_justification: Option<String>,
    /// Justification for the growth rating.
    pub growth_justification: Option<String>,
    /// Justification for the leadership rating.
    pub leadership_justification: Option<String>,
    /// Development note: strengths to build on.
    pub strengths: Option<String>,
    /// Development note: areas to grow.
    pub growth_areas: Option<String>,
    /// Development note: plan for the next period.
    pub development_plan: Option<String>,
}

impl ManagerReviewForm {
    /// Required fields and whether each is populated, in stable order.
    #[must_use]
    pub fn required_field_presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("overall_rating", self.overall_rating.is_some()),
            ("delivery_rating", self.delivery_rating.is_some()),
            ("collaboration_rating", self.collaboration_rating.is_some()),
            ("growth_rating", self.growth_rating.is_some()),
            ("leadership_rating", self.leadership_rating.is_some()),
            (
                "delivery_justification",
                text_present(self.delivery_justification.as_ref()),
            ),
            (
                "collaboration_justification",
                text_present(self.collaboration_justification.as_ref()),
            ),
            (
                "growth_justification",
                text_present(self.growth_justification.as_ref()),
            ),
            (
                "leadership_justification",
                text_present(self.leadership_justification.as_ref()),
            ),
            ("strengths", text_present(self.strengths.as_ref())),
            ("growth_areas", text_present(self.growth_areas.as_ref())),
            (
                "development_plan",
                text_present(self.development_plan.as_ref()),
            ),
        ]
    }

    /// Merges a partial update into this form, returning the merged form.
    #[must_use]
    pub fn merge(&self, patch: &Self) -> Self {
        Self {
            overall_rating: merge_rating(self.overall_rating, patch.overall_rating),
            delivery_rating: merge_rating(self.delivery_rating, patch.delivery_rating),
            collaboration_rating: merge_rating(
                self.collaboration_rating,
                patch.collaboration_rating,
            ),
            growth_rating: merge_rating(self.growth_rating, patch.growth_rating),
            leadership_rating: merge_rating(self.leadership_rating, patch.leadership_rating),
            delivery_justification: merge_text(
                &self.delivery_justification,
                &patch.delivery_justification,
            ),
            collaboration_justification: merge_text(
                &self.collaboration_justification,
                &patch.collaboration_justification,
            ),
            growth_justification: merge_text(
                &self.growth_justification,
                &patch.growth_justification,
            ),
            leadership_justification: merge_text(
                &self.leadership_justification,
                &patch.leadership_justification,
            ),
            strengths: merge_text(&self.strengths, &patch.strengths),
            growth_areas: merge_text(&self.growth_areas, &patch.growth_areas),
            development_plan: merge_text(&self.development_plan, &patch.development_plan),
        }
    }
}

/// The variant-specific content of a review instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewForm {
    /// Self-assessment content.
    SelfAssessment(SelfAssessmentForm),
    /// Peer-review content.
    PeerReview(PeerReviewForm),
    /// Manager-review content.
    ManagerReview(ManagerReviewForm),
}

impl ReviewForm {
    /// Creates an empty form for the given review kind.
    #[must_use]
    pub fn empty(kind: ReviewKind) -> Self {
        match kind {
            ReviewKind::SelfAssessment => Self::SelfAssessment(SelfAssessmentForm::default()),
            ReviewKind::PeerReview => Self::PeerReview(PeerReviewForm::default()),
            ReviewKind::ManagerReview => Self::ManagerReview(ManagerReviewForm::default()),
        }
    }

    /// Returns the review kind this form belongs to.
    #[must_use]
    pub const fn kind(&self) -> ReviewKind {
        match self {
            Self::SelfAssessment(_) => ReviewKind::SelfAssessment,
            Self::PeerReview(_) => ReviewKind::PeerReview,
            Self::ManagerReview(_) => ReviewKind::ManagerReview,
        }
    }

    /// Required fields and whether each is populated, in stable order.
    #[must_use]
    pub fn required_field_presence(&self) -> Vec<(&'static str, bool)> {
        match self {
            Self::SelfAssessment(form) => form.required_field_presence(),
            Self::PeerReview(form) => form.required_field_presence(),
            Self::ManagerReview(form) => form.required_field_presence(),
        }
    }

    /// Merges a partial update of the same variant into this form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReviewKindMismatch` if the patch is a different
    /// variant from this form.
    pub fn merge(&self, patch: &Self) -> Result<Self, DomainError> {
        match (self, patch) {
            (Self::SelfAssessment(current), Self::SelfAssessment(update)) => {
                Ok(Self::SelfAssessment(current.merge(update)))
            }
            (Self::PeerReview(current), Self::PeerReview(update)) => {
                Ok(Self::PeerReview(current.merge(update)))
            }
            (Self::ManagerReview(current), Self::ManagerReview(update)) => {
                Ok(Self::ManagerReview(current.merge(update)))
            }
            _ => Err(DomainError::ReviewKindMismatch {
                expected: self.kind().as_str().to_string(),
                actual: patch.kind().as_str().to_string(),
            }),
        }
    }
}

/// Identifies the participants of a review instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewAssignment {
    /// A participant assessing themselves.
    SelfAssessment {
        /// The participant.
        subject_id: i64,
    },
    /// One peer reviewing another.
    PeerReview {
        /// The peer writing the review.
        reviewer_id: i64,
        /// The peer being reviewed.
        reviewee_id: i64,
    },
    /// A manager reviewing a direct report.
    ManagerReview {
        /// The manager writing the review.
        manager_id: i64,
        /// The report being reviewed.
        employee_id: i64,
    },
}

impl ReviewAssignment {
    /// Returns the review kind of this assignment.
    #[must_use]
    pub const fn kind(&self) -> ReviewKind {
        match self {
            Self::SelfAssessment { .. } => ReviewKind::SelfAssessment,
            Self::PeerReview { .. } => ReviewKind::PeerReview,
            Self::ManagerReview { .. } => ReviewKind::ManagerReview,
        }
    }

    /// The user who writes (and owns edits to) this review.
    #[must_use]
    pub const fn author_id(&self) -> i64 {
        match self {
            Self::SelfAssessment { subject_id } => *subject_id,
            Self::PeerReview { reviewer_id, .. } => *reviewer_id,
            Self::ManagerReview { manager_id, .. } => *manager_id,
        }
    }

    /// The user the review is about.
    #[must_use]
    pub const fn subject_id(&self) -> i64 {
        match self {
            Self::SelfAssessment { subject_id } => *subject_id,
            Self::PeerReview { reviewee_id, .. } => *reviewee_id,
            Self::ManagerReview { employee_id, .. } => *employee_id,
        }
    }
}

/// A single review record within one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInstance {
    /// Canonical identifier assigned by the persistence layer.
    /// `None` indicates the instance has not been persisted yet.
    pub instance_id: Option<i64>,
    /// The owning cycle.
    pub cycle_id: i64,
    /// Who writes this review and who it is about.
    pub assignment: ReviewAssignment,
    /// The variant-specific form content.
    pub form: ReviewForm,
    /// The instance's status within the restricted sub-lattice.
    pub status: InstanceStatus,
    /// When the review was submitted. Set exactly once.
    pub submitted_at: Option<OffsetDateTime>,
}

impl ReviewInstance {
    /// Creates a new empty `ReviewInstance` for an assignment.
    ///
    /// # Arguments
    ///
    /// * `cycle_id` - The owning cycle
    /// * `assignment` - The review's participants
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAssignment` if the assignment pairs a
    /// participant with themselves.
    pub fn new(cycle_id: i64, assignment: ReviewAssignment) -> Result<Self, DomainError> {
        crate::validation::validate_assignment(&assignment)?;
        Ok(Self {
            instance_id: None,
            cycle_id,
            assignment,
            form: ReviewForm::empty(assignment.kind()),
            status: InstanceStatus::NotStarted,
            submitted_at: None,
        })
    }

    /// Returns the review kind of this instance.
    #[must_use]
    pub const fn kind(&self) -> ReviewKind {
        self.assignment.kind()
    }

    /// Derives the completion percentage from required-field presence.
    ///
    /// `populated / required × 100`, truncated; exactly 100 iff every
    /// required field is populated.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn completion_percentage(&self) -> u8 {
        let presence = self.form.required_field_presence();
        let total = presence.len();
        if total == 0 {
            return 100;
        }
        let populated = presence.iter().filter(|(_, present)| *present).count();
        // Safe cast: the quotient is at most 100
        (populated * 100 / total) as u8
    }

    /// Returns the names of required fields that are still unpopulated.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.form
            .required_field_presence()
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }

    /// Returns true if this instance may be submitted.
    ///
    /// Every required field must be populated and the instance must not
    /// already be completed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.status != InstanceStatus::Completed && self.missing_fields().is_empty()
    }

    /// Merges a partial update into the instance.
    ///
    /// The status is recomputed from required-field presence: an instance
    /// with no populated required fields stays `not_started`, anything else
    /// is `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadySubmitted` on a completed instance
    /// (reviews are immutable post-submission), or
    /// `DomainError::ReviewKindMismatch` for a patch of the wrong variant.
    pub fn save(&self, patch: &ReviewForm) -> Result<Self, DomainError> {
        if self.status == InstanceStatus::Completed {
            return Err(DomainError::AlreadySubmitted);
        }

        let form = self.form.merge(patch)?;
        let populated = form
            .required_field_presence()
            .iter()
            .filter(|(_, present)| *present)
            .count();
        let status = if populated == 0 {
            InstanceStatus::NotStarted
        } else {
            InstanceStatus::InProgress
        };

        Ok(Self {
            form,
            status,
            ..self.clone()
        })
    }

    /// Finalizes the instance.
    ///
    /// Sets `completed` and stamps `submitted_at`. Not idempotent: a second
    /// submission fails because the status is already terminal.
    ///
    /// # Arguments
    ///
    /// * `now` - The submission instant (injected for testability)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadySubmitted` on a completed instance, or
    /// `DomainError::MissingRequiredFields` naming every unpopulated field.
    pub fn submit(&self, now: OffsetDateTime) -> Result<Self, DomainError> {
        if self.status == InstanceStatus::Completed {
            return Err(DomainError::AlreadySubmitted);
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::MissingRequiredFields {
                fields: missing.into_iter().map(str::to_string).collect(),
            });
        }

        Ok(Self {
            status: InstanceStatus::Completed,
            submitted_at: Some(now),
            ..self.clone()
        })
    }
}
