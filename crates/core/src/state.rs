// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tempo_audit::{AuditEvent, StateSnapshot};
use tempo_domain::{ReviewCycle, ReviewInstance};

/// The complete system state scoped to a single review cycle.
///
/// Scoping state to one cycle keeps transitions small and gives audit
/// events a natural scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleState {
    /// The cycle this state is scoped to.
    pub cycle: ReviewCycle,
    /// All review instances belonging to this cycle.
    pub instances: Vec<ReviewInstance>,
}

impl CycleState {
    /// Creates a new state for a cycle with no instances yet.
    ///
    /// # Arguments
    ///
    /// * `cycle` - The cycle this state is scoped to
    #[must_use]
    pub const fn new(cycle: ReviewCycle) -> Self {
        Self {
            cycle,
            instances: Vec::new(),
        }
    }

    /// Looks up an instance by its persisted identifier.
    #[must_use]
    pub fn find_instance(&self, instance_id: i64) -> Option<&ReviewInstance> {
        self.instances
            .iter()
            .find(|i| i.instance_id == Some(instance_id))
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let submitted = self
            .instances
            .iter()
            .filter(|i| i.submitted_at.is_some())
            .count();
        let in_progress = self
            .instances
            .iter()
            .filter(|i| i.status == tempo_domain::InstanceStatus::InProgress)
            .count();
        StateSnapshot::new(format!(
            "cycle={},status={},instances_count={},in_progress_count={},submitted_count={}",
            self.cycle.cycle_id.map_or_else(|| String::from("-"), |id| id.to_string()),
            self.cycle.status,
            self.instances.len(),
            in_progress,
            submitted,
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: CycleState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
