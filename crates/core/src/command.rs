// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tempo_domain::{ReviewAssignment, ReviewForm};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activate a draft cycle, making its schedule invariants binding.
    ActivateCycle,
    /// Complete an active cycle. Issued manually or applied from the
    /// auto-completion suggestion once the manager-review window closes.
    CompleteCycle,
    /// Cancel a draft or active cycle. Instances stay readable but frozen.
    CancelCycle,
    /// Seed empty review instances for a set of assignments.
    CreateAssignments {
        /// The participants to create instances for.
        assignments: Vec<ReviewAssignment>,
    },
    /// Merge a partial update into a review instance.
    SaveReview {
        /// The instance to update.
        instance_id: i64,
        /// The fields to merge in.
        patch: ReviewForm,
    },
    /// Finalize a review instance. Not idempotent.
    SubmitReview {
        /// The instance to submit.
        instance_id: i64,
    },
}
