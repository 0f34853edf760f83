// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence port.
//!
//! Cycle and review persistence is an external service; this layer only
//! consumes it through the [`ReviewStore`] interface. The in-memory
//! implementation backs tests and embedders that bring no database.

use std::collections::BTreeMap;
use tempo_audit::AuditEvent;
use tempo_domain::{OrgProfile, ReviewCycle, ReviewInstance};

/// Errors surfaced by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced record does not exist.
    NotFound {
        /// The type of record (e.g., "cycle", "instance", "profile").
        resource_type: String,
        /// The missing identifier.
        id: i64,
    },
    /// The record cannot be written as requested.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource_type, id } => {
                write!(f, "{resource_type} {id} not found")
            }
            Self::Conflict { message } => write!(f, "Store conflict: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The interface the review persistence service exposes to this core.
pub trait ReviewStore {
    /// Persists a new cycle and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the cycle already carries an id.
    fn insert_cycle(&mut self, cycle: ReviewCycle) -> Result<i64, StoreError>;

    /// Replaces a persisted cycle.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the cycle is unknown, or
    /// `StoreError::Conflict` if it carries no id.
    fn update_cycle(&mut self, cycle: &ReviewCycle) -> Result<(), StoreError>;

    /// Fetches a cycle by identifier.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the cycle is unknown.
    fn get_cycle(&self, cycle_id: i64) -> Result<ReviewCycle, StoreError>;

    /// Removes a cycle.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the cycle is unknown.
    fn delete_cycle(&mut self, cycle_id: i64) -> Result<(), StoreError>;

    /// Lists all cycles, most recently created first.
    fn list_cycles(&self) -> Vec<ReviewCycle>;

    /// Persists a new instance and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the instance already carries an id.
    fn insert_instance(&mut self, instance: ReviewInstance) -> Result<i64, StoreError>;

    /// Replaces a persisted instance.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the instance is unknown, or
    /// `StoreError::Conflict` if it carries no id.
    fn update_instance(&mut self, instance: &ReviewInstance) -> Result<(), StoreError>;

    /// Fetches an instance by identifier.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the instance is unknown.
    fn get_instance(&self, instance_id: i64) -> Result<ReviewInstance, StoreError>;

    /// Lists all instances belonging to a cycle.
    fn list_instances_for_cycle(&self, cycle_id: i64) -> Vec<ReviewInstance>;

    /// Lists all instances a user authors or is the subject of.
    fn list_instances_for_user(&self, user_id: i64) -> Vec<ReviewInstance>;

    /// Fetches a user's org-chart profile.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user is unknown.
    fn get_profile(&self, user_id: i64) -> Result<OrgProfile, StoreError>;

    /// Creates or replaces a user's org-chart profile.
    fn upsert_profile(&mut self, profile: OrgProfile);

    /// Appends an audit event to the log.
    fn append_audit(&mut self, event: AuditEvent);

    /// Returns the audit log in append order.
    fn audit_log(&self) -> &[AuditEvent];
}

/// An in-memory store for tests and database-free embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    cycles: BTreeMap<i64, ReviewCycle>,
    instances: BTreeMap<i64, ReviewInstance>,
    profiles: BTreeMap<i64, OrgProfile>,
    audit: Vec<AuditEvent>,
    next_cycle_id: i64,
    next_instance_id: i64,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewStore for InMemoryStore {
    fn insert_cycle(&mut self, cycle: ReviewCycle) -> Result<i64, StoreError> {
        if cycle.cycle_id.is_some() {
            return Err(StoreError::Conflict {
                message: String::from("cycle already has an identifier"),
            });
        }
        self.next_cycle_id += 1;
        let id = self.next_cycle_id;
        let mut persisted = cycle;
        persisted.cycle_id = Some(id);
        self.cycles.insert(id, persisted);
        Ok(id)
    }

    fn update_cycle(&mut self, cycle: &ReviewCycle) -> Result<(), StoreError> {
        let Some(id) = cycle.cycle_id else {
            return Err(StoreError::Conflict {
                message: String::from("cannot update a cycle without an identifier"),
            });
        };
        if !self.cycles.contains_key(&id) {
            return Err(StoreError::NotFound {
                resource_type: String::from("cycle"),
                id,
            });
        }
        self.cycles.insert(id, cycle.clone());
        Ok(())
    }

    fn get_cycle(&self, cycle_id: i64) -> Result<ReviewCycle, StoreError> {
        self.cycles
            .get(&cycle_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                resource_type: String::from("cycle"),
                id: cycle_id,
            })
    }

    fn delete_cycle(&mut self, cycle_id: i64) -> Result<(), StoreError> {
        if self.cycles.remove(&cycle_id).is_none() {
            return Err(StoreError::NotFound {
                resource_type: String::from("cycle"),
                id: cycle_id,
            });
        }
        Ok(())
    }

    fn list_cycles(&self) -> Vec<ReviewCycle> {
        // Identifiers ascend with creation, so reverse order is
        // reverse-chronological by creation
        self.cycles.values().rev().cloned().collect()
    }

    fn insert_instance(&mut self, instance: ReviewInstance) -> Result<i64, StoreError> {
        if instance.instance_id.is_some() {
            return Err(StoreError::Conflict {
                message: String::from("instance already has an identifier"),
            });
        }
        self.next_instance_id += 1;
        let id = self.next_instance_id;
        let mut persisted = instance;
        persisted.instance_id = Some(id);
        self.instances.insert(id, persisted);
        Ok(id)
    }

    fn update_instance(&mut self, instance: &ReviewInstance) -> Result<(), StoreError> {
        let Some(id) = instance.instance_id else {
            return Err(StoreError::Conflict {
                message: String::from("cannot update an instance without an identifier"),
            });
        };
        if !self.instances.contains_key(&id) {
            return Err(StoreError::NotFound {
                resource_type: String::from("instance"),
                id,
            });
        }
        self.instances.insert(id, instance.clone());
        Ok(())
    }

    fn get_instance(&self, instance_id: i64) -> Result<ReviewInstance, StoreError> {
        self.instances
            .get(&instance_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                resource_type: String::from("instance"),
                id: instance_id,
            })
    }

    fn list_instances_for_cycle(&self, cycle_id: i64) -> Vec<ReviewInstance> {
        self.instances
            .values()
            .filter(|i| i.cycle_id == cycle_id)
            .cloned()
            .collect()
    }

    fn list_instances_for_user(&self, user_id: i64) -> Vec<ReviewInstance> {
        self.instances
            .values()
            .filter(|i| {
                i.assignment.author_id() == user_id || i.assignment.subject_id() == user_id
            })
            .cloned()
            .collect()
    }

    fn get_profile(&self, user_id: i64) -> Result<OrgProfile, StoreError> {
        self.profiles
            .get(&user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                resource_type: String::from("profile"),
                id: user_id,
            })
    }

    fn upsert_profile(&mut self, profile: OrgProfile) {
        self.profiles.insert(profile.user_id, profile);
    }

    fn append_audit(&mut self, event: AuditEvent) {
        self.audit.push(event);
    }

    fn audit_log(&self) -> &[AuditEvent] {
        &self.audit
    }
}
