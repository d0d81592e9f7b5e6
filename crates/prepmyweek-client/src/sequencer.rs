// ABOUTME: Request sequencing that discards responses overtaken by newer requests
// ABOUTME: Monotonic request ids per resource plus a Latest<T> slot that only accepts the newest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! # Stale Response Discarding
//!
//! Fetches for the same resource may resolve out of order. Each fetch takes a
//! [`RequestTicket`] before it starts; when it resolves, its result is applied
//! only if no newer ticket has been issued for that resource since. Nothing is
//! cancelled; stale results are dropped.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Proof that a request was issued, carrying its sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    resource: String,
    id: u64,
}

impl RequestTicket {
    /// Resource the request targets
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Monotonic request id
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Default)]
struct SequencerState {
    last_id: u64,
    newest: HashMap<String, u64>,
}

/// Issues monotonically increasing request ids and tracks the newest per resource
#[derive(Debug, Default)]
pub struct RequestSequencer {
    state: Mutex<SequencerState>,
}

impl RequestSequencer {
    /// Create an empty sequencer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SequencerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new request for `resource`, superseding any in flight
    ///
    /// The id is allocated and recorded under one lock, so the newest
    /// recorded id is always the last one handed out.
    pub fn issue(&self, resource: &str) -> RequestTicket {
        let mut state = self.lock();
        state.last_id += 1;
        let id = state.last_id;
        state.newest.insert(resource.to_owned(), id);
        drop(state);
        RequestTicket {
            resource: resource.to_owned(),
            id,
        }
    }

    /// Whether `ticket` is still the newest request for its resource
    #[must_use]
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.lock()
            .newest
            .get(&ticket.resource)
            .is_some_and(|&newest| newest == ticket.id)
    }

    /// Forget every resource, making all outstanding tickets stale
    pub fn reset(&self) {
        self.lock().newest.clear();
    }
}

#[derive(Debug)]
struct LatestState<T> {
    issued: u64,
    applied: u64,
    value: Option<T>,
}

/// Holds the result of the newest request for one resource
#[derive(Debug)]
pub struct Latest<T> {
    state: Mutex<LatestState<T>>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(LatestState {
                issued: 0,
                applied: 0,
                value: None,
            }),
        }
    }
}

/// Ticket for one request into a [`Latest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestTicket(u64);

impl<T> Latest<T> {
    /// Create an empty slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LatestState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a request, superseding any in flight
    pub fn begin(&self) -> LatestTicket {
        let mut state = self.lock();
        state.issued += 1;
        LatestTicket(state.issued)
    }

    /// Apply a result if its request is still the newest; returns whether it was applied
    pub fn resolve(&self, ticket: LatestTicket, value: T) -> bool {
        let mut state = self.lock();
        if ticket.0 != state.issued {
            debug!(
                ticket = ticket.0,
                newest = state.issued,
                "Discarding stale response"
            );
            return false;
        }
        state.applied = ticket.0;
        state.value = Some(value);
        true
    }

    /// Whether a request is in flight that has not resolved yet
    #[must_use]
    pub fn is_pending(&self) -> bool {
        let state = self.lock();
        state.applied != state.issued
    }

    /// Drop the stored value and make every outstanding ticket stale
    pub fn clear(&self) {
        let mut state = self.lock();
        state.issued += 1;
        state.applied = state.issued;
        state.value = None;
    }
}

impl<T: Clone> Latest<T> {
    /// Most recently applied value
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.lock().value.clone()
    }
}
