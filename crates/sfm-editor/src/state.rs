//! Modal lifecycle shared by the three editors.
//!
//! Every editor moves through `Closed -> Loading -> Ready`, passes through
//! `Mutating` while a write is in flight and lands in `Failed` when a
//! backend call goes wrong. Reopening the modal is the retry.
//!
//! Fetches are split into a `begin` half that hands out a [`FetchTicket`]
//! and a `complete` half that applies the response. A response is applied
//! only if its ticket is the last one issued for the editor's current
//! session; anything else answers a question nobody is asking anymore.

use crate::error::{EditorError, Result};
use sfm_domain::{FieldKey, ModalSession};
use std::fmt;

/// Where an editor is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    /// No modal for this editor
    #[default]
    Closed,
    /// Waiting for the initial fetch
    Loading,
    /// Showing data, accepting edits
    Ready,
    /// A state-changing request is in flight
    Mutating,
    /// The last backend call failed; the reason is shown in the modal
    Failed(String),
}

impl ModalState {
    /// Whether the editor is showing anything
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalState::Closed => f.write_str("closed"),
            ModalState::Loading => f.write_str("loading"),
            ModalState::Ready => f.write_str("ready"),
            ModalState::Mutating => f.write_str("mutating"),
            ModalState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Identifies one fetch issued by an editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Modal opening the fetch was issued for
    pub generation: u64,
    /// Field being fetched
    pub field_key: FieldKey,
    /// Language scope of the fetch
    pub language: Option<String>,
    sequence: u64,
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was written to the store and rendered
    Applied,
    /// The response belonged to a superseded request and was dropped
    Stale,
}

/// Session and state bookkeeping embedded in each editor
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    session: Option<ModalSession>,
    state: ModalState,
    sequence: u64,
    pending: Option<FetchTicket>,
}

impl Lifecycle {
    /// Attach a new session and issue the ticket for its first fetch
    pub fn attach(&mut self, session: ModalSession) -> FetchTicket {
        let ticket = self.next_ticket(&session);
        self.session = Some(session);
        ticket
    }

    /// Issue a ticket for the current session, superseding any pending one
    pub fn issue(&mut self) -> Result<FetchTicket> {
        let session = self.require()?.clone();
        Ok(self.next_ticket(&session))
    }

    fn next_ticket(&mut self, session: &ModalSession) -> FetchTicket {
        self.sequence += 1;
        let ticket = FetchTicket {
            generation: session.generation,
            field_key: session.field_key.clone(),
            language: session.language.clone(),
            sequence: self.sequence,
        };
        self.pending = Some(ticket.clone());
        self.state = ModalState::Loading;
        ticket
    }

    /// Take the ticket if it is the pending one for the current session
    pub fn accept(&mut self, ticket: &FetchTicket) -> bool {
        if self.pending.as_ref() == Some(ticket) {
            self.pending = None;
            true
        } else {
            tracing::debug!(
                "Dropping stale response for {} (generation {})",
                ticket.field_key,
                ticket.generation
            );
            false
        }
    }

    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut ModalSession> {
        self.session.as_mut()
    }

    pub fn require(&self) -> Result<&ModalSession> {
        self.session.as_ref().ok_or(EditorError::NoSession)
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn set_state(&mut self, state: ModalState) {
        self.state = state;
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.state = ModalState::Failed(reason.into());
    }

    pub fn close(&mut self) {
        self.session = None;
        self.pending = None;
        self.state = ModalState::Closed;
    }
}
