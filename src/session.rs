// file: src/session.rs
// description: question/answer session state for interactive use
// reference: explicit state enum driven by user submissions

use crate::error::{MatcherError, Result};
use crate::matcher::Matcher;
use crate::models::{Catalog, RowMatch};
use crate::utils::Validator;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Searching {
        query: String,
    },
    Done {
        query: String,
        outcome: Option<RowMatch>,
    },
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Searching { .. } => "searching",
            Self::Done { .. } => "done",
        }
    }
}

/// One user's ask/answer cycle over a loaded catalog.
///
/// `Idle -> Searching` on a non-blank submission, `Searching -> Done` once
/// the matcher finishes, and back to `Searching` or `Idle` from `Done`.
pub struct Session<'a> {
    matcher: &'a Matcher,
    catalog: &'a Catalog,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(matcher: &'a Matcher, catalog: &'a Catalog) -> Self {
        Self {
            matcher,
            catalog,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Starts a search. A blank query leaves the session where it was.
    pub fn submit(&mut self, query: &str) -> Result<bool> {
        if let SessionState::Searching { query: pending } = &self.state {
            return Err(MatcherError::Session(format!(
                "search for \"{}\" still in progress",
                pending
            )));
        }

        if Validator::is_blank_query(query) {
            debug!("Ignoring blank submission");
            return Ok(false);
        }

        self.transition(SessionState::Searching {
            query: query.trim().to_string(),
        });
        Ok(true)
    }

    /// Runs the pending search and moves to `Done`.
    pub fn complete(&mut self) -> Result<Option<&RowMatch>> {
        let SessionState::Searching { query } = &self.state else {
            return Err(MatcherError::Session(format!(
                "cannot complete a search from state {}",
                self.state.label()
            )));
        };

        let query = query.clone();
        let outcome = self.matcher.best_match(self.catalog, &query);
        self.transition(SessionState::Done { query, outcome });

        match &self.state {
            SessionState::Done { outcome, .. } => Ok(outcome.as_ref()),
            _ => Ok(None),
        }
    }

    /// Submits and completes in one step; `None` outer means a blank query.
    pub fn ask(&mut self, query: &str) -> Result<Option<Option<&RowMatch>>> {
        if !self.submit(query)? {
            return Ok(None);
        }
        self.complete().map(Some)
    }

    pub fn reset(&mut self) {
        self.transition(SessionState::Idle);
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session {} -> {}", self.state.label(), next.label());
        self.state = next;
    }
}
