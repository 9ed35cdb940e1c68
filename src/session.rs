//! Session: the submitted search (if any) and the current selection.
//!
//! `Session` is an immutable value; every transition returns a new one and
//! [`SessionHandle`] swaps it in atomically.

use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::analyze::RankingMode;
use crate::params::SearchParameters;
use crate::selection::{SelectionError, SelectionEvent, SelectionState};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub params: Option<SearchParameters>,
    pub selection: SelectionState,
}

impl Session {
    pub fn mode(&self) -> RankingMode {
        if self.params.is_some() {
            RankingMode::Computed
        } else {
            RankingMode::Uninitialized
        }
    }

    pub fn is_computed(&self) -> bool {
        self.params.is_some()
    }

    /// New search; the selection carries over.
    pub fn submit(&self, params: SearchParameters) -> Self {
        Self {
            params: Some(params),
            selection: self.selection.clone(),
        }
    }

    /// Back to uninitialized; comparisons without scores are meaningless.
    pub fn reset(&self) -> Self {
        Self::default()
    }

    pub fn select(&self, event: &SelectionEvent) -> Result<Self, SelectionError> {
        Ok(Self {
            params: self.params,
            selection: self.selection.apply(event, self.is_computed())?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Session {
        match self.inner.read() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply a transition under the write lock; on error the session is unchanged.
    pub fn update<E>(&self, f: impl FnOnce(&Session) -> Result<Session, E>) -> Result<Session, E> {
        let mut g = self.inner.write().unwrap_or_else(|p| p.into_inner());
        let next = f(&*g)?;
        *g = next.clone();
        Ok(next)
    }

    /// Infallible transition under the write lock.
    pub fn replace_with(&self, f: impl FnOnce(&Session) -> Session) -> Session {
        let mut g = self.inner.write().unwrap_or_else(|p| p.into_inner());
        let next = f(&*g);
        *g = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_needs_submitted_search() {
        let s = Session::default();
        assert_eq!(s.mode(), RankingMode::Uninitialized);
        assert!(s.select(&SelectionEvent::Toggle("KAVA".into())).is_err());

        let s = s.submit(SearchParameters::default());
        assert_eq!(s.mode(), RankingMode::Computed);
        let s = s.select(&SelectionEvent::Toggle("KAVA".into())).unwrap();
        assert_eq!(s.selection.active(), ["KAVA"]);

        let s = s.reset();
        assert!(s.selection.active().is_empty());
    }

    #[test]
    fn replace_with_swaps_in_the_new_session() {
        let h = SessionHandle::new();
        let out = h.replace_with(|s| s.submit(SearchParameters::default()));
        assert!(out.is_computed());
        assert_eq!(h.get(), out);
        h.replace_with(Session::reset);
        assert_eq!(h.get(), Session::default());
    }

    #[test]
    fn failed_update_leaves_session_unchanged() {
        let h = SessionHandle::new();
        let r = h.update(|s| s.select(&SelectionEvent::Toggle("A".into())));
        assert!(r.is_err());
        assert_eq!(h.get(), Session::default());
    }
}
