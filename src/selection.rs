//! # Selection State
//! Up to four networks picked for side-by-side comparison, plus the one
//! "primary" network that drives the single-network panels.
//!
//! All changes go through [`SelectionState::apply`] with a typed
//! [`SelectionEvent`]; the state is a plain value, never mutated in place by
//! view code.
//!
//! - Toggle adds or removes; a fifth entry evicts the oldest (index 0).
//! - Hover overrides the primary while active, then falls back to the
//!   last toggled network.
//! - Toggling before a search has been computed is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::{display_name, same_network};

pub const MAX_ACTIVE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum SelectionEvent {
    Toggle(String),
    HoverStart(String),
    HoverEnd,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("run a search with your capital and weights before comparing networks")]
    NotComputed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    active: Vec<String>,
    last_toggled: Option<String>,
    hovered: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active names, oldest first.
    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Hovered network if any, else the last toggled one.
    pub fn primary(&self) -> Option<&str> {
        self.hovered.as_deref().or(self.last_toggled.as_deref())
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|n| same_network(n, name))
    }

    /// Add or remove `name`. `computed` tells whether a weighted search has run.
    pub fn toggle(&self, name: &str, computed: bool) -> Result<Self, SelectionError> {
        if !computed {
            return Err(SelectionError::NotComputed);
        }
        let name = display_name(name);
        let mut next = self.clone();

        if let Some(idx) = next.active.iter().position(|n| same_network(n, &name)) {
            next.active.remove(idx);
            // Primary falls back to the most recent entry still active.
            if next.last_toggled.as_deref().is_some_and(|l| same_network(l, &name)) {
                next.last_toggled = next.active.last().cloned();
            }
        } else {
            if next.active.len() >= MAX_ACTIVE {
                next.active.remove(0);
            }
            next.active.push(name.clone());
            next.last_toggled = Some(name);
        }
        Ok(next)
    }

    pub fn hover_start(&self, name: &str) -> Self {
        Self {
            hovered: Some(display_name(name)),
            ..self.clone()
        }
    }

    pub fn hover_end(&self) -> Self {
        Self {
            hovered: None,
            ..self.clone()
        }
    }

    /// Single entry point for UI events.
    pub fn apply(&self, event: &SelectionEvent, computed: bool) -> Result<Self, SelectionError> {
        match event {
            SelectionEvent::Toggle(n) => self.toggle(n, computed),
            SelectionEvent::HoverStart(n) => Ok(self.hover_start(n)),
            SelectionEvent::HoverEnd => Ok(self.hover_end()),
            SelectionEvent::Clear => Ok(Self::new()),
        }
    }

    /// Keep only entries whose network is still loaded.
    pub fn retain_known<'a, I>(&self, known: I) -> Self
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let keep = |n: &String| known.clone().into_iter().any(|k| same_network(k, n));
        let active: Vec<String> = self.active.iter().filter(|n| keep(*n)).cloned().collect();
        let last_toggled = match &self.last_toggled {
            Some(l) if keep(l) => Some(l.clone()),
            _ => active.last().cloned(),
        };
        Self {
            active,
            last_toggled,
            hovered: self.hovered.clone().filter(|h| keep(h)),
        }
    }
}
