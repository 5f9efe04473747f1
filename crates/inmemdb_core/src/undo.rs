//! Undo frames for nested transaction blocks.
//!
//! Each open transaction block owns one [`UndoFrame`]. The first time a
//! variable is modified inside a block, the frame records the variable's
//! state as it was before that modification (its *prior state*). Later
//! modifications in the same block leave the record alone, so a frame
//! holds at most one entry per variable and rolling it back costs time
//! proportional to the number of distinct variables the block touched.

use std::collections::HashMap;

/// State of a variable before the first modification in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorState {
    /// The variable held this value.
    Set(String),
    /// The variable was absent.
    Unset,
}

impl PriorState {
    /// Builds a prior state from the currently visible value.
    #[must_use]
    pub fn from_current(current: Option<&str>) -> Self {
        match current {
            Some(value) => Self::Set(value.to_owned()),
            None => Self::Unset,
        }
    }

    /// Returns the captured value, if the variable was set.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }
}

/// Prior states captured by one transaction block.
#[derive(Debug, Clone, Default)]
pub struct UndoFrame {
    /// Variable name -> state before the block first touched it.
    prior_states: HashMap<String, PriorState>,
}

impl UndoFrame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the prior state of `name` unless one is already recorded.
    ///
    /// Returns true if a new entry was recorded.
    pub fn capture_if_absent(&mut self, name: &str, current: Option<&str>) -> bool {
        if self.prior_states.contains_key(name) {
            return false;
        }
        self.prior_states
            .insert(name.to_owned(), PriorState::from_current(current));
        true
    }

    /// Returns the recorded prior state of `name`.
    #[must_use]
    pub fn prior_state(&self, name: &str) -> Option<&PriorState> {
        self.prior_states.get(name)
    }

    /// Returns true if `name` has a recorded prior state.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.prior_states.contains_key(name)
    }

    /// Returns the number of variables captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prior_states.len()
    }

    /// Returns true if nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prior_states.is_empty()
    }

    /// Consumes the frame, yielding every captured `(name, prior state)`.
    ///
    /// Iteration order is unspecified; prior states of different variables
    /// are independent of each other.
    pub fn into_entries(self) -> impl Iterator<Item = (String, PriorState)> {
        self.prior_states.into_iter()
    }
}

/// Last-in-first-out stack of undo frames, innermost block on top.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    frames: Vec<UndoFrame>,
}

impl UndoStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new block.
    pub fn push(&mut self) {
        self.frames.push(UndoFrame::new());
    }

    /// Removes and returns the innermost frame.
    pub fn pop(&mut self) -> Option<UndoFrame> {
        self.frames.pop()
    }

    /// Returns the innermost frame, if any block is open.
    pub fn top_mut(&mut self) -> Option<&mut UndoFrame> {
        self.frames.last_mut()
    }

    /// Returns the innermost frame, if any block is open.
    #[must_use]
    pub fn top(&self) -> Option<&UndoFrame> {
        self.frames.last()
    }

    /// Discards every frame without replaying it.
    ///
    /// Returns the number of frames discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.frames.len();
        self.frames.clear();
        discarded
    }

    /// Returns the number of open blocks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no block is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
