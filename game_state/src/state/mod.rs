//! The state bag - the central mapping every instruction reads and writes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::value::Value;

/// Key the `GOTO` instruction writes and the orchestration layer reads to
/// find the next narrative node.
pub const QUESTION_KEY: &str = "question";

/// The complete scripting state of one game session.
///
/// Owned by the orchestration layer and handed to the state machine by
/// mutable reference for the duration of one instruction-string execution.
/// Values are flat scalars; there is no nesting. The whole bag derives
/// `serde` so the caller can embed it in its save data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameState {
    values: HashMap<String, Value>,
}

impl GameState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Write a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Look up a key, ignoring falsy values.
    ///
    /// The instruction language treats `0`, the empty string and `false`
    /// like absent keys when resolving expression operands.
    pub fn get_truthy(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|value| value.is_truthy())
    }

    /// The current narrative node, if any instruction has set one.
    pub fn question(&self) -> Option<&Value> {
        self.get(QUESTION_KEY)
    }

    /// Number of keys in the bag.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no key has been written yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all key/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}
