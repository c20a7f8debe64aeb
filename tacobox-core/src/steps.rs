//! Guided step sequence and the bounds-checked cursor over it.
use serde::{Deserialize, Serialize};

use crate::error::MenuError;
use crate::numbers::usize_to_u32;

/// One stage of the guided flow, bound to a single catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub ordinal: u32,
    pub title: String,
    pub subtitle: String,
    pub category: String,
}

/// Non-empty, ordered list of steps with consecutive ordinals starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// # Errors
    ///
    /// Returns an error when the list is empty or ordinals are not `1..=n`.
    pub fn new(steps: Vec<Step>) -> Result<Self, MenuError> {
        if steps.is_empty() {
            return Err(MenuError::NoSteps);
        }
        for (position, step) in steps.iter().enumerate() {
            let expected = usize_to_u32(position).saturating_add(1);
            if step.ordinal != expected {
                return Err(MenuError::StepOrdinal {
                    position,
                    expected,
                    found: step.ordinal,
                });
            }
        }
        Ok(Self { steps })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a constructed sequence; kept for API symmetry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    const fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// How a step renders in the stepper relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// Index of the active step. Every mutation is bounds-checked against the sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCursor {
    index: usize,
}

impl StepCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Jump to `index`. Returns false and leaves the cursor unchanged when out of range.
    pub fn go_to(&mut self, steps: &StepSequence, index: usize) -> bool {
        if index >= steps.len() {
            return false;
        }
        self.index = index;
        true
    }

    pub fn next(&mut self, steps: &StepSequence) -> bool {
        if !self.can_go_forward(steps) {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    #[must_use]
    pub const fn can_go_back(self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub const fn can_go_forward(self, steps: &StepSequence) -> bool {
        self.index < steps.last_index()
    }

    /// The step under the cursor. Falls back to the last step if the cursor
    /// was built against a longer sequence.
    #[must_use]
    pub fn current_step(self, steps: &StepSequence) -> &Step {
        let index = self.index.min(steps.last_index());
        &steps.steps[index]
    }

    #[must_use]
    pub fn current_category(self, steps: &StepSequence) -> &str {
        &self.current_step(steps).category
    }

    #[must_use]
    pub const fn status_of(self, index: usize) -> StepStatus {
        if index < self.index {
            StepStatus::Completed
        } else if index == self.index {
            StepStatus::Current
        } else {
            StepStatus::Upcoming
        }
    }
}
