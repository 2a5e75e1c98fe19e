//! Exercise performed during a workout

use super::Set;
use crate::error::{GymRatError, Result};
use serde::{Deserialize, Serialize};

/// A named movement and the sets performed for it, in the order recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Exercise {
            name: name.into(),
            sets: Vec::new(),
        }
    }

    /// Append a new set numbered `len + 1` and return it.
    ///
    /// Numbers come from the current count, not the highest number in use.
    pub fn add_set(&mut self, weight: u32, repetitions: u32, effort: f64) -> &Set {
        let number = self.sets.len() as u32 + 1;
        self.sets.push(Set {
            number,
            weight,
            repetitions,
            effort,
        });
        &self.sets[self.sets.len() - 1]
    }

    /// Remove the set at `index`; survivors keep their numbers.
    pub fn remove_set(&mut self, index: usize) -> Result<Set> {
        self.check_index(index)?;
        Ok(self.sets.remove(index))
    }

    pub fn set_mut(&mut self, index: usize) -> Result<&mut Set> {
        self.check_index(index)?;
        Ok(&mut self.sets[index])
    }

    /// Detail line shown under the exercise name
    pub fn summary(&self) -> String {
        match self.sets.len() {
            0 => "No Sets".to_string(),
            n => format!("{} Sets Done", n),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.sets.len() {
            return Err(GymRatError::IndexOutOfRange {
                kind: "set",
                index: index + 1,
                len: self.sets.len(),
            });
        }
        Ok(())
    }
}
