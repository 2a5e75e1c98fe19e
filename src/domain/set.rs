//! A single recorded set of an exercise

use serde::{Deserialize, Serialize};

/// One block of repetitions within an exercise.
///
/// `number` is fixed at creation and survives deletion of sibling sets,
/// so a list of sets may read 1, 2, 4 after set 3 is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub number: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default)]
    pub effort: f64,
}

impl Set {
    /// Create an empty set with the given number
    pub fn new(number: u32) -> Self {
        Set {
            number,
            weight: 0,
            repetitions: 0,
            effort: 0.0,
        }
    }

    /// Heading shown for the set, e.g. "Set 3"
    pub fn title(&self) -> String {
        format!("Set {}", self.number)
    }
}
