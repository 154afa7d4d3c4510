//! Fault definitions and their graded corrective actions.

use std::collections::BTreeMap;

use crate::Range;

/// Every malfunction offers exactly this many candidate fixes.
pub const SOLUTIONS_PER_MALFUNCTION: usize = 4;

/// Quality band of a corrective action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    Optimal,
    Acceptable,
    Minimal,
    Wrong,
}

impl Grade {
    /// Feedback shown to the player after picking a solution of this grade.
    pub fn feedback(self) -> &'static str {
        match self {
            Grade::Optimal => "Correct!",
            Grade::Acceptable => "Good, but it could be better",
            Grade::Minimal => "Bare minimum fix",
            Grade::Wrong => "Wrong! That would cause an accident",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub description: String,
    pub score: u32,
    pub grade: Grade,
    pub feedback: String,
}

impl Solution {
    pub fn new(description: impl Into<String>, score: u32, grade: Grade) -> Self {
        Self {
            description: description.into(),
            score,
            grade,
            feedback: grade.feedback().to_string(),
        }
    }

    pub fn optimal(description: impl Into<String>) -> Self {
        Self::new(description, 100, Grade::Optimal)
    }

    pub fn acceptable(description: impl Into<String>, score: u32) -> Self {
        Self::new(description, score, Grade::Acceptable)
    }

    pub fn minimal(description: impl Into<String>, score: u32) -> Self {
        Self::new(description, score, Grade::Minimal)
    }

    pub fn wrong(description: impl Into<String>) -> Self {
        Self::new(description, 0, Grade::Wrong)
    }
}

/// A named fault. `conditions` maps a parameter name to the abnormal range
/// the parameter is pushed into while the fault is active.
#[derive(Debug, Clone, PartialEq)]
pub struct Malfunction {
    pub name: String,
    pub description: String,
    pub conditions: BTreeMap<String, Range>,
    pub solutions: [Solution; SOLUTIONS_PER_MALFUNCTION],
}

impl Malfunction {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        conditions: impl IntoIterator<Item = (&'static str, (f64, f64))>,
        solutions: [Solution; SOLUTIONS_PER_MALFUNCTION],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            conditions: conditions
                .into_iter()
                .map(|(param, range)| (param.to_string(), Range::from(range)))
                .collect(),
            solutions,
        }
    }

    /// The 100-point answer, if the catalog entry has one.
    pub fn optimal(&self) -> Option<&Solution> {
        self.solutions.iter().find(|s| s.grade == Grade::Optimal)
    }
}
