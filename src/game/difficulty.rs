use std::fmt;

use super::equation::Operator;

pub const NUM_DIFFICULTIES: usize = 3;
pub const NUM_PARAMETERS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub fn all() -> &'static [DifficultyLevel] {
        &[DifficultyLevel::Easy, DifficultyLevel::Medium, DifficultyLevel::Hard]
    }

    pub fn title(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            DifficultyLevel::Easy => 0,
            DifficultyLevel::Medium => 1,
            DifficultyLevel::Hard => 2,
        }
    }

    /// The tier a win on this difficulty unlocks, if any.
    #[cfg(test)]
    pub fn next(&self) -> Option<DifficultyLevel> {
        match self {
            DifficultyLevel::Easy => Some(DifficultyLevel::Medium),
            DifficultyLevel::Medium => Some(DifficultyLevel::Hard),
            DifficultyLevel::Hard => None,
        }
    }

    pub fn previous(&self) -> Option<DifficultyLevel> {
        match self {
            DifficultyLevel::Easy => None,
            DifficultyLevel::Medium => Some(DifficultyLevel::Easy),
            DifficultyLevel::Hard => Some(DifficultyLevel::Medium),
        }
    }
}

/// Which operators a round may draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MathParameter {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Mixed,
}

impl MathParameter {
    pub fn all() -> &'static [MathParameter] {
        &[
            MathParameter::Addition,
            MathParameter::Subtraction,
            MathParameter::Multiplication,
            MathParameter::Division,
            MathParameter::Mixed,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            MathParameter::Addition => "Addition",
            MathParameter::Subtraction => "Subtraction",
            MathParameter::Multiplication => "Multiplication",
            MathParameter::Division => "Division",
            MathParameter::Mixed => "Mixed",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            MathParameter::Addition => 0,
            MathParameter::Subtraction => 1,
            MathParameter::Multiplication => 2,
            MathParameter::Division => 3,
            MathParameter::Mixed => 4,
        }
    }

    pub fn operators(&self) -> &'static [Operator] {
        match self {
            MathParameter::Addition => &[Operator::Add],
            MathParameter::Subtraction => &[Operator::Sub],
            MathParameter::Multiplication => &[Operator::Mul],
            MathParameter::Division => &[Operator::Div],
            MathParameter::Mixed => &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div],
        }
    }
}

/// Identifies a generation profile and a high-score bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    pub difficulty: DifficultyLevel,
    pub parameter: MathParameter,
}

impl ConfigKey {
    pub fn new(difficulty: DifficultyLevel, parameter: MathParameter) -> Self {
        Self { difficulty, parameter }
    }

    pub fn all() -> impl Iterator<Item = ConfigKey> {
        DifficultyLevel::all().iter().flat_map(|&difficulty| {
            MathParameter::all()
                .iter()
                .map(move |&parameter| ConfigKey::new(difficulty, parameter))
        })
    }

    /// Position in the persisted table, difficulty-major.
    pub fn slot(&self) -> usize {
        self.difficulty.index() * NUM_PARAMETERS + self.parameter.index()
    }

    #[cfg(test)]
    pub fn next_tier(&self) -> Option<ConfigKey> {
        self.difficulty.next().map(|d| ConfigKey::new(d, self.parameter))
    }

    pub fn previous_tier(&self) -> Option<ConfigKey> {
        self.difficulty.previous().map(|d| ConfigKey::new(d, self.parameter))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.difficulty.title(), self.parameter.title())
    }
}
