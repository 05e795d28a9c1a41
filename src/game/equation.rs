use std::fmt;

use rand::Rng;

use crate::settings::GenerationProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '×',
            Operator::Div => '÷',
        }
    }
}

/// One proposition on the conveyor, e.g. `7 × 3 = 24`.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    pub left: i32,
    pub right: i32,
    pub operator: Operator,
    pub shown_result: i32,
    /// Whether `shown_result` really is `left operator right`.
    pub is_correct: bool,
    pub y: f32,
    pub target_y: f32,
}

impl Equation {
    pub(crate) fn blank() -> Self {
        Self {
            left: 0,
            right: 0,
            operator: Operator::Add,
            shown_result: 0,
            is_correct: true,
            y: 0.0,
            target_y: 0.0,
        }
    }

    /// Rewrites operands, operator and truth value in place. Position is left
    /// for the conveyor to set.
    pub(crate) fn regenerate<R: Rng>(&mut self, rng: &mut R, profile: &GenerationProfile, operators: &[Operator]) {
        let operator = operators[rng.gen_range(0..operators.len())];
        let lo = profile.min_operand;
        let hi = profile.max_operand;

        let (left, right, result) = match operator {
            Operator::Add => {
                let a = rng.gen_range(lo..=hi);
                let b = rng.gen_range(lo..=hi);
                (a, b, a + b)
            }
            Operator::Sub => {
                let a = rng.gen_range(lo..=hi);
                let b = rng.gen_range(lo..=hi);
                let (a, b) = if a < b { (b, a) } else { (a, b) };
                (a, b, a - b)
            }
            Operator::Mul => {
                let a = rng.gen_range(lo..=hi);
                let b = rng.gen_range(lo..=hi);
                (a, b, a * b)
            }
            Operator::Div => {
                let divisor = rng.gen_range(lo.max(1)..=hi);
                let quotient = rng.gen_range(lo..=hi);
                (divisor * quotient, divisor, quotient)
            }
        };

        let is_correct = rng.gen_bool(0.5);
        let shown_result = if is_correct {
            result
        } else {
            let offset = rng.gen_range(1..=profile.wrong_spread);
            if result - offset >= 0 && rng.gen_bool(0.5) {
                result - offset
            } else {
                result + offset
            }
        };

        self.left = left;
        self.right = right;
        self.operator = operator;
        self.shown_result = shown_result;
        self.is_correct = is_correct;
    }

    #[cfg(test)]
    pub fn true_result(&self) -> i32 {
        match self.operator {
            Operator::Add => self.left + self.right,
            Operator::Sub => self.left - self.right,
            Operator::Mul => self.left * self.right,
            Operator::Div => self.left / self.right,
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.left,
            self.operator.symbol(),
            self.right,
            self.shown_result
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::game::DifficultyLevel;

    const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    #[test]
    fn truth_flag_matches_the_arithmetic() {
        let mut rng = StdRng::seed_from_u64(7);
        let profile = GenerationProfile::for_difficulty(DifficultyLevel::Hard);
        let mut eq = Equation::blank();
        for _ in 0..2000 {
            eq.regenerate(&mut rng, &profile, &ALL);
            assert_eq!(eq.is_correct, eq.true_result() == eq.shown_result, "{eq}");
        }
    }

    #[test]
    fn division_is_exact_and_never_by_zero() {
        let mut rng = StdRng::seed_from_u64(11);
        let profile = GenerationProfile { min_operand: 0, max_operand: 6, ..GenerationProfile::default() };
        let mut eq = Equation::blank();
        for _ in 0..1000 {
            eq.regenerate(&mut rng, &profile, &[Operator::Div]);
            assert_ne!(eq.right, 0);
            assert_eq!(eq.left % eq.right, 0);
        }
    }

    #[test]
    fn subtraction_stays_non_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = GenerationProfile::for_difficulty(DifficultyLevel::Medium);
        let mut eq = Equation::blank();
        for _ in 0..1000 {
            eq.regenerate(&mut rng, &profile, &[Operator::Sub]);
            assert!(eq.true_result() >= 0);
            assert!(eq.shown_result >= 0);
        }
    }

    #[test]
    fn true_and_false_propositions_are_balanced() {
        let mut rng = StdRng::seed_from_u64(42);
        let profile = GenerationProfile::for_difficulty(DifficultyLevel::Easy);
        let mut eq = Equation::blank();
        let draws = 10_000;
        let mut correct = 0;
        for _ in 0..draws {
            eq.regenerate(&mut rng, &profile, &ALL);
            if eq.is_correct {
                correct += 1;
            }
        }
        let ratio = correct as f64 / draws as f64;
        assert!((0.45..=0.55).contains(&ratio), "ratio {ratio}");
    }
}
