#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Good,
    Wrong,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreState {
    good: u32,
    wrong: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Good => self.good += 1,
            Verdict::Wrong => self.wrong += 1,
        }
    }

    pub fn good(&self) -> u32 {
        self.good
    }

    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    /// Good clicks minus wrong clicks. Can go negative.
    pub fn score(&self) -> i32 {
        self.good as i32 - self.wrong as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tracks_counters_at_every_step() {
        let mut state = ScoreState::new();
        let taps = [Verdict::Good, Verdict::Wrong, Verdict::Wrong, Verdict::Good, Verdict::Wrong, Verdict::Wrong];
        for verdict in taps {
            state.record(verdict);
            assert_eq!(state.score(), state.good() as i32 - state.wrong() as i32);
        }
        assert_eq!((state.good(), state.wrong()), (2, 4));
        assert_eq!(state.score(), -2);
    }
}
