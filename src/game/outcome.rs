use super::score::ScoreState;
use super::ConfigKey;
use crate::scores::HighScoreLedger;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// New best score for the key.
    Win,
    /// At or above the unlock threshold but not a new best.
    HalfWin,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundReport {
    pub key: ConfigKey,
    pub outcome: RoundOutcome,
    pub score: i32,
    pub good: u32,
    pub wrong: u32,
    /// The ledger failed during evaluation, so the outcome may understate a record.
    pub ledger_degraded: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EvaluatorState {
    Playing,
    Ended,
}

pub struct RoundOutcomeEvaluator {
    state: EvaluatorState,
    minimum_score_to_unlock: i32,
}

impl RoundOutcomeEvaluator {
    pub fn new(minimum_score_to_unlock: i32) -> Self {
        Self {
            state: EvaluatorState::Playing,
            minimum_score_to_unlock,
        }
    }

    /// Classifies the final score and records a new best. Must be called at
    /// most once per round.
    pub fn evaluate(&mut self, key: ConfigKey, state: &ScoreState, ledger: &mut dyn HighScoreLedger) -> RoundReport {
        assert_eq!(self.state, EvaluatorState::Playing, "round outcome evaluated twice");
        self.state = EvaluatorState::Ended;

        let score = state.score();
        let mut ledger_degraded = false;

        let is_high_score = ledger.is_high_score(key, score).unwrap_or_else(|e| {
            log::warn!("high score lookup for {key} failed: {e}");
            ledger_degraded = true;
            false
        });

        let outcome = if is_high_score {
            if let Err(e) = ledger.update_record_for(key, score) {
                log::warn!("could not save record {score} for {key}: {e}");
                ledger_degraded = true;
            }
            if score > self.minimum_score_to_unlock {
                if let Err(e) = ledger.unlock_level_up_for(key) {
                    log::warn!("could not unlock the tier after {key}: {e}");
                    ledger_degraded = true;
                }
            }
            RoundOutcome::Win
        } else if score >= self.minimum_score_to_unlock {
            RoundOutcome::HalfWin
        } else {
            RoundOutcome::Lose
        };

        RoundReport {
            key,
            outcome,
            score,
            good: state.good(),
            wrong: state.wrong(),
            ledger_degraded,
        }
    }
}
