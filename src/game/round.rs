use super::conveyor::ConveyorQueue;
use super::life_bar::LifeBar;
use super::outcome::{RoundOutcome, RoundOutcomeEvaluator};
use super::pool::EquationPool;
use super::score::{ScoreState, Verdict};
use super::{ConfigKey, Cue, RoundContext, RoundScene, Tap};
use crate::error::GameError;
use crate::settings::Settings;

/// Tick counter value on which the start cue plays.
const START_CUE_TICK: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Playing,
    Ended,
    Aborted,
}

/// One play session: owns the conveyor, its pool, the life bar and the score.
pub struct GameRound {
    key: ConfigKey,
    pool: EquationPool,
    conveyor: ConveyorQueue,
    life_bar: LifeBar,
    score: ScoreState,
    evaluator: RoundOutcomeEvaluator,
    phase: RoundPhase,
    tick_counter: u32,
    text_move_time: f32,
    last_verdict: Option<Verdict>,
}

impl GameRound {
    pub fn new(key: ConfigKey, settings: &Settings) -> Result<Self, GameError> {
        let pool = EquationPool::new(key, settings.profile(key.difficulty).clone())?;
        Self::with_pool(pool, settings)
    }

    pub fn with_pool(mut pool: EquationPool, settings: &Settings) -> Result<Self, GameError> {
        settings.validate_layout()?;

        let key = pool.key();
        pool.preallocate(settings.initial_pool_size);
        let mut conveyor = ConveyorQueue::new();
        conveyor.initial_fill(&mut pool, settings.conveyor_capacity);

        let profile = settings.profile(key.difficulty);
        log::info!(
            "round started: {} with {} slots, {:.0}s on the clock",
            key,
            settings.conveyor_capacity,
            settings.life_bar_length / profile.life_bar_speed
        );

        Ok(Self {
            key,
            pool,
            conveyor,
            life_bar: LifeBar::new(settings.life_bar_length, profile.life_bar_speed),
            score: ScoreState::new(),
            evaluator: RoundOutcomeEvaluator::new(settings.minimum_score_to_unlock),
            phase: RoundPhase::Playing,
            tick_counter: 0,
            text_move_time: settings.text_move_time,
            last_verdict: None,
        })
    }

    fn finish(&mut self, ctx: &mut RoundContext) {
        let report = self.evaluator.evaluate(self.key, &self.score, &mut *ctx.ledger);
        self.phase = RoundPhase::Ended;
        log::info!(
            "round over: {} {:?} with score {} ({} good, {} wrong)",
            self.key,
            report.outcome,
            report.score,
            report.good,
            report.wrong
        );
        let cue = match report.outcome {
            RoundOutcome::Win => Cue::Win,
            RoundOutcome::HalfWin => Cue::HalfWin,
            RoundOutcome::Lose => Cue::Lose,
        };
        ctx.host.play_cue(cue);
        ctx.host.on_round_ended(report);
    }

    pub fn key(&self) -> ConfigKey {
        self.key
    }

    pub fn conveyor(&self) -> &ConveyorQueue {
        &self.conveyor
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn life_bar(&self) -> &LifeBar {
        &self.life_bar
    }

    #[cfg(test)]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    #[cfg(test)]
    pub fn pool(&self) -> &EquationPool {
        &self.pool
    }
}

impl RoundScene for GameRound {
    fn tick(&mut self, dt: f32, ctx: &mut RoundContext) {
        if self.phase == RoundPhase::Aborted {
            return;
        }

        self.tick_counter = self.tick_counter.saturating_add(1);
        if self.tick_counter == START_CUE_TICK {
            log::debug!("start cue for {}", self.key);
            ctx.host.play_cue(Cue::Start);
        }

        self.conveyor.animate(dt, self.text_move_time);

        if self.phase != RoundPhase::Playing {
            return;
        }
        self.life_bar.advance(dt);
        if self.life_bar.is_end() {
            self.finish(ctx);
        }
    }

    fn on_tap(&mut self, tap: Tap, _ctx: &mut RoundContext) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        let Some(bottom) = self.conveyor.bottom() else {
            return;
        };

        let verdict = if (tap == Tap::Correct) == bottom.is_correct {
            Verdict::Good
        } else {
            Verdict::Wrong
        };
        self.score.record(verdict);
        self.last_verdict = Some(verdict);

        let removed = self.conveyor.shift(&mut self.pool);
        self.pool.release(removed);
    }

    fn on_back_requested(&mut self, ctx: &mut RoundContext) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        // Abandoned rounds never reach the ledger.
        self.conveyor.drain().for_each(drop);
        self.pool.clear();
        self.phase = RoundPhase::Aborted;
        log::info!("round aborted: {} at score {}", self.key, self.score.score());
        ctx.host.on_abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::game::{DifficultyLevel, HostSignal, MathParameter, RoundReport, SignalQueue};
    use crate::scores::{HighScoreLedger, HighScoreRecord, MemoryLedger};

    const KEY: ConfigKey = ConfigKey {
        difficulty: DifficultyLevel::Easy,
        parameter: MathParameter::Mixed,
    };

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.life_bar_length = 10.0;
        settings.profiles.easy.life_bar_speed = 1.0;
        settings
    }

    fn round() -> GameRound {
        let settings = settings();
        let pool = EquationPool::with_rng(KEY, settings.profile(KEY.difficulty).clone(), StdRng::seed_from_u64(9))
            .unwrap();
        GameRound::with_pool(pool, &settings).unwrap()
    }

    struct Harness {
        ledger: MemoryLedger,
        host: SignalQueue,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                ledger: MemoryLedger::new(),
                host: SignalQueue::new(),
            }
        }

        fn tick(&mut self, round: &mut GameRound, dt: f32) {
            round.tick(dt, &mut RoundContext { ledger: &mut self.ledger, host: &mut self.host });
        }

        fn tap(&mut self, round: &mut GameRound, tap: Tap) {
            round.on_tap(tap, &mut RoundContext { ledger: &mut self.ledger, host: &mut self.host });
        }

        fn back(&mut self, round: &mut GameRound) {
            round.on_back_requested(&mut RoundContext { ledger: &mut self.ledger, host: &mut self.host });
        }

        fn ended_reports(&self) -> Vec<RoundReport> {
            self.host
                .as_slice()
                .iter()
                .filter_map(|s| match s {
                    HostSignal::RoundEnded(report) => Some(*report),
                    _ => None,
                })
                .collect()
        }

        fn start_cues(&self) -> usize {
            self.host
                .as_slice()
                .iter()
                .filter(|s| **s == HostSignal::Cue(Cue::Start))
                .count()
        }
    }

    fn right_answer(round: &GameRound) -> Tap {
        if round.conveyor().bottom().unwrap().is_correct {
            Tap::Correct
        } else {
            Tap::Incorrect
        }
    }

    fn wrong_answer(round: &GameRound) -> Tap {
        match right_answer(round) {
            Tap::Correct => Tap::Incorrect,
            Tap::Incorrect => Tap::Correct,
        }
    }

    #[test]
    fn round_starts_with_a_full_conveyor() {
        let round = round();
        assert_eq!(round.conveyor().len(), 4);
        assert!(round.is_playing());
        assert_eq!(round.pool().allocations(), 10);
    }

    #[test]
    fn taps_are_judged_against_the_bottom_equation() {
        let mut round = round();
        let mut h = Harness::new();

        let tap = right_answer(&round);
        h.tap(&mut round, tap);
        assert_eq!(round.last_verdict(), Some(Verdict::Good));

        let tap = wrong_answer(&round);
        h.tap(&mut round, tap);
        assert_eq!(round.last_verdict(), Some(Verdict::Wrong));

        assert_eq!((round.score().good(), round.score().wrong()), (1, 1));
        assert_eq!(round.score().score(), 0);
        assert_eq!(round.conveyor().len(), 4);
    }

    #[test]
    fn tapping_recycles_instead_of_allocating() {
        let mut round = round();
        let mut h = Harness::new();
        for _ in 0..200 {
            h.tap(&mut round, Tap::Correct);
            assert_eq!(round.conveyor().len(), round.conveyor().capacity());
        }
        assert_eq!(round.pool().allocations(), 10);
    }

    #[test]
    fn start_cue_fires_once_on_the_second_tick() {
        let mut round = round();
        let mut h = Harness::new();
        h.tick(&mut round, 0.01);
        assert_eq!(h.start_cues(), 0);
        h.tick(&mut round, 0.01);
        assert_eq!(h.start_cues(), 1);
        for _ in 0..20 {
            h.tick(&mut round, 0.01);
        }
        assert_eq!(h.start_cues(), 1);
    }

    #[test]
    fn round_ends_exactly_once() {
        let mut round = round();
        let mut h = Harness::new();
        for _ in 0..12 {
            let tap = right_answer(&round);
            h.tap(&mut round, tap);
        }
        for _ in 0..9 {
            h.tick(&mut round, 1.0);
        }
        assert!(h.ended_reports().is_empty());

        for _ in 0..5 {
            h.tick(&mut round, 1.0);
        }
        let reports = h.ended_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, RoundOutcome::Win);
        assert_eq!(reports[0].score, 12);
        assert_eq!(h.ledger.record_for(KEY).unwrap(), HighScoreRecord { best: 12, unlocked: true });
        assert_eq!(round.phase(), RoundPhase::Ended);
    }

    #[test]
    fn taps_after_the_end_are_ignored() {
        let mut round = round();
        let mut h = Harness::new();
        h.tick(&mut round, 20.0);
        assert!(!round.is_playing());

        h.tap(&mut round, Tap::Correct);
        h.tap(&mut round, Tap::Incorrect);
        assert_eq!(*round.score(), ScoreState::new());
    }

    #[test]
    fn abort_clears_the_round_without_saving() {
        let mut round = round();
        let mut h = Harness::new();
        for _ in 0..8 {
            let tap = right_answer(&round);
            h.tap(&mut round, tap);
        }
        h.back(&mut round);
        assert_eq!(round.phase(), RoundPhase::Aborted);
        assert_eq!(round.conveyor().len(), 0);
        assert_eq!(round.pool().free_len(), 0);
        assert_eq!(h.host.as_slice(), &[HostSignal::Aborted]);

        h.tick(&mut round, 20.0);
        assert!(h.ended_reports().is_empty());
        assert_eq!(h.ledger.record_for(KEY).unwrap(), HighScoreRecord::default());
    }

    #[test]
    fn bad_capacity_is_rejected() {
        let mut settings = settings();
        settings.conveyor_capacity = 0;
        assert!(matches!(GameRound::new(KEY, &settings), Err(GameError::InvalidSettings(_))));
    }
}
