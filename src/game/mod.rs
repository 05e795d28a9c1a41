pub mod conveyor;
pub mod difficulty;
pub mod equation;
pub mod life_bar;
pub mod outcome;
pub mod pool;
pub mod round;
pub mod score;

pub use difficulty::{ConfigKey, DifficultyLevel, MathParameter};
pub use outcome::{RoundOutcome, RoundReport};
pub use round::GameRound;

use crate::scores::HighScoreLedger;

/// Which answer button the player hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tap {
    Correct,
    Incorrect,
}

/// Sounds the host may play. There is no audio backend in the terminal,
/// so the app shows these as status flashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Start,
    Win,
    HalfWin,
    Lose,
}

/// Receives the signals a round sends outward.
pub trait SceneHost {
    fn on_round_ended(&mut self, report: RoundReport);
    fn on_abort(&mut self);
    fn play_cue(&mut self, cue: Cue);
}

/// Handles lent to a round for the duration of one call.
pub struct RoundContext<'a> {
    pub ledger: &'a mut dyn HighScoreLedger,
    pub host: &'a mut dyn SceneHost,
}

pub trait RoundScene {
    fn tick(&mut self, dt: f32, ctx: &mut RoundContext);
    fn on_tap(&mut self, tap: Tap, ctx: &mut RoundContext);
    fn on_back_requested(&mut self, ctx: &mut RoundContext);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostSignal {
    RoundEnded(RoundReport),
    Aborted,
    Cue(Cue),
}

/// A `SceneHost` that queues signals so the owner can act on them after the
/// round call returns.
#[derive(Default)]
pub struct SignalQueue {
    signals: Vec<HostSignal>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, HostSignal> {
        self.signals.drain(..)
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[HostSignal] {
        &self.signals
    }
}

impl SceneHost for SignalQueue {
    fn on_round_ended(&mut self, report: RoundReport) {
        self.signals.push(HostSignal::RoundEnded(report));
    }

    fn on_abort(&mut self) {
        self.signals.push(HostSignal::Aborted);
    }

    fn play_cue(&mut self, cue: Cue) {
        self.signals.push(HostSignal::Cue(cue));
    }
}
