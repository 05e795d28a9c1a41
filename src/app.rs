use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{
    ConfigKey, Cue, DifficultyLevel, GameRound, HostSignal, MathParameter, RoundContext, RoundReport, RoundScene,
    SignalQueue, Tap,
};
use crate::scores::HighScoreLedger;
use crate::settings::Settings;

/// Seconds a status message stays on screen.
const STATUS_TTL: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen {
    Menu,
    Playing,
    Result(RoundReport),
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub selected_difficulty: usize,
    pub selected_parameter: usize,
    pub show_records: bool,
    pub settings: Settings,
    pub ledger: Box<dyn HighScoreLedger>,
    pub round: Option<GameRound>,
    pub status: Option<(String, f32)>,
    signals: SignalQueue,
}

impl App {
    pub fn new(settings: Settings, ledger: Box<dyn HighScoreLedger>) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Menu,
            selected_difficulty: 0,
            selected_parameter: 0,
            show_records: false,
            settings,
            ledger,
            round: None,
            status: None,
            signals: SignalQueue::new(),
        }
    }

    pub fn selected_key(&self) -> ConfigKey {
        ConfigKey::new(
            DifficultyLevel::all()[self.selected_difficulty],
            MathParameter::all()[self.selected_parameter],
        )
    }

    /// Unlock state for display. An unreachable ledger never locks anything.
    pub fn is_unlocked(&self, key: ConfigKey) -> bool {
        self.ledger.is_unlocked(key).unwrap_or(true)
    }

    pub fn on_tick(&mut self, dt: f32) {
        if let Some((_, ttl)) = self.status.as_mut() {
            *ttl -= dt;
            if *ttl <= 0.0 {
                self.status = None;
            }
        }

        if let Some(round) = self.round.as_mut() {
            round.tick(dt, &mut RoundContext { ledger: &mut *self.ledger, host: &mut self.signals });
        }
        self.handle_signals();
    }

    fn handle_signals(&mut self) {
        let signals: Vec<HostSignal> = self.signals.drain().collect();
        for signal in signals {
            match signal {
                HostSignal::RoundEnded(report) => {
                    self.screen = Screen::Result(report);
                }
                HostSignal::Aborted => {
                    self.round = None;
                    self.screen = Screen::Menu;
                    self.flash("Round abandoned");
                }
                HostSignal::Cue(cue) => {
                    let text = match cue {
                        Cue::Start => "Go!",
                        Cue::Win => "New record!",
                        Cue::HalfWin => "Level passed",
                        Cue::Lose => "Time's up",
                    };
                    self.flash(text);
                }
            }
        }
    }

    fn flash(&mut self, text: &str) {
        self.status = Some((text.to_string(), STATUS_TTL));
    }

    fn start_round(&mut self) {
        let key = self.selected_key();
        match self.ledger.is_unlocked(key) {
            Ok(true) => {}
            Ok(false) => {
                self.flash("Locked: set a record on the easier level first");
                return;
            }
            Err(e) => log::warn!("unlock check for {key} failed, allowing play: {e}"),
        }

        match GameRound::new(key, &self.settings) {
            Ok(round) => {
                self.round = Some(round);
                self.screen = Screen::Playing;
                self.status = None;
            }
            Err(e) => {
                log::error!("could not start {key}: {e}");
                self.flash("This level is misconfigured");
            }
        }
    }

    fn send_tap(&mut self, tap: Tap) {
        if let Some(round) = self.round.as_mut() {
            round.on_tap(tap, &mut RoundContext { ledger: &mut *self.ledger, host: &mut self.signals });
        }
        self.handle_signals();
    }

    fn request_back(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.on_back_requested(&mut RoundContext { ledger: &mut *self.ledger, host: &mut self.signals });
        }
        self.handle_signals();
    }

    fn leave_result(&mut self) {
        self.round = None;
        self.screen = Screen::Menu;
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Menu => self.on_menu_key(key),
            Screen::Playing => match key.code {
                KeyCode::Left | KeyCode::Char('n') | KeyCode::Char('N') => self.send_tap(Tap::Incorrect),
                KeyCode::Right | KeyCode::Char('y') | KeyCode::Char('Y') => self.send_tap(Tap::Correct),
                KeyCode::Esc => self.request_back(),
                _ => {}
            },
            Screen::Result(_) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => self.leave_result(),
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.leave_result();
                    self.start_round();
                }
                _ => {}
            },
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        if self.show_records {
            if matches!(key.code, KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Esc) {
                self.show_records = false;
            }
            return;
        }

        let difficulties = DifficultyLevel::all().len();
        let parameters = MathParameter::all().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('h') | KeyCode::Char('H') => self.show_records = true,
            KeyCode::Right => {
                self.selected_parameter = (self.selected_parameter + 1) % parameters;
            }
            KeyCode::Left => {
                self.selected_parameter = (self.selected_parameter + parameters - 1) % parameters;
            }
            KeyCode::Down => {
                self.selected_difficulty = (self.selected_difficulty + 1) % difficulties;
            }
            KeyCode::Up => {
                self.selected_difficulty = (self.selected_difficulty + difficulties - 1) % difficulties;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.start_round(),
            _ => {}
        }
    }
}
