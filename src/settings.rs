use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GameError;
use crate::game::{ConfigKey, DifficultyLevel, MathParameter};

pub const INITIAL_POOL_SIZE: usize = 10;
pub const TEXT_MOVE_TIME: f32 = 0.2;
pub const MINIMUM_SCORE_TO_UNLOCK_LEVEL: i32 = 5;
pub const CONVEYOR_CAPACITY: usize = 4;
pub const LIFE_BAR_LENGTH: f32 = 800.0;

const SETTINGS_FILE: &str = "thinkfaster.json";

/// Operand ranges and pacing for one difficulty. Fields left out of a
/// settings file fall back to the Easy values.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationProfile {
    pub min_operand: i32,
    pub max_operand: i32,
    /// Largest distance between a wrong answer and the real one.
    pub wrong_spread: i32,
    /// Life bar progress per second.
    pub life_bar_speed: f32,
}

impl Default for GenerationProfile {
    fn default() -> Self {
        Self::for_difficulty(DifficultyLevel::Easy)
    }
}

impl GenerationProfile {
    pub fn for_difficulty(difficulty: DifficultyLevel) -> Self {
        match difficulty {
            DifficultyLevel::Easy => Self { min_operand: 1, max_operand: 10, wrong_spread: 3, life_bar_speed: 13.0 },
            DifficultyLevel::Medium => Self { min_operand: 2, max_operand: 20, wrong_spread: 5, life_bar_speed: 16.0 },
            DifficultyLevel::Hard => Self { min_operand: 5, max_operand: 50, wrong_spread: 9, life_bar_speed: 20.0 },
        }
    }

    /// Checks that equations for `key` can always be produced from this profile.
    pub fn validate(&self, key: ConfigKey) -> Result<(), GameError> {
        let fail = |reason: &str| {
            Err(GameError::InvalidProfile {
                key,
                reason: reason.to_string(),
            })
        };
        if self.min_operand > self.max_operand {
            return fail("operand range is empty");
        }
        if self.min_operand < 0 {
            return fail("operands must not be negative");
        }
        if self.wrong_spread <= 0 {
            return fail("wrong answers need a positive spread");
        }
        if !(self.life_bar_speed > 0.0 && self.life_bar_speed.is_finite()) {
            return fail("life bar speed must be positive");
        }
        let needs_divisor = matches!(key.parameter, MathParameter::Division | MathParameter::Mixed);
        if needs_divisor && self.max_operand < 1 {
            return fail("division needs a nonzero divisor in range");
        }
        // Largest true result plus the widest wrong offset must stay an i32.
        let max = i64::from(self.max_operand);
        let largest = match key.parameter {
            MathParameter::Addition | MathParameter::Subtraction => 2 * max,
            MathParameter::Multiplication | MathParameter::Division | MathParameter::Mixed => max * max,
        };
        if largest + i64::from(self.wrong_spread) > i64::from(i32::MAX) {
            return fail("operands or spread too large");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Profiles {
    pub easy: GenerationProfile,
    pub medium: GenerationProfile,
    pub hard: GenerationProfile,
}

impl Default for Profiles {
    fn default() -> Self {
        Self {
            easy: GenerationProfile::for_difficulty(DifficultyLevel::Easy),
            medium: GenerationProfile::for_difficulty(DifficultyLevel::Medium),
            hard: GenerationProfile::for_difficulty(DifficultyLevel::Hard),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub initial_pool_size: usize,
    /// Seconds a shift takes to animate. Cosmetic only.
    pub text_move_time: f32,
    pub minimum_score_to_unlock: i32,
    pub conveyor_capacity: usize,
    pub life_bar_length: f32,
    pub profiles: Profiles,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_pool_size: INITIAL_POOL_SIZE,
            text_move_time: TEXT_MOVE_TIME,
            minimum_score_to_unlock: MINIMUM_SCORE_TO_UNLOCK_LEVEL,
            conveyor_capacity: CONVEYOR_CAPACITY,
            life_bar_length: LIFE_BAR_LENGTH,
            profiles: Profiles::default(),
        }
    }
}

impl Settings {
    /// Reads the settings file next to the executable, or defaults if there is none.
    pub fn load() -> Result<Self, GameError> {
        Self::load_from(&Self::settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, GameError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(GameError::SettingsIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&data).map_err(|source| GameError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    fn settings_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(SETTINGS_FILE);
            }
        }
        PathBuf::from(SETTINGS_FILE)
    }

    /// Conveyor and life bar limits a round needs before it can start.
    pub fn validate_layout(&self) -> Result<(), GameError> {
        if self.conveyor_capacity == 0 {
            return Err(GameError::InvalidSettings("conveyor capacity must be at least 1".to_string()));
        }
        if !(self.life_bar_length > 0.0 && self.life_bar_length.is_finite()) {
            return Err(GameError::InvalidSettings("life bar length must be positive and finite".to_string()));
        }
        Ok(())
    }

    /// Checks the layout and every level's profile.
    pub fn validate(&self) -> Result<(), GameError> {
        self.validate_layout()?;
        for key in ConfigKey::all() {
            self.profile(key.difficulty).validate(key)?;
        }
        Ok(())
    }

    pub fn profile(&self, difficulty: DifficultyLevel) -> &GenerationProfile {
        match difficulty {
            DifficultyLevel::Easy => &self.profiles.easy,
            DifficultyLevel::Medium => &self.profiles.medium,
            DifficultyLevel::Hard => &self.profiles.hard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(parameter: MathParameter) -> ConfigKey {
        ConfigKey::new(DifficultyLevel::Easy, parameter)
    }

    #[test]
    fn default_profiles_are_valid_for_every_key() {
        let settings = Settings::default();
        for key in ConfigKey::all() {
            assert!(settings.profile(key.difficulty).validate(key).is_ok(), "{key}");
        }
    }

    #[test]
    fn empty_range_is_rejected() {
        let profile = GenerationProfile { min_operand: 9, max_operand: 3, ..GenerationProfile::default() };
        assert!(matches!(
            profile.validate(key(MathParameter::Addition)),
            Err(GameError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn division_without_divisor_is_rejected() {
        let profile = GenerationProfile { min_operand: 0, max_operand: 0, ..GenerationProfile::default() };
        assert!(profile.validate(key(MathParameter::Addition)).is_ok());
        assert!(profile.validate(key(MathParameter::Division)).is_err());
        assert!(profile.validate(key(MathParameter::Mixed)).is_err());
    }

    #[test]
    fn operands_that_overflow_are_rejected() {
        let settings: Settings =
            serde_json::from_str(r#"{ "profiles": { "hard": { "min_operand": 50000, "max_operand": 100000 } } }"#)
                .unwrap();
        let hard = settings.profile(DifficultyLevel::Hard);
        let key = |parameter| ConfigKey::new(DifficultyLevel::Hard, parameter);
        assert!(hard.validate(key(MathParameter::Addition)).is_ok());
        assert!(hard.validate(key(MathParameter::Multiplication)).is_err());
        assert!(hard.validate(key(MathParameter::Division)).is_err());
        assert!(hard.validate(key(MathParameter::Mixed)).is_err());
        assert!(matches!(settings.validate(), Err(GameError::InvalidProfile { .. })));
    }

    #[test]
    fn huge_spread_is_rejected() {
        let profile = GenerationProfile { wrong_spread: i32::MAX, ..GenerationProfile::default() };
        assert!(profile.validate(key(MathParameter::Addition)).is_err());
    }

    #[test]
    fn defaults_pass_whole_settings_validation() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn empty_conveyor_is_a_settings_error() {
        let mut settings = Settings::default();
        settings.conveyor_capacity = 0;
        assert!(matches!(settings.validate(), Err(GameError::InvalidSettings(_))));
    }

    #[test]
    fn endless_life_bar_is_a_settings_error() {
        for length in [0.0, -3.0, f32::INFINITY, f32::NAN] {
            let mut settings = Settings::default();
            settings.life_bar_length = length;
            assert!(matches!(settings.validate(), Err(GameError::InvalidSettings(_))), "{length}");
        }
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "minimum_score_to_unlock": 7, "profiles": { "hard": { "max_operand": 99 } } }"#)
                .unwrap();
        assert_eq!(settings.minimum_score_to_unlock, 7);
        assert_eq!(settings.conveyor_capacity, CONVEYOR_CAPACITY);
        assert_eq!(settings.profiles.hard.max_operand, 99);
        assert_eq!(settings.profiles.medium, GenerationProfile::for_difficulty(DifficultyLevel::Medium));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("thinkfaster-settings-missing.json");
        let _ = fs::remove_file(&path);
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("thinkfaster-settings-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let result = Settings::load_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(GameError::SettingsFormat { .. })));
    }
}
