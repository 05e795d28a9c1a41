use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LedgerError;
use crate::game::difficulty::{NUM_DIFFICULTIES, NUM_PARAMETERS};
use crate::game::ConfigKey;

const MAGIC: &[u8; 4] = b"TFH1";
const NUM_KEYS: usize = NUM_DIFFICULTIES * NUM_PARAMETERS;
// Each entry: 4 bytes best score + 1 byte unlock flag
const ENTRY_SIZE: usize = 4 + 1;
// File size: 4 magic + 15 * 5 = 79 bytes
const FILE_SIZE: usize = 4 + NUM_KEYS * ENTRY_SIZE;

const SCORES_FILE: &str = "thinkfaster.scores";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighScoreRecord {
    /// Best score seen, 0 until something beats it.
    pub best: i32,
    /// Set once a win here has opened the next difficulty.
    pub unlocked: bool,
}

/// Persisted best scores and unlock flags per config key.
pub trait HighScoreLedger {
    fn is_high_score(&self, key: ConfigKey, score: i32) -> Result<bool, LedgerError>;
    fn update_record_for(&mut self, key: ConfigKey, score: i32) -> Result<(), LedgerError>;
    fn unlock_level_up_for(&mut self, key: ConfigKey) -> Result<(), LedgerError>;
    /// Whether `key` may be played. The first difficulty always can.
    fn is_unlocked(&self, key: ConfigKey) -> Result<bool, LedgerError>;
    fn record_for(&self, key: ConfigKey) -> Result<HighScoreRecord, LedgerError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreTable {
    records: [HighScoreRecord; NUM_KEYS],
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            records: [HighScoreRecord::default(); NUM_KEYS],
        }
    }
}

impl ScoreTable {
    pub fn get(&self, key: ConfigKey) -> HighScoreRecord {
        self.records[key.slot()]
    }

    pub fn is_high_score(&self, key: ConfigKey, score: i32) -> bool {
        score > self.records[key.slot()].best
    }

    pub fn is_unlocked(&self, key: ConfigKey) -> bool {
        match key.previous_tier() {
            None => true,
            Some(previous) => self.records[previous.slot()].unlocked,
        }
    }

    /// Returns true if the stored best changed.
    fn update(&mut self, key: ConfigKey, score: i32) -> bool {
        let record = &mut self.records[key.slot()];
        if score > record.best {
            record.best = score;
            true
        } else {
            false
        }
    }

    /// Returns true if the flag was newly set.
    fn unlock(&mut self, key: ConfigKey) -> bool {
        let record = &mut self.records[key.slot()];
        let changed = !record.unlocked;
        record.unlocked = true;
        changed
    }

    fn decode(data: &[u8]) -> Result<Self, LedgerError> {
        if data.len() < FILE_SIZE {
            return Err(LedgerError::Corrupt(format!(
                "expected {} bytes, found {}",
                FILE_SIZE,
                data.len()
            )));
        }
        if &data[0..4] != MAGIC {
            return Err(LedgerError::Corrupt("bad magic".to_string()));
        }

        let mut table = ScoreTable::default();
        let mut offset = 4;
        for record in table.records.iter_mut() {
            let bytes: [u8; 4] = [
                data[offset], data[offset + 1],
                data[offset + 2], data[offset + 3],
            ];
            record.best = i32::from_le_bytes(bytes);
            record.unlocked = data[offset + 4] != 0;
            offset += ENTRY_SIZE;
        }
        Ok(table)
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FILE_SIZE);
        buf.extend_from_slice(MAGIC);
        for record in &self.records {
            buf.extend_from_slice(&record.best.to_le_bytes());
            buf.push(record.unlocked as u8);
        }
        buf
    }
}

/// Ledger stored in a small binary file next to the executable.
pub struct FileLedger {
    table: ScoreTable,
    path: PathBuf,
}

impl FileLedger {
    pub fn load() -> Self {
        Self::load_from(Self::scores_path())
    }

    /// Opens the ledger at `path`. A missing or unreadable file starts empty.
    pub fn load_from(path: PathBuf) -> Self {
        let table = match Self::read_file(&path) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("starting with empty high scores: {e}");
                ScoreTable::default()
            }
        };
        Self { table, path }
    }

    fn scores_path() -> PathBuf {
        // Store next to the executable
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(SCORES_FILE);
            }
        }
        PathBuf::from(SCORES_FILE)
    }

    fn read_file(path: &Path) -> Result<ScoreTable, LedgerError> {
        match fs::read(path) {
            Ok(data) => ScoreTable::decode(&data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ScoreTable::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_file(&self) -> Result<(), LedgerError> {
        fs::write(&self.path, self.table.encode())?;
        Ok(())
    }

    #[cfg(test)]
    pub fn table(&self) -> &ScoreTable {
        &self.table
    }
}

impl HighScoreLedger for FileLedger {
    fn is_high_score(&self, key: ConfigKey, score: i32) -> Result<bool, LedgerError> {
        Ok(self.table.is_high_score(key, score))
    }

    fn update_record_for(&mut self, key: ConfigKey, score: i32) -> Result<(), LedgerError> {
        if self.table.update(key, score) {
            self.write_file()?;
        }
        Ok(())
    }

    fn unlock_level_up_for(&mut self, key: ConfigKey) -> Result<(), LedgerError> {
        if self.table.unlock(key) {
            self.write_file()?;
        }
        Ok(())
    }

    fn is_unlocked(&self, key: ConfigKey) -> Result<bool, LedgerError> {
        Ok(self.table.is_unlocked(key))
    }

    fn record_for(&self, key: ConfigKey) -> Result<HighScoreRecord, LedgerError> {
        Ok(self.table.get(key))
    }
}

/// In-memory ledger; `set_available(false)` makes every call fail.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryLedger {
    table: ScoreTable,
    unavailable: bool,
}

#[cfg(test)]
impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    fn check(&self) -> Result<(), LedgerError> {
        if self.unavailable {
            Err(LedgerError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
impl HighScoreLedger for MemoryLedger {
    fn is_high_score(&self, key: ConfigKey, score: i32) -> Result<bool, LedgerError> {
        self.check()?;
        Ok(self.table.is_high_score(key, score))
    }

    fn update_record_for(&mut self, key: ConfigKey, score: i32) -> Result<(), LedgerError> {
        self.check()?;
        self.table.update(key, score);
        Ok(())
    }

    fn unlock_level_up_for(&mut self, key: ConfigKey) -> Result<(), LedgerError> {
        self.check()?;
        self.table.unlock(key);
        Ok(())
    }

    fn is_unlocked(&self, key: ConfigKey) -> Result<bool, LedgerError> {
        self.check()?;
        Ok(self.table.is_unlocked(key))
    }

    fn record_for(&self, key: ConfigKey) -> Result<HighScoreRecord, LedgerError> {
        self.check()?;
        Ok(self.table.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DifficultyLevel, MathParameter};

    fn key(difficulty: DifficultyLevel) -> ConfigKey {
        ConfigKey::new(difficulty, MathParameter::Multiplication)
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("thinkfaster-{}-{}.scores", name, std::process::id()))
    }

    #[test]
    fn only_strictly_better_scores_are_high_scores() {
        let mut ledger = MemoryLedger::new();
        let k = key(DifficultyLevel::Easy);
        assert!(!ledger.is_high_score(k, 0).unwrap());
        assert!(!ledger.is_high_score(k, -3).unwrap());
        assert!(ledger.is_high_score(k, 1).unwrap());

        ledger.update_record_for(k, 12).unwrap();
        assert!(!ledger.is_high_score(k, 12).unwrap());
        assert!(ledger.is_high_score(k, 13).unwrap());

        ledger.update_record_for(k, 4).unwrap();
        assert_eq!(ledger.record_for(k).unwrap().best, 12);
    }

    #[test]
    fn unlocking_opens_the_next_difficulty_only() {
        let mut ledger = MemoryLedger::new();
        assert!(ledger.is_unlocked(key(DifficultyLevel::Easy)).unwrap());
        assert!(!ledger.is_unlocked(key(DifficultyLevel::Medium)).unwrap());

        ledger.unlock_level_up_for(key(DifficultyLevel::Easy)).unwrap();
        assert!(ledger.is_unlocked(key(DifficultyLevel::Medium)).unwrap());
        assert!(!ledger.is_unlocked(key(DifficultyLevel::Hard)).unwrap());

        let other = ConfigKey::new(DifficultyLevel::Medium, MathParameter::Addition);
        assert!(!ledger.is_unlocked(other).unwrap());
    }

    #[test]
    fn unavailable_ledger_reports_errors() {
        let mut ledger = MemoryLedger::new();
        ledger.set_available(false);
        let k = key(DifficultyLevel::Easy);
        assert!(matches!(ledger.is_high_score(k, 5), Err(LedgerError::Unavailable)));
        assert!(ledger.update_record_for(k, 5).is_err());
        ledger.set_available(true);
        assert!(ledger.is_high_score(k, 5).unwrap());
    }

    #[test]
    fn file_ledger_survives_a_reload() {
        let path = temp_path("reload");
        let _ = fs::remove_file(&path);
        {
            let mut ledger = FileLedger::load_from(path.clone());
            ledger.update_record_for(key(DifficultyLevel::Medium), -2).unwrap();
            ledger.update_record_for(key(DifficultyLevel::Medium), 17).unwrap();
            ledger.unlock_level_up_for(key(DifficultyLevel::Medium)).unwrap();
        }
        let ledger = FileLedger::load_from(path.clone());
        let _ = fs::remove_file(&path);

        let record = ledger.record_for(key(DifficultyLevel::Medium)).unwrap();
        assert_eq!(record, HighScoreRecord { best: 17, unlocked: true });
        assert!(ledger.is_unlocked(key(DifficultyLevel::Hard)).unwrap());
        assert_eq!(ledger.record_for(key(DifficultyLevel::Easy)).unwrap(), HighScoreRecord::default());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"XXXX not a score file").unwrap();
        let ledger = FileLedger::load_from(path.clone());
        let _ = fs::remove_file(&path);
        assert_eq!(ledger.table(), &ScoreTable::default());
    }

    #[test]
    fn decode_rejects_short_and_foreign_data() {
        assert!(matches!(ScoreTable::decode(b"TFH1"), Err(LedgerError::Corrupt(_))));
        let mut data = ScoreTable::default().encode();
        data[0] = b'X';
        assert!(matches!(ScoreTable::decode(&data), Err(LedgerError::Corrupt(_))));
    }

    #[test]
    fn negative_bests_are_stored_faithfully() {
        let mut table = ScoreTable::default();
        table.records[3].best = -40;
        table.records[14].unlocked = true;
        assert_eq!(ScoreTable::decode(&table.encode()).unwrap(), table);
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = std::env::temp_dir().join(format!("thinkfaster-missing-dir-{}", std::process::id()));
        let mut ledger = FileLedger::load_from(dir.join("nested").join(SCORES_FILE));
        let result = ledger.update_record_for(key(DifficultyLevel::Easy), 3);
        assert!(matches!(result, Err(LedgerError::Io(_))));
    }
}
