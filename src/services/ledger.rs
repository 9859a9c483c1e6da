use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("highscore file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("highscore file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("highscore lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub won: u32,
    pub lost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: String,
    pub won: u32,
    pub lost: u32,
}

/// Win/loss ledger written once per finished game.
pub trait ScoreLedger: Send + Sync {
    fn record(&self, winners: &[String], losers: &[String]) -> Result<(), LedgerError>;
    /// Ordered by descending wins.
    fn summary(&self) -> Vec<ScoreEntry>;
}

pub struct Highscore {
    path: Option<PathBuf>,
    data: Mutex<BTreeMap<String, ScoreRecord>>,
}

impl Highscore {
    /// Loads the ledger at `path`, creating an empty one if the file is missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Creating new highscore file at {}", path.display());
                let empty = BTreeMap::new();
                write_file(&path, &empty)?;
                empty
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: Some(path),
            data: Mutex::new(data),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: Mutex::new(BTreeMap::new()),
        }
    }
}

impl ScoreLedger for Highscore {
    fn record(&self, winners: &[String], losers: &[String]) -> Result<(), LedgerError> {
        let mut data = self.data.lock().map_err(|_| LedgerError::Poisoned)?;
        for winner in winners {
            data.entry(winner.clone()).or_default().won += 1;
        }
        for loser in losers {
            data.entry(loser.clone()).or_default().lost += 1;
        }
        debug!("Recorded {} winners and {} losers", winners.len(), losers.len());
        if let Some(path) = &self.path {
            write_file(path, &data)?;
        }
        Ok(())
    }

    fn summary(&self) -> Vec<ScoreEntry> {
        let data = match self.data.lock() {
            Ok(data) => data,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut entries: Vec<ScoreEntry> = data
            .iter()
            .map(|(player, record)| ScoreEntry {
                player: player.clone(),
                won: record.won,
                lost: record.lost,
            })
            .collect();
        // stable: equal win counts stay in name order
        entries.sort_by(|a, b| b.won.cmp(&a.won));
        entries
    }
}

fn write_file(path: &Path, data: &BTreeMap<String, ScoreRecord>) -> Result<(), LedgerError> {
    let text = serde_json::to_string_pretty(data)?;
    fs::write(path, text)?;
    Ok(())
}

pub fn render_summary(entries: &[ScoreEntry]) -> String {
    if entries.is_empty() {
        return "none".to_string();
    }
    entries
        .iter()
        .map(|e| format!("{} (won: {}, lost: {})", e.player, e.won, e.lost))
        .collect::<Vec<_>>()
        .join(", ")
}
