//! Persisted top-three score table.
//!
//! File format, one record per line, newline-joined with no trailing newline:
//!
//! ```text
//! 500  A.B.C
//! 300  X.Y.Z
//! 200  Q.Q.Q
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const TABLE_LEN: usize = 3;
pub const INITIALS_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to access high-score file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("expected 3 high-score records, found {0}")]
    WrongLineCount(usize),
    #[error("line {line}: score {token:?} is not a number")]
    BadScore { line: usize, token: String },
    #[error("line {line}: initials {token:?} are not three dot-separated letters")]
    BadInitials { line: usize, token: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Dot-joined, e.g. `A.B.C`.
    pub initials: String,
}

impl HighScoreEntry {
    pub fn new(score: u32, letters: &[char]) -> Self {
        Self {
            score,
            initials: join_initials(letters),
        }
    }
}

pub fn join_initials(letters: &[char]) -> String {
    letters
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

fn valid_initials(initials: &str) -> bool {
    let parts: Vec<&str> = initials.split('.').collect();
    parts.len() == INITIALS_LEN
        && parts.iter().all(|p| {
            let mut chars = p.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
        })
}

/// Always exactly three entries, highest score first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self {
            entries: vec![
                HighScoreEntry {
                    score: 0,
                    initials: "A.A.A".to_string(),
                };
                TABLE_LEN
            ],
        }
    }
}

impl HighScoreTable {
    pub fn parse(text: &str) -> Result<Self, HighScoreError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() != TABLE_LEN {
            return Err(HighScoreError::WrongLineCount(lines.len()));
        }

        let mut entries = Vec::with_capacity(TABLE_LEN);
        for (index, line) in lines.iter().enumerate() {
            let mut tokens = line.split_whitespace();
            let score_token = tokens.next().unwrap_or_default();
            let score = score_token
                .parse::<u32>()
                .map_err(|_| HighScoreError::BadScore {
                    line: index + 1,
                    token: score_token.to_string(),
                })?;
            let initials = tokens.collect::<Vec<_>>().join(" ");
            if !valid_initials(&initials) {
                return Err(HighScoreError::BadInitials {
                    line: index + 1,
                    token: initials,
                });
            }
            entries.push(HighScoreEntry { score, initials });
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(Self { entries })
    }

    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}  {}", e.score, e.initials))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn lowest(&self) -> u32 {
        self.entries.iter().map(|e| e.score).min().unwrap_or(0)
    }

    /// A score makes the table only by beating the current lowest.
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.lowest()
    }

    /// Replace the lowest entry and re-sort. Returns false (and leaves the
    /// table untouched) when the score does not qualify.
    pub fn insert(&mut self, entry: HighScoreEntry) -> bool {
        if !self.qualifies(entry.score) {
            return false;
        }
        let lowest = self
            .entries
            .iter()
            .enumerate()
            .rev()
            .min_by_key(|(_, e)| e.score)
            .map(|(i, _)| i);
        if let Some(index) = lowest {
            self.entries[index] = entry;
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        true
    }
}

/// The table plus the file it lives in.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    table: HighScoreTable,
}

impl HighScoreStore {
    /// Never fails: a missing or malformed file yields the default table.
    pub fn load(path: &Path) -> Self {
        let table = match read_table(path) {
            Ok(table) => {
                log::info!("Loaded high scores from {}", path.display());
                table
            }
            Err(e) => {
                log::warn!("{e}; using default high-score table");
                HighScoreTable::default()
            }
        };
        Self {
            path: path.to_path_buf(),
            table,
        }
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    /// Insert and persist. The table is updated in memory even when the
    /// write fails.
    pub fn submit(&mut self, entry: HighScoreEntry) -> Result<bool, HighScoreError> {
        if !self.table.insert(entry) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Write through a sibling temp file and rename it into place.
    pub fn save(&self) -> Result<(), HighScoreError> {
        let tmp = temporary_path(&self.path);
        fs::write(&tmp, self.table.serialize()).map_err(|source| HighScoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Saved high scores to {}", self.path.display());
        Ok(())
    }
}

fn read_table(path: &Path) -> Result<HighScoreTable, HighScoreError> {
    let raw = fs::read_to_string(path).map_err(|source| HighScoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    HighScoreTable::parse(&raw)
}

fn temporary_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("high_score");
    path.with_file_name(format!("{file_name}.tmp"))
}
