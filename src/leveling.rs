//! XP leveling
//!
//! Maps a cumulative score onto a level table. Levels are 1-based; the
//! threshold at index `i` is the minimum score for level `i + 1`.

use crate::error::{ClientError, Result};
use crate::types::ScoreStats;
use serde::{Deserialize, Serialize};

/// Default level boundaries
pub const DEFAULT_THRESHOLDS: [u64; 8] = [0, 100, 500, 1000, 2500, 5000, 10000, 25000];

/// Strictly increasing level boundaries starting at 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelThresholds(Vec<u64>);

impl LevelThresholds {
    /// Validate and wrap a threshold table
    pub fn new(thresholds: Vec<u64>) -> Result<Self> {
        match thresholds.first() {
            None => {
                return Err(ClientError::Config("level thresholds must not be empty".into()));
            }
            Some(&first) if first != 0 => {
                return Err(ClientError::Config(format!(
                    "level thresholds must start at 0, got {}",
                    first
                )));
            }
            _ => {}
        }

        if let Some(pair) = thresholds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ClientError::Config(format!(
                "level thresholds must be strictly increasing ({} >= {})",
                pair[0], pair[1]
            )));
        }

        Ok(Self(thresholds))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Number of levels in the table
    pub fn max_level(&self) -> u32 {
        self.0.len() as u32
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLDS.to_vec())
    }
}

impl<'de> Deserialize<'de> for LevelThresholds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Vec::<u64>::deserialize(deserializer)?;
        LevelThresholds::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Presentation-ready level state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelSummary {
    pub level: u32,
    pub current_score: u64,
    /// Score needed for the next level; `None` at max level
    pub next_threshold: Option<u64>,
    /// Progress through the current level, 0-100
    pub progress_percent: f64,
}

impl LevelSummary {
    pub fn from_stats(stats: &ScoreStats, thresholds: &LevelThresholds) -> Self {
        let score = i64::try_from(stats.total_score).unwrap_or(i64::MAX);
        compute_level(score, thresholds)
    }

    pub fn is_max_level(&self) -> bool {
        self.next_threshold.is_none()
    }

    /// Score still missing before the next level
    pub fn remaining(&self) -> Option<u64> {
        self.next_threshold
            .map(|next| next.saturating_sub(self.current_score))
    }
}

/// Derive the level summary for a cumulative score.
///
/// Negative scores are treated as 0.
pub fn compute_level(total_score: i64, thresholds: &LevelThresholds) -> LevelSummary {
    let score = total_score.max(0) as u64;
    let table = thresholds.as_slice();

    // table[0] == 0, so at least one threshold is always reached
    let index = table.iter().rposition(|&t| t <= score).unwrap_or(0);
    let floor = table[index];

    let (next_threshold, progress_percent) = match table.get(index + 1) {
        Some(&next) => {
            let span = (next - floor) as f64;
            let pct = (score - floor) as f64 / span * 100.0;
            (Some(next), pct.clamp(0.0, 100.0))
        }
        None => (None, 100.0),
    };

    LevelSummary {
        level: index as u32 + 1,
        current_score: score,
        next_threshold,
        progress_percent,
    }
}
