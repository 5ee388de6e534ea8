//! Single-player high scores
//!
//! Lives in memory for the lifetime of the process; nothing is written to
//! disk. `Game` records each finished single-player round and shows the
//! best one on the game over screen.

use serde::Serialize;

/// Entries kept, best first
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Level reached
    pub level: u32,
    /// Shell clock (ms) when the round ended
    pub achieved_ms: u64,
}

/// Best single-player rounds, sorted by score (earlier rounds win ties)
#[derive(Debug, Clone, Default, Serialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished round. Returns its 1-based place if it made the table.
    pub fn add_score(&mut self, score: u32, level: u32, achieved_ms: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let place = self.entries.partition_point(|e| e.score >= score);
        if place >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(
            place,
            HighScoreEntry {
                score,
                level,
                achieved_ms,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        if place == 0 {
            log::info!("New high score: {score} (level {level})");
        }
        Some(place + 1)
    }

    /// Best score so far (0 before any scoring round)
    pub fn top_score(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(table: &HighScores) -> Vec<u32> {
        table.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_zero_is_not_recorded() {
        let mut table = HighScores::new();
        assert_eq!(table.add_score(0, 1, 0), None);
        assert!(table.entries().is_empty());
        assert_eq!(table.top_score(), 0);
    }

    #[test]
    fn test_best_first() {
        let mut table = HighScores::new();
        assert_eq!(table.add_score(12, 2, 10), Some(1));
        assert_eq!(table.add_score(30, 4, 20), Some(1));
        assert_eq!(table.add_score(5, 1, 30), Some(3));
        assert_eq!(table.add_score(12, 2, 40), Some(3));
        assert_eq!(scores(&table), vec![30, 12, 12, 5]);
        assert_eq!(table.entries()[1].achieved_ms, 10);
        assert_eq!(table.top_score(), 30);
    }

    #[test]
    fn test_table_is_capped() {
        let mut table = HighScores::new();
        for s in 1..=15 {
            table.add_score(s, 1, 0);
        }
        assert_eq!(table.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(table.top_score(), 15);
        assert_eq!(*scores(&table).last().unwrap_or(&0), 6);

        // Matching the lowest entry is not enough
        assert_eq!(table.add_score(6, 1, 0), None);
        assert_eq!(table.add_score(7, 1, 0), Some(10));
        assert_eq!(*scores(&table).last().unwrap_or(&0), 7);
    }
}
