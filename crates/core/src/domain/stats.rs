use super::Difficulty;

/// Per-difficulty problem counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyStats {
    pub total: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

impl DifficultyStats {
    pub fn record(&mut self, difficulty: Difficulty) {
        self.total += 1;
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
        }
    }
}

impl FromIterator<Difficulty> for DifficultyStats {
    fn from_iter<I: IntoIterator<Item = Difficulty>>(iter: I) -> Self {
        let mut stats = Self::default();
        for difficulty in iter {
            stats.record(difficulty);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::DifficultyStats;
    use crate::domain::Difficulty;

    #[test]
    fn counts_each_difficulty() {
        let stats: DifficultyStats = [
            Difficulty::Easy,
            Difficulty::Hard,
            Difficulty::Easy,
            Difficulty::Medium,
        ]
        .into_iter()
        .collect();

        assert_eq!(
            stats,
            DifficultyStats {
                total: 4,
                easy: 2,
                medium: 1,
                hard: 1,
            }
        );
    }
}
