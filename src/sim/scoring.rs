//! Score and level counters

use crate::consts::{HIT_SCORE, LEVEL_BONUS_PER_ALIEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u64,
    pub level: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self { score: 0, level: 1 }
    }
}

impl Scoreboard {
    pub fn award_hit(&mut self) {
        self.score += HIT_SCORE;
    }

    /// Bump the level and award the clear bonus for a `columns` x `rows` wave.
    /// Returns the bonus.
    pub fn level_up(&mut self, columns: u32, rows: u32) -> u64 {
        let bonus = LEVEL_BONUS_PER_ALIEN * columns as u64 * rows as u64;
        self.level += 1;
        self.score += bonus;
        bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_level_one() {
        let board = Scoreboard::default();
        assert_eq!(board.score, 0);
        assert_eq!(board.level, 1);
    }

    #[test]
    fn test_level_up_bonus_uses_given_counts() {
        let mut board = Scoreboard::default();
        board.award_hit();
        let bonus = board.level_up(3, 2);
        assert_eq!(bonus, 300);
        assert_eq!(board.score, 400);
        assert_eq!(board.level, 2);
    }
}
