use std::collections::HashMap;

use super::enemy::Enemy;

pub const MAX_STARS: u8 = 3;

/// Stars required before the queen can be challenged.
pub const DEFAULT_UNLOCK_THRESHOLD: u32 = 7;

/// Quality tier of a finished level. The tier-to-star mapping is decided by
/// the combat layer; the tracker only consumes the star count it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Fail,
    Bronze,
    Silver,
    Gold,
    Perfect,
}

impl ScoreKind {
    /// Convenience mapping for collaborators that have no grading logic of
    /// their own.
    pub fn default_stars(self) -> u8 {
        match self {
            ScoreKind::Fail => 0,
            ScoreKind::Bronze => 1,
            ScoreKind::Silver => 2,
            ScoreKind::Gold | ScoreKind::Perfect => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub kind: ScoreKind,
    pub stars: u8,
}

impl ScoreResult {
    pub const FAIL: ScoreResult = ScoreResult {
        kind: ScoreKind::Fail,
        stars: 0,
    };

    pub fn new(kind: ScoreKind, stars: u8) -> Self {
        Self {
            kind,
            stars: stars.min(MAX_STARS),
        }
    }

    pub fn graded(kind: ScoreKind) -> Self {
        Self {
            kind,
            stars: kind.default_stars(),
        }
    }
}

/// Best star count per non-pawn enemy, plus the tutorial completion flag.
/// The star map is wiped wholesale on a loss; the tutorial flag never is.
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    stars: HashMap<Enemy, u8>,
    tutorial_success: bool,
    unlock_threshold: u32,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(DEFAULT_UNLOCK_THRESHOLD)
    }
}

impl ScoreTracker {
    pub fn new(unlock_threshold: u32) -> Self {
        Self {
            stars: HashMap::new(),
            tutorial_success: false,
            unlock_threshold,
        }
    }

    pub fn record_win(&mut self, enemy: Enemy, result: ScoreResult) {
        if enemy.is_tutorial() {
            // The pawn never counts toward stars.
            self.tutorial_success = true;
            return;
        }
        let best = self.stars.entry(enemy).or_insert(0);
        *best = (*best).max(result.stars.min(MAX_STARS));
    }

    /// Wipes every earned star. `tutorial_success` survives.
    pub fn clear_all(&mut self) {
        self.stars.clear();
    }

    pub fn tutorial_success(&self) -> bool {
        self.tutorial_success
    }

    pub fn star_count(&self, enemy: Enemy) -> u8 {
        self.stars.get(&enemy).copied().unwrap_or(0)
    }

    pub fn total_stars(&self) -> u32 {
        self.stars.values().map(|&s| u32::from(s)).sum()
    }

    pub fn is_unlocked(&self) -> bool {
        self.total_stars() >= self.unlock_threshold
    }

    pub fn unlock_threshold(&self) -> u32 {
        self.unlock_threshold
    }

    pub fn is_final_enemy_defeated(&self) -> bool {
        self.star_count(Enemy::FINAL) > 0
    }
}
