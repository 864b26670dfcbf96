/// Challengeable adversaries. The pawn is the tutorial-only opponent and
/// never counts toward star accounting; the queen is the final enemy whose
/// defeat (once unlocked) wins the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Enemy {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Enemy {
    pub const FINAL: Enemy = Enemy::Queen;

    pub const ROSTER: [Enemy; 5] = [
        Enemy::Pawn,
        Enemy::Knight,
        Enemy::Bishop,
        Enemy::Rook,
        Enemy::Queen,
    ];

    pub fn is_tutorial(self) -> bool {
        self == Enemy::Pawn
    }

    pub fn label(self) -> &'static str {
        match self {
            Enemy::Pawn => "pawn",
            Enemy::Knight => "knight",
            Enemy::Bishop => "bishop",
            Enemy::Rook => "rook",
            Enemy::Queen => "queen",
        }
    }
}
