/// Named stage of game progression. One value active at a time, owned by
/// the progression controller; everyone else reads it through queries.
///
/// Four values (`GameOverTutorial`, `EnemyIntro`, `Win`, `GameOver`) are
/// reserved: no transition currently sets or reads them, but collaborators
/// may target them later, so they stay in the enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Unknown,
    Start,
    Tutorial,
    /// Reserved, currently unreachable.
    GameOverTutorial,
    ChooseEnemy,
    /// Reserved, currently unreachable.
    EnemyIntro,
    Play,
    /// Reserved, currently unreachable.
    Win,
    /// Reserved, currently unreachable.
    GameOver,
    Victory,
    ShowScore,
}
