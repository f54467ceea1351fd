use crate::ScoredGame;

/// This trait is used to control something that can return a score from a game state
///
/// Higher is better for the maximizer. Implementations must be deterministic for a given state,
/// alpha-beta pruning is only valid if scoring the same state twice gives the same answer.
pub trait Scorable<GameType> {
    /// Convert the given game state into a score
    fn score(&self, game: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}

/// The default evaluation function: the score the game reports for itself
pub fn state_score<GameType: ScoredGame>(game: &GameType) -> f64 {
    game.game_score()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl ScoredGame for Fixed {
        fn game_score(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_state_score_uses_the_game_score() {
        assert_eq!(state_score(&Fixed(12.5)), 12.5);
    }

    #[test]
    fn test_closures_are_scorable() {
        let doubled = |game: &Fixed| game.0 * 2.0;

        assert_eq!(doubled.score(&Fixed(4.0)), 8.0);
        assert_eq!((state_score::<Fixed> as fn(&Fixed) -> f64).score(&Fixed(3.0)), 3.0);
    }
}
