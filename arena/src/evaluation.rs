use clap::ValueEnum;
use multi_agent_search::state_score;

use crate::pursuit::Pursuit;

const PELLET_DISTANCE_WEIGHT: f64 = 2.0;
const PELLETS_LEFT_WEIGHT: f64 = 15.0;
const ADJACENT_CHASER_PENALTY: f64 = 200.0;
const CHASER_DISTANCE_WEIGHT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum EvaluationKind {
    /// The game score as it stands
    Score,
    /// The game score, nudged towards pellets and away from chasers
    Better,
}

impl EvaluationKind {
    pub(crate) fn function(self) -> fn(&Pursuit) -> f64 {
        match self {
            EvaluationKind::Score => state_score::<Pursuit>,
            EvaluationKind::Better => better,
        }
    }
}

/// Adds some shaping on top of the score for states that aren't finished yet
///
/// Being close to a pellet and having fewer pellets left are both good, and a chaser next to
/// the runner is nearly as bad as being caught.
pub(crate) fn better(game: &Pursuit) -> f64 {
    let score = game.score() as f64;
    if game.is_over() {
        return score;
    }

    let nearest_pellet = game
        .pellets
        .iter()
        .map(|pellet| game.runner.manhattan(*pellet))
        .min()
        .unwrap_or(0) as f64;

    let danger = match game
        .chasers
        .iter()
        .map(|chaser| game.runner.manhattan(*chaser))
        .min()
    {
        Some(distance) if distance <= 1 => ADJACENT_CHASER_PENALTY,
        Some(distance) => CHASER_DISTANCE_WEIGHT / distance as f64,
        None => 0.0,
    };

    score
        - PELLET_DISTANCE_WEIGHT * nearest_pellet
        - PELLETS_LEFT_WEIGHT * game.pellets.len() as f64
        - danger
}

#[cfg(test)]
mod tests {
    use multi_agent_search::{AgentIndex, MultiAgentGame};

    use super::*;
    use crate::{layout::Layout, pursuit::Direction};

    fn game(text: &str) -> Pursuit {
        text.parse::<Layout>().unwrap().into_game()
    }

    #[test]
    fn test_score_is_the_game_score() {
        let game = game("%%%%%%%\n%P . G%\n%%%%%%%")
            .successor(AgentIndex::MAXIMIZER, &Direction::East)
            .unwrap();

        assert_eq!(EvaluationKind::Score.function()(&game), -1.0);
    }

    #[test]
    fn test_better_prefers_being_near_pellets() {
        let start = game("%%%%%%%%%\n%P  .  G%\n%%%%%%%%%");
        let closer = start
            .successor(AgentIndex::MAXIMIZER, &Direction::East)
            .unwrap();
        let stayed = start
            .successor(AgentIndex::MAXIMIZER, &Direction::Stop)
            .unwrap();

        assert!(better(&closer) > better(&stayed));
    }

    #[test]
    fn test_better_fears_adjacent_chasers() {
        let safe = game("%%%%%%%%\n%P.   G%\n%%%%%%%%");
        let threatened = game("%%%%%%%%\n%PG  . %\n%%%%%%%%");

        assert!(better(&threatened) < better(&safe) - ADJACENT_CHASER_PENALTY / 2.0);
    }

    #[test]
    fn test_better_is_the_score_once_the_game_is_over() {
        let won = game("%%%%%%\n%P. G%\n%%%%%%")
            .successor(AgentIndex::MAXIMIZER, &Direction::East)
            .unwrap();

        assert_eq!(better(&won), won.score() as f64);
    }
}
