use std::ops::AddAssign;

use crate::{AgentIndex, MultiAgentGame, Round, Scorable, SearchDepth, SearchError};

/// Counters collected while running a single decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// How many times the evaluation function was called
    pub leaf_evaluations: usize,
    /// How many states were visited, leaves included
    pub nodes_visited: usize,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.leaf_evaluations += rhs.leaf_evaluations;
        self.nodes_visited += rhs.nodes_visited;
    }
}

/// What to do with a state once we've arrived at it
pub(crate) enum Expansion<Action> {
    /// Stop here, this is the score of the state
    Leaf(f64),
    /// The acting agent and the actions to explore, never empty
    Branch {
        agent: AgentIndex,
        actions: Vec<Action>,
    },
}

/// The root round of a search from `game`, along with the maximizer's actions there
///
/// Every search starts here so they all reject a game without agents, or one where the maximizer
/// has nothing to choose from, the same way.
pub(crate) fn search_root<GameType: MultiAgentGame>(
    game: &GameType,
) -> Result<(Round, Vec<GameType::Action>), SearchError> {
    let root = Round::root(game.num_agents())?;

    let actions = game.legal_actions(AgentIndex::MAXIMIZER);
    if actions.is_empty() {
        return Err(SearchError::NoLegalActions {
            agent: AgentIndex::MAXIMIZER,
        });
    }

    Ok((root, actions))
}

/// Everything that stays the same for the whole of one decision
pub(crate) struct SearchContext<'a, ScorableType> {
    score_function: &'a ScorableType,
    depth: SearchDepth,
    num_agents: usize,
    pub(crate) stats: SearchStats,
}

impl<'a, ScorableType> SearchContext<'a, ScorableType> {
    pub(crate) fn new(
        score_function: &'a ScorableType,
        depth: SearchDepth,
        num_agents: usize,
    ) -> Self {
        Self {
            score_function,
            depth,
            num_agents,
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn evaluate<GameType>(&mut self, game: &GameType) -> f64
    where
        ScorableType: Scorable<GameType>,
    {
        self.stats.leaf_evaluations += 1;
        self.score_function.score(game)
    }

    /// Decides whether `game` is a leaf of the tree, and if not who moves and how
    ///
    /// A state is a leaf when the depth budget is spent, or when the acting agent has no legal
    /// actions. The second case ignores whatever depth is left.
    pub(crate) fn expand<GameType>(
        &mut self,
        game: &GameType,
        round: Round,
    ) -> Result<Expansion<GameType::Action>, SearchError>
    where
        GameType: MultiAgentGame,
        ScorableType: Scorable<GameType>,
    {
        self.stats.nodes_visited += 1;

        let found = game.num_agents();
        if found != self.num_agents {
            return Err(SearchError::AgentCountChanged {
                expected: self.num_agents,
                found,
            });
        }

        if round.is_horizon(self.depth) {
            return Ok(Expansion::Leaf(self.evaluate(game)));
        }

        let agent = round.acting_agent();
        let actions = game.legal_actions(agent);

        if actions.is_empty() {
            return Ok(Expansion::Leaf(self.evaluate(game)));
        }

        Ok(Expansion::Branch { agent, actions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TreeFixture;

    #[test]
    fn test_horizon_scores_without_asking_for_actions() {
        let fixture = TreeFixture::from_json(include_str!("../fixtures/concrete_scenario.json"));
        let game = fixture.game();
        let score = |g: &crate::test_support::TreeGame| g.score();
        let depth = SearchDepth::try_from(1).unwrap();
        let mut context = SearchContext::new(&score, depth, 2);

        let horizon = Round::root(2).unwrap().next().next();
        match context.expand(&game, horizon).unwrap() {
            Expansion::Leaf(s) => assert_eq!(s, 0.0),
            Expansion::Branch { .. } => panic!("expected a leaf at the horizon"),
        }

        assert_eq!(context.stats.leaf_evaluations, 1);
        assert!(fixture.queried_rounds().is_empty());
    }

    #[test]
    fn test_no_actions_is_a_leaf_regardless_of_depth() {
        let fixture = TreeFixture::from_json(include_str!("../fixtures/early_terminal.json"));
        let game = fixture.game().child("stuck");
        let score = |g: &crate::test_support::TreeGame| g.score();
        let depth = SearchDepth::try_from(5).unwrap();
        let mut context = SearchContext::new(&score, depth, 2);

        match context.expand(&game, Round::root(2).unwrap().next()).unwrap() {
            Expansion::Leaf(s) => assert_eq!(s, 7.0),
            Expansion::Branch { .. } => panic!("expected a terminal leaf"),
        }
    }

    #[test]
    fn test_changing_agent_count_is_an_error() {
        let fixture = TreeFixture::from_json(include_str!("../fixtures/concrete_scenario.json"));
        let game = fixture.game();
        let score = |g: &crate::test_support::TreeGame| g.score();
        let mut context = SearchContext::new(&score, SearchDepth::default(), 3);

        let result = context.expand(&game, Round::root(3).unwrap());

        assert!(matches!(
            result,
            Err(SearchError::AgentCountChanged {
                expected: 3,
                found: 2
            })
        ));
    }
}
