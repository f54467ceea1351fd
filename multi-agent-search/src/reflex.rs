use std::fmt::Debug;

use derivative::Derivative;

use crate::{
    Agent, AgentIndex, AgentOptions, Decision, MultiAgentGame, RandomTieBreak, Scorable,
    ScoredGame, SearchAgent, SearchError, TieBreaker,
};

#[derive(Derivative)]
#[derivative(
    Debug(bound = "TieBreakType: Debug"),
    Clone(bound = "ScorableType: Clone, TieBreakType: Clone")
)]
/// Looks a single action ahead
///
/// Each of the maximizer's legal actions is scored by handing the state it leads to straight to
/// the evaluation function. Adversaries are never consulted. Useful as a baseline for the tree
/// searches, and for games where the evaluation function already does the heavy lifting.
pub struct ReflexAgent<GameType, ScorableType = fn(&GameType) -> f64, TieBreakType = RandomTieBreak>
{
    config: SearchAgent<GameType, ScorableType, TieBreakType>,
}

impl<GameType> ReflexAgent<GameType>
where
    GameType: MultiAgentGame + ScoredGame,
{
    /// Construct a new `ReflexAgent` that scores states with the game's own score
    pub fn new(options: AgentOptions) -> Self {
        SearchAgent::new(options).reflex()
    }
}

impl<GameType, ScorableType, TieBreakType> ReflexAgent<GameType, ScorableType, TieBreakType>
where
    GameType: MultiAgentGame,
    ScorableType: Scorable<GameType>,
    TieBreakType: TieBreaker,
{
    pub(crate) fn from_search_agent(
        config: SearchAgent<GameType, ScorableType, TieBreakType>,
    ) -> Self {
        Self { config }
    }
}

impl<GameType, ScorableType, TieBreakType> Agent<GameType>
    for ReflexAgent<GameType, ScorableType, TieBreakType>
where
    GameType: MultiAgentGame,
    ScorableType: Scorable<GameType>,
    TieBreakType: TieBreaker,
{
    fn name(&self) -> &str {
        self.config.options.name
    }

    fn search(&mut self, game: &GameType) -> Result<Decision<GameType::Action>, SearchError> {
        self.config
            .run_decision("reflex", game, |context, game, actions, _root| {
                let mut options = Vec::with_capacity(actions.len());

                for action in actions {
                    let successor = game.successor(AgentIndex::MAXIMIZER, &action)?;
                    context.stats.nodes_visited += 1;
                    let score = context.evaluate(&successor);

                    options.push((action, score));
                }

                Ok(options)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TreeFixture;

    #[test]
    fn test_scores_successors_directly() {
        let fixture = TreeFixture::from_json(
            r#"{
              "agents": 2,
              "root": {
                "children": [
                  ["A", { "score": 8, "children": [["a1", { "score": 0 }]] }],
                  ["B", { "score": 5, "children": [["b1", { "score": 50 }]] }]
                ]
              }
            }"#,
        );
        let mut agent = ReflexAgent::new(AgentOptions::default());

        let decision = agent.search(&fixture.game()).unwrap();

        assert_eq!(decision.action, "A");
        assert_eq!(
            decision.options,
            vec![("A".to_owned(), 8.0), ("B".to_owned(), 5.0)]
        );
        assert_eq!(decision.stats.leaf_evaluations, 2);
        assert_eq!(agent.name(), "search-agent");
    }
}
