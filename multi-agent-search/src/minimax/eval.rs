use std::fmt::Debug;

use derivative::Derivative;

use crate::{
    search::{search_root, Expansion, SearchContext},
    Agent, AgentIndex, AgentOptions, Decision, MultiAgentGame, RandomTieBreak, Round, Scorable,
    ScoredGame, SearchAgent, SearchError, TieBreaker,
};

use super::{Aggregation, NodeKind, SearchRecord, SearchTree};

/// Scores `game` by exploring every action of every agent down to the horizon
///
/// The maximizer takes the best child, adversaries combine their children with `aggregation`.
pub(crate) fn expectiminimax<GameType, ScorableType, RecordType>(
    context: &mut SearchContext<ScorableType>,
    game: &GameType,
    round: Round,
    aggregation: Aggregation,
) -> Result<RecordType, SearchError>
where
    GameType: MultiAgentGame,
    ScorableType: Scorable<GameType>,
    RecordType: SearchRecord<GameType::Action>,
{
    let (agent, actions) = match context.expand(game, round)? {
        Expansion::Leaf(score) => return Ok(RecordType::leaf(score)),
        Expansion::Branch { agent, actions } => (agent, actions),
    };

    let options: Vec<(GameType::Action, RecordType)> =
        explore(context, game, agent, actions, round, aggregation)?;
    let scores = options.iter().map(|(_, record)| record.score());

    let (kind, score) = if agent.is_maximizer() {
        (NodeKind::Max, scores.fold(f64::NEG_INFINITY, f64::max))
    } else {
        (aggregation.node_kind(), aggregation.combine(scores))
    };

    Ok(RecordType::node(kind, agent, options, score, false))
}

/// Applies each of `agent`'s actions and scores the resulting states
fn explore<GameType, ScorableType, RecordType>(
    context: &mut SearchContext<ScorableType>,
    game: &GameType,
    agent: AgentIndex,
    actions: Vec<GameType::Action>,
    round: Round,
    aggregation: Aggregation,
) -> Result<Vec<(GameType::Action, RecordType)>, SearchError>
where
    GameType: MultiAgentGame,
    ScorableType: Scorable<GameType>,
    RecordType: SearchRecord<GameType::Action>,
{
    let mut options = Vec::with_capacity(actions.len());

    for action in actions {
        let child = game.successor(agent, &action)?;
        let record = expectiminimax(context, &child, round.next(), aggregation)?;

        options.push((action, record));
    }

    Ok(options)
}

#[derive(Derivative)]
#[derivative(
    Debug(bound = "TieBreakType: Debug"),
    Clone(bound = "ScorableType: Clone, TieBreakType: Clone")
)]
/// Bounded depth minimax for one maximizer against any number of adversaries
///
/// Every adversary is assumed to play the action that is worst for us. Every node down to the
/// horizon is visited, see [crate::AlphaBetaAgent] for the pruned equivalent.
pub struct MinimaxAgent<
    GameType,
    ScorableType = fn(&GameType) -> f64,
    TieBreakType = RandomTieBreak,
> {
    config: SearchAgent<GameType, ScorableType, TieBreakType>,
}

impl<GameType> MinimaxAgent<GameType>
where
    GameType: MultiAgentGame + ScoredGame,
{
    /// Construct a new `MinimaxAgent` that scores leaves with the game's own score
    pub fn new(options: AgentOptions) -> Self {
        SearchAgent::new(options).minimax()
    }
}

impl<GameType, ScorableType, TieBreakType> MinimaxAgent<GameType, ScorableType, TieBreakType>
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

    /// This runs minimax from `game` and returns the whole tree that was explored
    ///
    /// The root is always a [NodeKind::Max] node, and its first option is a best action.
    pub fn explain(&self, game: &GameType) -> Result<SearchTree<GameType::Action>, SearchError> {
        explain(&self.config, game, Aggregation::Minimum)
    }
}

impl<GameType, ScorableType, TieBreakType> Agent<GameType>
    for MinimaxAgent<GameType, ScorableType, TieBreakType>
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
            .run_decision("minimax", game, |context, game, actions, root| {
                explore(
                    context,
                    game,
                    AgentIndex::MAXIMIZER,
                    actions,
                    root,
                    Aggregation::Minimum,
                )
            })
    }
}

#[derive(Derivative)]
#[derivative(
    Debug(bound = "TieBreakType: Debug"),
    Clone(bound = "ScorableType: Clone, TieBreakType: Clone")
)]
/// Bounded depth expectimax for one maximizer against any number of random adversaries
///
/// Adversaries are modelled as picking uniformly at random among their legal actions, so their
/// nodes score as the mean of their children rather than the minimum.
pub struct ExpectimaxAgent<
    GameType,
    ScorableType = fn(&GameType) -> f64,
    TieBreakType = RandomTieBreak,
> {
    config: SearchAgent<GameType, ScorableType, TieBreakType>,
}

impl<GameType> ExpectimaxAgent<GameType>
where
    GameType: MultiAgentGame + ScoredGame,
{
    /// Construct a new `ExpectimaxAgent` that scores leaves with the game's own score
    pub fn new(options: AgentOptions) -> Self {
        SearchAgent::new(options).expectimax()
    }
}

impl<GameType, ScorableType, TieBreakType> ExpectimaxAgent<GameType, ScorableType, TieBreakType>
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

    /// This runs expectimax from `game` and returns the whole tree that was explored
    pub fn explain(&self, game: &GameType) -> Result<SearchTree<GameType::Action>, SearchError> {
        explain(&self.config, game, Aggregation::Mean)
    }
}

impl<GameType, ScorableType, TieBreakType> Agent<GameType>
    for ExpectimaxAgent<GameType, ScorableType, TieBreakType>
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
            .run_decision("expectimax", game, |context, game, actions, root| {
                explore(
                    context,
                    game,
                    AgentIndex::MAXIMIZER,
                    actions,
                    root,
                    Aggregation::Mean,
                )
            })
    }
}

fn explain<GameType, ScorableType, TieBreakType>(
    config: &SearchAgent<GameType, ScorableType, TieBreakType>,
    game: &GameType,
    aggregation: Aggregation,
) -> Result<SearchTree<GameType::Action>, SearchError>
where
    GameType: MultiAgentGame,
    ScorableType: Scorable<GameType>,
{
    let (root, _) = search_root(game)?;
    let mut context = SearchContext::new(
        &config.score_function,
        config.options.depth,
        game.num_agents(),
    );

    expectiminimax(&mut context, game, root, aggregation)
}
