use std::fmt::Debug;

use derivative::Derivative;

use crate::{
    search::{search_root, Expansion, SearchContext},
    Agent, AgentIndex, AgentOptions, Decision, MultiAgentGame, RandomTieBreak, Round, Scorable,
    ScoredGame, SearchAgent, SearchError, TieBreaker,
};

use super::{NodeKind, SearchRecord, SearchTree};

/// Minimax value of `game`, skipping children that can't change the answer
///
/// `alpha` is the best score the maximizer can already guarantee on the path to this node and
/// `beta` the best (lowest) score the adversaries can already guarantee. Both prune on a strict
/// inequality, so any node whose true value lies inside `[alpha, beta]` gets its exact value.
/// A node that gets cut off returns a bound on the far side of the window instead.
pub(crate) fn alpha_beta<GameType, ScorableType, RecordType>(
    context: &mut SearchContext<ScorableType>,
    game: &GameType,
    round: Round,
    mut alpha: f64,
    mut beta: f64,
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

    let is_maximizing = agent.is_maximizer();
    let mut best = if is_maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    let mut options = Vec::with_capacity(actions.len());
    let mut alpha_beta_cutoff = false;

    for action in actions {
        let child = game.successor(agent, &action)?;
        let record: RecordType = alpha_beta(context, &child, round.next(), alpha, beta)?;
        let value = record.score();
        options.push((action, record));

        if is_maximizing {
            best = best.max(value);
            if best > beta {
                alpha_beta_cutoff = true;
                break;
            }

            alpha = alpha.max(best);
        } else {
            best = best.min(value);
            if best < alpha {
                alpha_beta_cutoff = true;
                break;
            }

            beta = beta.min(best);
        }
    }

    let kind = if is_maximizing {
        NodeKind::Max
    } else {
        NodeKind::Min
    };

    Ok(RecordType::node(
        kind,
        agent,
        options,
        best,
        alpha_beta_cutoff,
    ))
}

#[derive(Derivative)]
#[derivative(
    Debug(bound = "TieBreakType: Debug"),
    Clone(bound = "ScorableType: Clone, TieBreakType: Clone")
)]
/// Minimax with Alpha-Beta pruning
///
/// This gives the same scores to the best root actions as [crate::MinimaxAgent], and so picks
/// from exactly the same set of actions, but visits fewer nodes whenever a branch is provably
/// worse than an alternative we've already seen.
pub struct AlphaBetaAgent<
    GameType,
    ScorableType = fn(&GameType) -> f64,
    TieBreakType = RandomTieBreak,
> {
    config: SearchAgent<GameType, ScorableType, TieBreakType>,
}

impl<GameType> AlphaBetaAgent<GameType>
where
    GameType: MultiAgentGame + ScoredGame,
{
    /// Construct a new `AlphaBetaAgent` that scores leaves with the game's own score
    pub fn new(options: AgentOptions) -> Self {
        SearchAgent::new(options).alpha_beta()
    }
}

impl<GameType, ScorableType, TieBreakType> AlphaBetaAgent<GameType, ScorableType, TieBreakType>
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

    /// This runs alpha-beta from `game` and returns the tree that was explored
    ///
    /// Pruned actions are missing from their parent's options, and the parent is flagged with
    /// `alpha_beta_cutoff`.
    pub fn explain(&self, game: &GameType) -> Result<SearchTree<GameType::Action>, SearchError> {
        let (root, _) = search_root(game)?;
        let mut context = SearchContext::new(
            &self.config.score_function,
            self.config.options.depth,
            game.num_agents(),
        );

        alpha_beta(
            &mut context,
            game,
            root,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }
}

impl<GameType, ScorableType, TieBreakType> Agent<GameType>
    for AlphaBetaAgent<GameType, ScorableType, TieBreakType>
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
            .run_decision("alpha_beta", game, |context, game, actions, root| {
                // The root is a max node that keeps every child's value so we can tie break
                // between them afterwards. beta stays unbounded up here.
                let mut alpha = f64::NEG_INFINITY;
                let mut options = Vec::with_capacity(actions.len());

                for action in actions {
                    let child = game.successor(AgentIndex::MAXIMIZER, &action)?;
                    let value: f64 =
                        alpha_beta(context, &child, root.next(), alpha, f64::INFINITY)?;

                    alpha = alpha.max(value);
                    options.push((action, value));
                }

                Ok(options)
            })
    }
}
