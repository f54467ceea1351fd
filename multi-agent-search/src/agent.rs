use std::{fmt::Debug, marker::PhantomData};

use derivative::Derivative;
use itertools::Itertools;
use tracing::{debug, info_span};

use crate::{
    score::state_score,
    search::{search_root, SearchContext},
    AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent, MultiAgentGame, RandomTieBreak, ReflexAgent,
    Round, Scorable, ScoredGame, SearchDepth, SearchError, SearchStats, TieBreaker,
};

/// A decision procedure for the maximizing agent
///
/// All the agents in this crate share this shape: given a state, return the next action for
/// agent 0.
pub trait Agent<GameType: MultiAgentGame> {
    /// The name this agent reports in traces
    fn name(&self) -> &str;

    /// Choose an action, returning everything we learned along the way
    fn search(&mut self, game: &GameType) -> Result<Decision<GameType::Action>, SearchError>;

    /// Choose an action
    fn decide(&mut self, game: &GameType) -> Result<GameType::Action, SearchError> {
        self.search(game).map(|decision| decision.action)
    }
}

/// The outcome of a single top level decision
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<Action> {
    /// The chosen action
    pub action: Action,
    /// The score of the chosen action
    pub score: f64,
    /// Every root action with the score the search gave it, in the order the game listed them
    ///
    /// For alpha-beta, actions whose subtree was pruned carry an upper bound of their real
    /// value, which is always strictly below [Decision::score].
    pub options: Vec<(Action, f64)>,
    /// Counters for this decision
    pub stats: SearchStats,
}

impl<Action> Decision<Action> {
    /// All the root actions that share the best score. The chosen action is one of these.
    pub fn best_actions(&self) -> Vec<&Action> {
        self.options
            .iter()
            .filter(|(_, score)| *score == self.score)
            .map(|(action, _)| action)
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
/// Construction time settings shared by every agent
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multi_agent_search::AgentOptions;
///
/// let defaults: AgentOptions = Default::default();
///
/// assert_eq!(defaults.depth.plies(), 2);
/// assert_eq!(defaults.name, "search-agent");
/// ```
pub struct AgentOptions {
    /// How many full plies to look ahead before scoring
    ///
    /// Defaults to 2
    pub depth: SearchDepth,
    /// Name reported in traces
    pub name: &'static str,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            depth: SearchDepth::default(),
            name: "search-agent",
        }
    }
}

#[derive(Derivative)]
#[derivative(
    Debug(bound = "TieBreakType: Debug"),
    Clone(bound = "ScorableType: Clone, TieBreakType: Clone")
)]
/// The configuration every agent is built from
///
/// Start from [SearchAgent::new], swap the evaluation function or tie breaking if you need to,
/// and then pick the algorithm.
///
/// ```rust
/// use multi_agent_search::{AgentOptions, FirstTieBreak, SearchAgent};
/// # use multi_agent_search::{AgentIndex, MultiAgentGame, SearchError};
/// # #[derive(Debug, Clone)]
/// # struct Nim(u8);
/// # impl MultiAgentGame for Nim {
/// #     type Action = u8;
/// #     fn num_agents(&self) -> usize { 2 }
/// #     fn legal_actions(&self, _agent: AgentIndex) -> Vec<u8> { (1..=self.0.min(3)).collect() }
/// #     fn successor(&self, _agent: AgentIndex, take: &u8) -> Result<Self, SearchError> {
/// #         Ok(Nim(self.0 - take))
/// #     }
/// # }
///
/// fn stones_left(game: &Nim) -> f64 {
///     game.0 as f64
/// }
///
/// let agent = SearchAgent::with_evaluation(AgentOptions::default(), stones_left)
///     .with_tie_break(FirstTieBreak)
///     .expectimax();
/// ```
pub struct SearchAgent<GameType, ScorableType, TieBreakType = RandomTieBreak> {
    #[derivative(Debug = "ignore")]
    pub(crate) score_function: ScorableType,
    pub(crate) tie_break: TieBreakType,
    pub(crate) options: AgentOptions,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<fn(&GameType)>,
}

impl<GameType: ScoredGame> SearchAgent<GameType, fn(&GameType) -> f64, RandomTieBreak> {
    /// Score leaves with the game's own score and break ties at random
    pub fn new(options: AgentOptions) -> Self {
        Self::with_evaluation(options, state_score::<GameType>)
    }
}

impl<GameType, ScorableType> SearchAgent<GameType, ScorableType, RandomTieBreak>
where
    ScorableType: Scorable<GameType>,
{
    /// Score leaves with the given evaluation function and break ties at random
    pub fn with_evaluation(options: AgentOptions, score_function: ScorableType) -> Self {
        Self {
            score_function,
            tie_break: RandomTieBreak::from_entropy(),
            options,
            _phantom: PhantomData,
        }
    }
}

impl<GameType, ScorableType, TieBreakType> SearchAgent<GameType, ScorableType, TieBreakType>
where
    GameType: MultiAgentGame,
    ScorableType: Scorable<GameType>,
    TieBreakType: TieBreaker,
{
    /// Replace the evaluation function
    pub fn with_score_function<NewScorable: Scorable<GameType>>(
        self,
        score_function: NewScorable,
    ) -> SearchAgent<GameType, NewScorable, TieBreakType> {
        SearchAgent {
            score_function,
            tie_break: self.tie_break,
            options: self.options,
            _phantom: PhantomData,
        }
    }

    /// Replace the tie breaking strategy used at the root
    pub fn with_tie_break<NewTieBreak: TieBreaker>(
        self,
        tie_break: NewTieBreak,
    ) -> SearchAgent<GameType, ScorableType, NewTieBreak> {
        SearchAgent {
            score_function: self.score_function,
            tie_break,
            options: self.options,
            _phantom: PhantomData,
        }
    }

    /// The options this agent was built with
    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Full tree minimax, adversaries minimize
    pub fn minimax(self) -> MinimaxAgent<GameType, ScorableType, TieBreakType> {
        MinimaxAgent::from_search_agent(self)
    }

    /// Minimax with alpha-beta pruning
    pub fn alpha_beta(self) -> AlphaBetaAgent<GameType, ScorableType, TieBreakType> {
        AlphaBetaAgent::from_search_agent(self)
    }

    /// Full tree search where adversaries act uniformly at random
    pub fn expectimax(self) -> ExpectimaxAgent<GameType, ScorableType, TieBreakType> {
        ExpectimaxAgent::from_search_agent(self)
    }

    /// One step lookahead, the depth option is ignored
    pub fn reflex(self) -> ReflexAgent<GameType, ScorableType, TieBreakType> {
        ReflexAgent::from_search_agent(self)
    }

    /// Runs one top level decision
    ///
    /// Checks the root, sets up the trace span, hands the root actions to `score_root` and then
    /// picks among the best scored actions with the tie breaker.
    pub(crate) fn run_decision<F>(
        &mut self,
        algorithm: &'static str,
        game: &GameType,
        score_root: F,
    ) -> Result<Decision<GameType::Action>, SearchError>
    where
        F: FnOnce(
            &mut SearchContext<ScorableType>,
            &GameType,
            Vec<GameType::Action>,
            Round,
        ) -> Result<Vec<(GameType::Action, f64)>, SearchError>,
    {
        let num_agents = game.num_agents();

        let span = info_span!(
            "decide",
            agent = self.options.name,
            algorithm,
            depth = self.options.depth.plies(),
            num_agents,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            leaf_evaluations = tracing::field::Empty,
            nodes_visited = tracing::field::Empty,
        );
        let _guard = span.enter();

        let (root, actions) = search_root(game)?;

        let mut context = SearchContext::new(&self.score_function, self.options.depth, num_agents);
        context.stats.nodes_visited += 1;

        let options = score_root(&mut context, game, actions, root)?;
        let stats = context.stats;

        for (action, score) in &options {
            debug!(?action, score, "scored root action");
        }

        let (action, score) = pick_best(&options, &mut self.tie_break);

        span.record("chosen_score", score);
        span.record("chosen_action", format!("{action:?}").as_str());
        span.record("leaf_evaluations", stats.leaf_evaluations);
        span.record("nodes_visited", stats.nodes_visited);

        Ok(Decision {
            action,
            score,
            options,
            stats,
        })
    }
}

/// The best score among `options`, and one action that achieves it chosen by `tie_break`
///
/// `options` is never empty. NaN scores never count as the best, unless every score is NaN in
/// which case all of them are tied.
fn pick_best<Action: Clone>(
    options: &[(Action, f64)],
    tie_break: &mut impl TieBreaker,
) -> (Action, f64) {
    debug_assert!(!options.is_empty());

    let best = options
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut tied = options
        .iter()
        .filter(|(_, score)| *score == best)
        .collect_vec();
    if tied.is_empty() {
        tied = options.iter().collect_vec();
    }

    if tied.len() > 1 {
        debug!(tied = tied.len(), best, "breaking a tie between root actions");
    }

    let (action, score) = tied[tie_break.pick(tied.len()).min(tied.len() - 1)];

    (action.clone(), *score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FirstTieBreak;

    #[test]
    fn test_pick_best_takes_the_maximum() {
        let options = vec![("a", 1.0), ("b", 3.0), ("c", 2.0)];

        assert_eq!(pick_best(&options, &mut FirstTieBreak), ("b", 3.0));
    }

    #[test]
    fn test_pick_best_only_picks_among_ties() {
        let options = vec![("a", 5.0), ("b", 1.0), ("c", 5.0)];
        let mut tie_break = RandomTieBreak::seeded(3);

        let mut chosen = (0..50)
            .map(|_| pick_best(&options, &mut tie_break).0)
            .collect_vec();
        chosen.sort();
        chosen.dedup();

        assert_eq!(chosen, vec!["a", "c"]);
    }

    #[test]
    fn test_pick_best_survives_nan_scores() {
        let options = vec![("a", 1.0), ("b", f64::NAN), ("c", 2.0)];
        assert_eq!(pick_best(&options, &mut FirstTieBreak), ("c", 2.0));

        let all_nan = vec![("a", f64::NAN), ("b", f64::NAN)];
        let (action, score) = pick_best(&all_nan, &mut FirstTieBreak);

        assert_eq!(action, "a");
        assert!(score.is_nan());
    }

    #[test]
    fn test_best_actions() {
        let decision = Decision {
            action: "c",
            score: 5.0,
            options: vec![("a", 5.0), ("b", 1.0), ("c", 5.0)],
            stats: SearchStats::default(),
        };

        assert_eq!(decision.best_actions(), vec![&"a", &"c"]);
    }
}
