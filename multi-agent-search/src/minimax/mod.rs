//! The tree searches. They all treat the game as the maximizer (agent 0) followed by each
//! adversary in ascending order, over and over, until the depth budget is spent.
//!
//! Depth is counted in full plies: with `N` agents and a depth of `D` the search takes `N * D`
//! single agent turns before handing the state to the evaluation function. A state where the
//! acting agent has no legal actions is scored immediately, whatever depth remains.
//!
//! Scores always come from the maximizer's point of view. When propagating scores up the tree
//! the maximizer takes the highest score, and adversaries either take the lowest
//! ([MinimaxAgent], [AlphaBetaAgent]) or the average ([ExpectimaxAgent]).
//!
//! ```rust
//! use multi_agent_search::{AgentOptions, FirstTieBreak, SearchAgent, SearchTree};
//! # use multi_agent_search::{AgentIndex, MultiAgentGame, ScoredGame, SearchError};
//! # #[derive(Debug, Clone)]
//! # struct Tally(Vec<i32>);
//! # impl MultiAgentGame for Tally {
//! #     type Action = i32;
//! #     fn num_agents(&self) -> usize { 2 }
//! #     fn legal_actions(&self, agent: AgentIndex) -> Vec<i32> {
//! #         if agent.is_maximizer() { vec![1, 2] } else { vec![0, -3] }
//! #     }
//! #     fn successor(&self, _agent: AgentIndex, action: &i32) -> Result<Self, SearchError> {
//! #         let mut next = self.0.clone();
//! #         next.push(*action);
//! #         Ok(Tally(next))
//! #     }
//! # }
//! # impl ScoredGame for Tally {
//! #     fn game_score(&self) -> f64 { self.0.iter().sum::<i32>() as f64 }
//! # }
//!
//! let agent = SearchAgent::new(AgentOptions::default())
//!     .with_tie_break(FirstTieBreak)
//!     .minimax();
//!
//! // The explored tree can be printed, and shows the line of play the search expects
//! let tree: SearchTree<i32> = agent.explain(&Tally(vec![])).unwrap();
//! println!("{}", tree.to_text_tree());
//!
//! assert_eq!(tree.best_action(), Some(&2));
//! assert_eq!(tree.score(), -2.0);
//! ```

mod search_tree;
pub use search_tree::{NodeKind, SearchRecord, SearchTree};

mod eval;
pub use eval::{ExpectimaxAgent, MinimaxAgent};

mod alpha_beta;
pub use alpha_beta::AlphaBetaAgent;

/// How adversary nodes combine the scores of their children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Aggregation {
    /// Adversaries play optimally against us
    Minimum,
    /// Adversaries pick uniformly at random
    Mean,
}

impl Aggregation {
    pub(crate) fn node_kind(self) -> NodeKind {
        match self {
            Aggregation::Minimum => NodeKind::Min,
            Aggregation::Mean => NodeKind::Chance,
        }
    }

    /// Combines a non empty set of child scores
    pub(crate) fn combine(self, scores: impl Iterator<Item = f64>) -> f64 {
        match self {
            Aggregation::Minimum => scores.fold(f64::INFINITY, f64::min),
            Aggregation::Mean => {
                let (total, count) = scores.fold((0.0, 0usize), |(total, count), score| {
                    (total + score, count + 1)
                });

                total / count as f64
            }
        }
    }
}
