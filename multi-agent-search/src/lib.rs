#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate picks the next action for a single 'maximizing' agent that shares a turn based
//! game with one or more adversaries. You provide the game (through the [MultiAgentGame] trait)
//! and a 'scoring' function that turns a game state into an `f64`.
//!
//! Three tree searches are available, all sharing the [Agent] interface:
//!
//! - [MinimaxAgent]: adversaries are assumed to play optimally against us
//! - [AlphaBetaAgent]: the same answers as [MinimaxAgent], but prunes branches that can't matter
//! - [ExpectimaxAgent]: adversaries pick uniformly at random among their legal actions
//!
//! A one step [ReflexAgent] is also provided as a baseline.
//!
//! ```rust
//! use multi_agent_search::{Agent, AgentOptions, SearchAgent, SearchDepth};
//! # use multi_agent_search::{AgentIndex, MultiAgentGame, ScoredGame, SearchError};
//! # #[derive(Debug, Clone)]
//! # struct Counter(i64);
//! # impl MultiAgentGame for Counter {
//! #     type Action = i64;
//! #     fn num_agents(&self) -> usize { 2 }
//! #     fn legal_actions(&self, _agent: AgentIndex) -> Vec<i64> { vec![-1, 1] }
//! #     fn successor(&self, _agent: AgentIndex, action: &i64) -> Result<Self, SearchError> {
//! #         Ok(Counter(self.0 + action))
//! #     }
//! # }
//! # impl ScoredGame for Counter {
//! #     fn game_score(&self) -> f64 { self.0 as f64 }
//! # }
//!
//! let options = AgentOptions {
//!     depth: SearchDepth::try_from(2).unwrap(),
//!     ..Default::default()
//! };
//!
//! let mut agent = SearchAgent::new(options).alpha_beta();
//! let action = agent.decide(&Counter(0)).unwrap();
//!
//! assert_eq!(action, 1);
//! ```

mod agent;
pub use agent::{Agent, AgentOptions, Decision, SearchAgent};

mod error;
pub use error::SearchError;

mod game;
pub use game::{AgentIndex, MultiAgentGame, ScoredGame};

mod round;
pub use round::{Round, SearchDepth};

mod score;
pub use score::{state_score, Scorable};

mod search;
pub use search::SearchStats;

mod tie_break;
pub use tie_break::{FirstTieBreak, RandomTieBreak, TieBreaker};

pub mod minimax;
pub use minimax::{
    AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent, NodeKind, SearchRecord, SearchTree,
};

mod reflex;
pub use reflex::ReflexAgent;

#[cfg(test)]
mod test_support;
