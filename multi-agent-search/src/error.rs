use thiserror::Error;

use crate::AgentIndex;

/// Errors raised when a caller or a game breaks the contract the search relies on
///
/// None of these are recoverable at runtime: they point at a bug in the caller or in the
/// [MultiAgentGame](crate::MultiAgentGame) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    /// The search depth has to be at least one ply
    #[error("search depth must be at least one ply, got {0}")]
    InvalidDepth(usize),

    /// The game reported that nobody is playing
    #[error("the game reports zero agents")]
    NoAgents,

    /// There is nothing for the maximizing agent to choose from
    #[error("agent {agent} has no legal actions at the root of the search")]
    NoLegalActions {
        #[allow(missing_docs)]
        agent: AgentIndex,
    },

    /// An agent index outside of `[0, num_agents)` was used
    #[error("agent {agent} is out of range for a game with {num_agents} agents")]
    AgentOutOfRange {
        #[allow(missing_docs)]
        agent: usize,
        #[allow(missing_docs)]
        num_agents: usize,
    },

    /// `successor` was asked to apply an action that isn't legal for the agent
    #[error("action {action} is not legal for agent {agent}")]
    IllegalAction {
        #[allow(missing_docs)]
        agent: AgentIndex,
        /// Debug rendering of the offending action
        action: String,
    },

    /// The number of agents changed part way through a search
    #[error("expected {expected} agents for the whole search but a state reported {found}")]
    AgentCountChanged {
        #[allow(missing_docs)]
        expected: usize,
        #[allow(missing_docs)]
        found: usize,
    },
}
