use std::num::NonZeroUsize;

use crate::{AgentIndex, SearchError};

/// How many full plies to explore before falling back to the evaluation function
///
/// One ply is every agent (the maximizer and each adversary) moving exactly once.
///
/// ```
/// use multi_agent_search::SearchDepth;
///
/// assert_eq!(SearchDepth::default().plies(), 2);
/// assert!(SearchDepth::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchDepth(NonZeroUsize);

impl SearchDepth {
    /// The number of plies
    pub fn plies(&self) -> usize {
        self.0.get()
    }

    /// The round at which the search stops expanding and scores the state instead
    pub fn horizon(&self, num_agents: usize) -> usize {
        self.plies() * num_agents
    }
}

impl Default for SearchDepth {
    fn default() -> Self {
        SearchDepth(NonZeroUsize::new(2).expect("2 is not zero"))
    }
}

impl TryFrom<usize> for SearchDepth {
    type Error = SearchError;

    fn try_from(plies: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(plies)
            .map(SearchDepth)
            .ok_or(SearchError::InvalidDepth(plies))
    }
}

/// A count of single agent turns taken since the root of the search
///
/// The root is round 0, and the acting agent at any round is `round mod num_agents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    index: usize,
    num_agents: usize,
}

impl Round {
    /// The round at the root of the search, where the maximizer acts
    pub fn root(num_agents: usize) -> Result<Self, SearchError> {
        if num_agents == 0 {
            return Err(SearchError::NoAgents);
        }

        Ok(Self {
            index: 0,
            num_agents,
        })
    }

    /// The round after this one
    pub fn next(self) -> Self {
        Self {
            index: self.index + 1,
            ..self
        }
    }

    /// Turns taken since the root
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of agents that were playing when the search started
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// The agent whose turn it is this round
    pub fn acting_agent(&self) -> AgentIndex {
        AgentIndex::new_unchecked(self.index % self.num_agents)
    }

    /// The number of complete plies played before this round
    pub fn ply(&self) -> usize {
        self.index / self.num_agents
    }

    /// Whether the search has used up all of `depth` and must score here
    pub fn is_horizon(&self, depth: SearchDepth) -> bool {
        let horizon = depth.horizon(self.num_agents);
        debug_assert!(self.index <= horizon, "searched past the horizon");

        self.index == horizon
    }
}
