use std::fmt::{self, Debug, Display};

use crate::SearchError;

/// Identifies one of the agents taking turns in a game
///
/// Index 0 is always the maximizing agent (the one we are choosing actions for). Every other
/// index is an adversary, and adversaries move in ascending order after the maximizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentIndex(usize);

impl AgentIndex {
    /// The agent we are searching for
    pub const MAXIMIZER: AgentIndex = AgentIndex(0);

    /// Build an index, checking it against the number of agents in the game
    pub fn checked(index: usize, num_agents: usize) -> Result<Self, SearchError> {
        if index < num_agents {
            Ok(AgentIndex(index))
        } else {
            Err(SearchError::AgentOutOfRange {
                agent: index,
                num_agents,
            })
        }
    }

    pub(crate) fn new_unchecked(index: usize) -> Self {
        AgentIndex(index)
    }

    /// The raw index
    pub fn index(&self) -> usize {
        self.0
    }

    /// Is this the agent we are maximizing for?
    pub fn is_maximizer(&self) -> bool {
        self.0 == 0
    }

    /// For adversaries, their position amongst the adversaries (the first adversary is 0)
    pub fn adversary_slot(&self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl Display for AgentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The contract a game has to fulfil to be searched
///
/// The search never mutates a state. Every transition goes through [MultiAgentGame::successor]
/// which hands back a brand new state.
pub trait MultiAgentGame: Sized {
    /// An action one of the agents can take. Only ever compared for equality.
    type Action: Clone + Debug + PartialEq;

    /// How many agents take turns in this game, including the maximizer
    ///
    /// This must stay constant for the duration of a single search.
    fn num_agents(&self) -> usize;

    /// All the actions the given agent may take from this state
    ///
    /// An empty list means this state is terminal for that agent, and the search will score it
    /// directly no matter how much depth it has left.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state reached when `agent` takes `action`
    ///
    /// `action` must be one of [MultiAgentGame::legal_actions] for `agent`, implementations
    /// should return [SearchError::IllegalAction] otherwise.
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Result<Self, SearchError>;
}

/// A game that can report its own score
///
/// This is what the default evaluation function ([crate::state_score]) uses.
pub trait ScoredGame {
    /// The current score of the game, from the point of view of the maximizer
    fn game_score(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TreeFixture;

    #[test]
    fn test_checked_rejects_out_of_range() {
        assert_eq!(AgentIndex::checked(2, 3).unwrap().index(), 2);
        assert_eq!(
            AgentIndex::checked(3, 3),
            Err(SearchError::AgentOutOfRange {
                agent: 3,
                num_agents: 3
            })
        );
    }

    #[test]
    fn test_adversary_slot() {
        assert_eq!(AgentIndex::MAXIMIZER.adversary_slot(), None);
        assert!(AgentIndex::MAXIMIZER.is_maximizer());

        let second_adversary = AgentIndex::checked(2, 3).unwrap();
        assert_eq!(second_adversary.adversary_slot(), Some(1));
        assert!(!second_adversary.is_maximizer());
    }

    #[test]
    fn test_illegal_successor_is_reported() {
        let fixture = TreeFixture::from_json(include_str!("../fixtures/concrete_scenario.json"));
        let game = fixture.game();

        assert_eq!(
            game.successor(AgentIndex::MAXIMIZER, &"Z".to_owned())
                .unwrap_err(),
            SearchError::IllegalAction {
                agent: AgentIndex::MAXIMIZER,
                action: "\"Z\"".to_owned(),
            }
        );
    }
}
