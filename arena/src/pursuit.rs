use std::{collections::BTreeSet, fmt::Display, sync::Arc};

use itertools::Itertools;
use multi_agent_search::{AgentIndex, MultiAgentGame, ScoredGame, SearchError};

use crate::layout::Walls;

pub(crate) const MOVE_PENALTY: i64 = 1;
pub(crate) const PELLET_REWARD: i64 = 10;
pub(crate) const WIN_REWARD: i64 = 500;
pub(crate) const CAUGHT_PENALTY: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Position {
    pub(crate) x: usize,
    pub(crate) y: usize,
}

impl Position {
    pub(crate) fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The neighbouring position, `None` if it would fall off the top or left edge
    pub(crate) fn step(self, direction: Direction) -> Option<Position> {
        let Position { x, y } = self;

        Some(match direction {
            Direction::North => Position { x, y: y.checked_sub(1)? },
            Direction::South => Position { x, y: y + 1 },
            Direction::East => Position { x: x + 1, y },
            Direction::West => Position { x: x.checked_sub(1)?, y },
            Direction::Stop => self,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    pub(crate) const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };

        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Running,
    Won,
    Lost,
}

/// A runner collecting pellets on a walled grid while chasers try to catch it
///
/// The runner is agent 0 and chaser `i` is agent `i + 1`. Once the runner clears the board or
/// shares a square with a chaser the game is over and nobody has a legal action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pursuit {
    pub(crate) walls: Arc<Walls>,
    pub(crate) runner: Position,
    pub(crate) chasers: Vec<Position>,
    pub(crate) pellets: BTreeSet<Position>,
    pub(crate) score: i64,
    pub(crate) status: Status,
}

impl Pursuit {
    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn score(&self) -> i64 {
        self.score
    }

    pub(crate) fn is_over(&self) -> bool {
        self.status != Status::Running
    }

    fn position_of(&self, agent: AgentIndex) -> Option<Position> {
        match agent.adversary_slot() {
            None => Some(self.runner),
            Some(slot) => self.chasers.get(slot).copied(),
        }
    }

    fn open_moves(&self, from: Position) -> Vec<Direction> {
        Direction::MOVES
            .into_iter()
            .filter(|&direction| {
                from.step(direction)
                    .map_or(false, |to| !self.walls.is_wall(to))
            })
            .collect()
    }

    fn check_caught(&mut self) {
        if self.chasers.contains(&self.runner) {
            self.score -= CAUGHT_PENALTY;
            self.status = Status::Lost;
        }
    }
}

impl MultiAgentGame for Pursuit {
    type Action = Direction;

    fn num_agents(&self) -> usize {
        self.chasers.len() + 1
    }

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        let Some(position) = self.position_of(agent) else {
            return vec![];
        };
        let mut moves = self.open_moves(position);

        if agent.is_maximizer() || moves.is_empty() {
            moves.push(Direction::Stop);
        }

        moves
    }

    fn successor(&self, agent: AgentIndex, action: &Direction) -> Result<Self, SearchError> {
        let agent = AgentIndex::checked(agent.index(), self.num_agents())?;

        if !self.legal_actions(agent).contains(action) {
            return Err(SearchError::IllegalAction {
                agent,
                action: format!("{action:?}"),
            });
        }

        let mut next = self.clone();
        // Legal moves never leave the grid
        let step = |from: Position| from.step(*action).unwrap_or(from);

        match agent.adversary_slot() {
            None => {
                next.runner = step(next.runner);
                next.score -= MOVE_PENALTY;

                if next.pellets.remove(&next.runner) {
                    next.score += PELLET_REWARD;

                    if next.pellets.is_empty() {
                        next.score += WIN_REWARD;
                        next.status = Status::Won;
                        return Ok(next);
                    }
                }
            }
            Some(slot) => {
                next.chasers[slot] = step(next.chasers[slot]);
            }
        }

        next.check_caught();

        Ok(next)
    }
}

impl ScoredGame for Pursuit {
    fn game_score(&self) -> f64 {
        self.score as f64
    }
}

impl Display for Pursuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = (0..self.walls.height).map(|y| {
            (0..self.walls.width)
                .map(|x| {
                    let position = Position { x, y };

                    if self.chasers.contains(&position) {
                        'G'
                    } else if self.runner == position {
                        'P'
                    } else if self.walls.is_wall(position) {
                        '%'
                    } else if self.pellets.contains(&position) {
                        '.'
                    } else {
                        ' '
                    }
                })
                .collect::<String>()
        });

        writeln!(f, "{}", rows.format("\n"))?;
        write!(f, "score: {} ({:?})", self.score, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    fn game(text: &str) -> Pursuit {
        text.parse::<Layout>().unwrap().into_game()
    }

    fn chaser(index: usize) -> AgentIndex {
        AgentIndex::checked(index, 2).unwrap()
    }

    #[test]
    fn test_runner_moves_and_pays_for_it() {
        let game = game("%%%%%%\n%P .G%\n%%%%%%");

        assert_eq!(
            game.legal_actions(AgentIndex::MAXIMIZER),
            vec![Direction::East, Direction::Stop]
        );

        let next = game
            .successor(AgentIndex::MAXIMIZER, &Direction::East)
            .unwrap();

        assert_eq!(next.runner, Position { x: 2, y: 1 });
        assert_eq!(next.score(), -1);
        assert_eq!(next.status(), Status::Running);
    }

    #[test]
    fn test_eating_the_last_pellet_wins() {
        let game = game("%%%%%%\n%P. G%\n%%%%%%");

        let next = game
            .successor(AgentIndex::MAXIMIZER, &Direction::East)
            .unwrap();

        assert_eq!(next.score(), -1 + PELLET_REWARD + WIN_REWARD);
        assert_eq!(next.status(), Status::Won);
        assert!(next.legal_actions(chaser(1)).is_empty());
        assert!(next.legal_actions(AgentIndex::MAXIMIZER).is_empty());
    }

    #[test]
    fn test_chaser_catching_the_runner_loses() {
        let game = game("%%%%%%\n%.PG %\n%%%%%%");

        assert_eq!(
            game.legal_actions(chaser(1)),
            vec![Direction::East, Direction::West]
        );

        let next = game.successor(chaser(1), &Direction::West).unwrap();

        assert_eq!(next.score(), -CAUGHT_PENALTY);
        assert_eq!(next.status(), Status::Lost);
    }

    #[test]
    fn test_runner_walking_into_a_chaser_loses() {
        let game = game("%%%%%%\n%.PG %\n%%%%%%");

        let next = game
            .successor(AgentIndex::MAXIMIZER, &Direction::East)
            .unwrap();

        assert_eq!(next.score(), -MOVE_PENALTY - CAUGHT_PENALTY);
        assert_eq!(next.status(), Status::Lost);
    }

    #[test]
    fn test_boxed_in_chasers_can_only_stop() {
        let game = game("%%%%%\n%P.%G\n%%%%%");

        assert_eq!(game.legal_actions(chaser(1)), vec![Direction::Stop]);
    }

    #[test]
    fn test_illegal_moves_are_rejected() {
        let game = game("%%%%%%\n%P .G%\n%%%%%%");

        assert_eq!(
            game.successor(AgentIndex::MAXIMIZER, &Direction::North),
            Err(SearchError::IllegalAction {
                agent: AgentIndex::MAXIMIZER,
                action: "North".to_owned(),
            })
        );
        assert_eq!(
            game.successor(chaser(1), &Direction::Stop),
            Err(SearchError::IllegalAction {
                agent: chaser(1),
                action: "Stop".to_owned(),
            })
        );
    }

    #[test]
    fn test_display_round_trips_the_board() {
        let text = "%%%%%%\n%P .G%\n%%%%%%";

        assert_eq!(game(text).to_string(), format!("{text}\nscore: 0 (Running)"));
    }
}
