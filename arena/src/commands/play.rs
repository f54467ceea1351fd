use color_eyre::eyre::{eyre, Result};
use multi_agent_search::{Agent, AgentIndex, MultiAgentGame, SearchStats};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::{
    agents::SearchArgs,
    chasers::ChaserPolicy,
    pursuit::{Pursuit, Status},
};

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    #[clap(flatten)]
    search: SearchArgs,

    /// Number of games to play
    #[clap(short = 'n', long, value_parser, default_value_t = 1)]
    games: usize,

    /// Stop a game that is still going after this many runner moves
    #[clap(long, value_parser, default_value_t = 200)]
    max_turns: usize,

    /// How the chasers actually move
    #[clap(short, long, value_enum, default_value_t = ChaserPolicy::Directional)]
    chasers: ChaserPolicy,

    /// Print the board after every round
    #[clap(long)]
    show_board: bool,

    /// Print the summary as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Won,
    Lost,
    Timeout,
}

#[derive(Debug, Clone, Serialize)]
struct GameRecord {
    game: usize,
    outcome: Outcome,
    score: i64,
    turns: usize,
    leaf_evaluations: usize,
    nodes_visited: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    agent: &'static str,
    depth: usize,
    games: Vec<GameRecord>,
    wins: usize,
    average_score: f64,
}

impl Summary {
    fn new(agent: &'static str, depth: usize, games: Vec<GameRecord>) -> Self {
        let wins = games
            .iter()
            .filter(|record| record.outcome == Outcome::Won)
            .count();
        let average_score = if games.is_empty() {
            0.0
        } else {
            games.iter().map(|record| record.score as f64).sum::<f64>() / games.len() as f64
        };

        Self {
            agent,
            depth,
            games,
            wins,
            average_score,
        }
    }
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let mut rng = match self.search.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let options = self.search.options()?;

        let records = (0..self.games)
            .map(|index| {
                let mut agent = self.search.agent(Some(rng.gen()))?;
                self.play_one(index, agent.as_mut(), &mut rng)
            })
            .collect::<Result<Vec<_>>>()?;

        let summary = Summary::new(self.search.agent.name(), options.depth.plies(), records);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            for record in &summary.games {
                println!(
                    "Game {}: {:?} with score {} after {} turns ({} leaves evaluated)",
                    record.game, record.outcome, record.score, record.turns, record.leaf_evaluations
                );
            }
            println!(
                "{} at depth {} won {}/{} games, average score {:.1}",
                summary.agent,
                summary.depth,
                summary.wins,
                summary.games.len(),
                summary.average_score
            );
        }

        Ok(())
    }

    fn play_one(
        &self,
        index: usize,
        agent: &mut dyn Agent<Pursuit>,
        rng: &mut StdRng,
    ) -> Result<GameRecord> {
        let span = info_span!("game", game = index);
        let _guard = span.enter();

        let mut game = self.search.game()?;
        let mut stats = SearchStats::default();
        let mut turns = 0;

        while !game.is_over() && turns < self.max_turns {
            let decision = agent.search(&game)?;
            stats += decision.stats;
            debug!(turn = turns, action = %decision.action, score = decision.score, "runner moved");

            game = game.successor(AgentIndex::MAXIMIZER, &decision.action)?;
            turns += 1;

            for chaser_index in 1..game.num_agents() {
                if game.is_over() {
                    break;
                }

                let chaser = AgentIndex::checked(chaser_index, game.num_agents())?;
                let action = self
                    .chasers
                    .choose(&game, chaser, rng)
                    .ok_or_else(|| eyre!("Chaser {chaser} had no moves"))?;
                game = game.successor(chaser, &action)?;
            }

            if self.show_board {
                println!("{game}\n");
            }
        }

        let outcome = match game.status() {
            Status::Won => Outcome::Won,
            Status::Lost => Outcome::Lost,
            Status::Running => Outcome::Timeout,
        };
        info!(?outcome, score = game.score(), turns, "game finished");

        Ok(GameRecord {
            game: index,
            outcome,
            score: game.score(),
            turns,
            leaf_evaluations: stats.leaf_evaluations,
            nodes_visited: stats.nodes_visited,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: Outcome, score: i64) -> GameRecord {
        GameRecord {
            game: 0,
            outcome,
            score,
            turns: 10,
            leaf_evaluations: 0,
            nodes_visited: 0,
        }
    }

    #[test]
    fn test_summary_counts_wins_and_averages() {
        let summary = Summary::new(
            "minimax",
            2,
            vec![record(Outcome::Won, 520), record(Outcome::Lost, -510)],
        );

        assert_eq!(summary.wins, 1);
        assert_eq!(summary.average_score, 5.0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["games"][1]["outcome"], "lost");
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::new("reflex", 1, vec![]);

        assert_eq!(summary.wins, 0);
        assert_eq!(summary.average_score, 0.0);
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        use clap::Parser;

        #[derive(Parser, Debug)]
        struct Cli {
            #[clap(flatten)]
            play: Play,
        }

        let play = || {
            let cli = Cli::try_parse_from([
                "arena", "--seed", "11", "--agent", "expectimax", "--max-turns", "30",
            ])
            .unwrap();
            let mut agent = cli.play.search.agent(Some(5)).unwrap();
            let mut rng = StdRng::seed_from_u64(11);

            cli.play.play_one(0, agent.as_mut(), &mut rng).unwrap()
        };

        let first = play();
        let second = play();

        assert_eq!(first.score, second.score);
        assert_eq!(first.turns, second.turns);
        assert_eq!(first.outcome, second.outcome);
        assert!(first.turns <= 30);
    }
}
