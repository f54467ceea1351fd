use clap::ValueEnum;
use itertools::Itertools;
use multi_agent_search::{AgentIndex, MultiAgentGame};
use rand::{seq::SliceRandom, Rng};

use crate::pursuit::{Direction, Pursuit};

/// How likely a directional chaser is to take a move that gets it closer to the runner
const ATTACK_PROBABILITY: f64 = 0.8;

/// How the chasers pick their moves when playing a match
///
/// The search agents assume chasers are out to get them (or random, for expectimax). These are
/// what the chasers actually do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ChaserPolicy {
    /// Every legal move is equally likely
    Random,
    /// Usually moves towards the runner
    Directional,
}

impl ChaserPolicy {
    pub(crate) fn choose(
        self,
        game: &Pursuit,
        agent: AgentIndex,
        rng: &mut impl Rng,
    ) -> Option<Direction> {
        let actions = game.legal_actions(agent);
        let slot = agent.adversary_slot()?;
        let from = *game.chasers.get(slot)?;

        match self {
            ChaserPolicy::Random => actions.choose(rng).copied(),
            ChaserPolicy::Directional => {
                if !rng.gen_bool(ATTACK_PROBABILITY) {
                    return actions.choose(rng).copied();
                }

                let distance_after = |direction: &Direction| {
                    from.step(*direction)
                        .map(|to| to.manhattan(game.runner))
                        .unwrap_or(usize::MAX)
                };
                let shortest = actions.iter().map(distance_after).min()?;
                let closest = actions
                    .iter()
                    .copied()
                    .filter(|direction| distance_after(direction) == shortest)
                    .collect_vec();

                closest.choose(rng).copied()
            }
        }
    }
}
