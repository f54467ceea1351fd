use std::{fs::read_to_string, path::PathBuf};

use clap::ValueEnum;
use color_eyre::eyre::{Result, WrapErr};
use multi_agent_search::{Agent, AgentOptions, RandomTieBreak, SearchAgent, SearchDepth};

use crate::{
    evaluation::EvaluationKind,
    layout::{BuiltinLayout, Layout},
    pursuit::Pursuit,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum AgentKind {
    /// Adversaries play perfectly against the runner
    Minimax,
    /// Minimax, pruned
    AlphaBeta,
    /// Adversaries move uniformly at random
    Expectimax,
    /// Only looks at the runner's next move
    Reflex,
}

impl AgentKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            AgentKind::Minimax => "minimax",
            AgentKind::AlphaBeta => "alpha-beta",
            AgentKind::Expectimax => "expectimax",
            AgentKind::Reflex => "reflex",
        }
    }
}

pub(crate) type PursuitConfig = SearchAgent<Pursuit, fn(&Pursuit) -> f64>;

/// The options shared by every command that runs a search
#[derive(clap::Args, Debug)]
pub(crate) struct SearchArgs {
    /// Which agent controls the runner
    #[clap(short, long, value_enum, default_value_t = AgentKind::AlphaBeta)]
    pub(crate) agent: AgentKind,

    /// How many full plies to search
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,

    /// How the agent scores the states at the bottom of its search
    #[clap(short, long, value_enum, default_value_t = EvaluationKind::Score)]
    evaluation: EvaluationKind,

    /// Seed for tie breaking and chaser moves. Seeded from the OS if not specified
    #[clap(short, long, value_parser)]
    pub(crate) seed: Option<u64>,

    /// Built in layout to play on
    #[clap(short, long, value_enum, default_value_t = BuiltinLayout::Small)]
    layout: BuiltinLayout,

    /// Read the layout from a file instead. Takes priority over --layout
    #[clap(long, value_parser)]
    layout_file: Option<PathBuf>,
}

impl SearchArgs {
    pub(crate) fn options(&self) -> Result<AgentOptions> {
        let depth = SearchDepth::try_from(self.depth).wrap_err("Invalid --depth")?;

        Ok(AgentOptions {
            depth,
            name: self.agent.name(),
        })
    }

    pub(crate) fn game(&self) -> Result<Pursuit> {
        let layout: Layout = match &self.layout_file {
            Some(path) => read_to_string(path)
                .wrap_err_with(|| format!("Couldn't read layout file {}", path.display()))?
                .parse::<Layout>()
                .wrap_err_with(|| format!("Couldn't parse layout file {}", path.display()))?,
            None => self.layout.layout()?,
        };

        Ok(layout.into_game())
    }

    /// Agent configuration before the algorithm is picked
    pub(crate) fn config(&self, tie_break_seed: Option<u64>) -> Result<PursuitConfig> {
        let config: PursuitConfig =
            SearchAgent::with_evaluation(self.options()?, self.evaluation.function());

        Ok(match tie_break_seed {
            Some(seed) => config.with_tie_break(RandomTieBreak::seeded(seed)),
            None => config,
        })
    }

    pub(crate) fn agent(&self, tie_break_seed: Option<u64>) -> Result<Box<dyn Agent<Pursuit>>> {
        let config = self.config(tie_break_seed)?;

        Ok(match self.agent {
            AgentKind::Minimax => Box::new(config.minimax()),
            AgentKind::AlphaBeta => Box::new(config.alpha_beta()),
            AgentKind::Expectimax => Box::new(config.expectimax()),
            AgentKind::Reflex => Box::new(config.reflex()),
        })
    }
}
