use color_eyre::eyre::{eyre, Result};
use itertools::Itertools;
use multi_agent_search::{AgentIndex, Decision, SearchTree};

use crate::{
    agents::{AgentKind, SearchArgs},
    pursuit::{Direction, Pursuit},
};

#[derive(clap::Args, Debug)]
pub(crate) struct Explain {
    #[clap(flatten)]
    search: SearchArgs,

    /// Skip printing the full search tree
    #[clap(long)]
    no_tree: bool,
}

/// One decision along with the tree behind it
#[derive(Debug)]
struct Explanation {
    decision: Decision<Direction>,
    tree: Option<SearchTree<Direction>>,
    /// The line of play through the action that was actually chosen
    route: Option<Vec<(AgentIndex, Direction)>>,
}

impl Explain {
    pub(crate) fn run(self) -> Result<()> {
        let game = self.search.game()?;
        println!("{game}\n");

        let Explanation {
            decision,
            tree,
            route,
        } = self.explain(&game)?;

        if let Some(tree) = &tree {
            if !self.no_tree {
                println!("{}", tree.to_text_tree());
            }
        }

        match &route {
            Some(route) => print_route(route),
            None => println!("{} only looks one move ahead\n", self.search.agent.name()),
        }

        for (action, score) in &decision.options {
            println!("{action}: {score}");
        }
        println!(
            "Chose {} with score {}, best were [{}]",
            decision.action,
            decision.score,
            decision.best_actions().iter().join(", ")
        );
        println!(
            "{} leaves evaluated, {} nodes visited",
            decision.stats.leaf_evaluations, decision.stats.nodes_visited
        );

        Ok(())
    }

    fn explain(&self, game: &Pursuit) -> Result<Explanation> {
        let mut agent = self.search.agent(self.search.seed)?;
        let decision = agent.search(game)?;
        let tree = self.tree(game)?;

        // The tree lists tied actions in a fixed order, follow the one the tie breaker chose
        let route = match &tree {
            Some(tree) => Some(
                tree.route_after(&decision.action)
                    .ok_or_else(|| eyre!("{} is missing from the search tree", decision.action))?
                    .into_iter()
                    .map(|(agent, direction)| (agent, *direction))
                    .collect_vec(),
            ),
            None => None,
        };

        Ok(Explanation {
            decision,
            tree,
            route,
        })
    }

    fn tree(&self, game: &Pursuit) -> Result<Option<SearchTree<Direction>>> {
        let config = self.search.config(self.search.seed)?;

        Ok(match self.search.agent {
            AgentKind::Minimax => Some(config.minimax().explain(game)?),
            AgentKind::AlphaBeta => Some(config.alpha_beta().explain(game)?),
            AgentKind::Expectimax => Some(config.expectimax().explain(game)?),
            AgentKind::Reflex => None,
        })
    }
}

/// Prints the line of play the search expects, one row per agent
fn print_route(route: &[(AgentIndex, Direction)]) {
    let agents = route
        .iter()
        .map(|(agent, _)| *agent)
        .unique()
        .sorted()
        .collect_vec();

    println!(
        "Expected line of play, {} single agent moves:",
        route.len()
    );
    for agent in agents {
        let path = route
            .iter()
            .filter(|(a, _)| *a == agent)
            .map(|(_, direction)| direction)
            .join(", ");
        println!("agent {agent}: {path}");
    }
    println!()
}
