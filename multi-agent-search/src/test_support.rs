//! Explicit game trees for exercising the searches
//!
//! Each node lists the actions available to whoever is acting at that depth, so the tree itself
//! decides who moves where. Every query and every evaluation is recorded for later assertions.

use std::cell::RefCell;

use rand::{rngs::StdRng, Rng};
use serde::Deserialize;

use crate::{AgentIndex, MultiAgentGame, ScoredGame, SearchError};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TreeNode {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    children: Vec<(String, TreeNode)>,
}

impl TreeNode {
    fn random(rng: &mut StdRng, levels_left: usize, is_root: bool) -> Self {
        let score = rng.gen_range(0..10) as f64;

        if levels_left == 0 {
            return TreeNode {
                score,
                children: vec![],
            };
        }

        let branching = if is_root {
            rng.gen_range(1..=3)
        } else {
            rng.gen_range(0..=3)
        };

        let children = (0..branching)
            .map(|i| (i.to_string(), TreeNode::random(rng, levels_left - 1, false)))
            .collect();

        TreeNode { score, children }
    }

    fn full(rng: &mut StdRng, levels_left: usize, branching: usize) -> Self {
        let score = rng.gen_range(0..10) as f64;
        let children = if levels_left == 0 {
            vec![]
        } else {
            (0..branching)
                .map(|i| (i.to_string(), TreeNode::full(rng, levels_left - 1, branching)))
                .collect()
        };

        TreeNode { score, children }
    }
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    agents: usize,
    root: TreeNode,
}

#[derive(Debug)]
pub(crate) struct TreeFixture {
    agents: usize,
    root: TreeNode,
    queries: RefCell<Vec<(usize, usize)>>,
    evaluations: RefCell<Vec<(String, usize)>>,
}

impl TreeFixture {
    pub(crate) fn from_json(json: &str) -> Self {
        let file: FixtureFile = serde_json::from_str(json).unwrap();

        Self::new(file.agents, file.root)
    }

    /// A random tree deep enough to reach the horizon of `plies` plies
    pub(crate) fn random(rng: &mut StdRng, agents: usize, plies: usize) -> Self {
        let root = TreeNode::random(rng, agents * plies, true);

        Self::new(agents, root)
    }

    /// A tree where every node down to `levels` has exactly `branching` children
    pub(crate) fn full(rng: &mut StdRng, agents: usize, levels: usize, branching: usize) -> Self {
        Self::new(agents, TreeNode::full(rng, levels, branching))
    }

    fn new(agents: usize, root: TreeNode) -> Self {
        Self {
            agents,
            root,
            queries: RefCell::new(vec![]),
            evaluations: RefCell::new(vec![]),
        }
    }

    pub(crate) fn game(&self) -> TreeGame<'_> {
        TreeGame {
            fixture: self,
            node: &self.root,
            path: String::new(),
            round: 0,
        }
    }

    /// `(round, agent)` for every call to `legal_actions`
    pub(crate) fn queried_rounds(&self) -> Vec<(usize, usize)> {
        self.queries.borrow().clone()
    }

    /// `(path, round)` for every leaf that went through [TreeGame::evaluate]
    pub(crate) fn evaluations(&self) -> Vec<(String, usize)> {
        self.evaluations.borrow().clone()
    }

    pub(crate) fn evaluated_paths(&self) -> Vec<String> {
        self.evaluations
            .borrow()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TreeGame<'a> {
    fixture: &'a TreeFixture,
    node: &'a TreeNode,
    path: String,
    round: usize,
}

impl<'a> TreeGame<'a> {
    pub(crate) fn score(&self) -> f64 {
        self.node.score
    }

    /// Scores the node and records that it was scored
    pub(crate) fn evaluate(&self) -> f64 {
        self.fixture
            .evaluations
            .borrow_mut()
            .push((self.path.clone(), self.round));

        self.node.score
    }

    pub(crate) fn child(&self, label: &str) -> TreeGame<'a> {
        let (_, node) = self
            .node
            .children
            .iter()
            .find(|(l, _)| l == label)
            .unwrap_or_else(|| panic!("no child {label} under {}", self.path));

        TreeGame {
            fixture: self.fixture,
            node,
            path: format!("{}/{}", self.path, label),
            round: self.round + 1,
        }
    }
}

impl<'a> MultiAgentGame for TreeGame<'a> {
    type Action = String;

    fn num_agents(&self) -> usize {
        self.fixture.agents
    }

    fn legal_actions(&self, agent: AgentIndex) -> Vec<String> {
        self.fixture
            .queries
            .borrow_mut()
            .push((self.round, agent.index()));

        self.node.children.iter().map(|(l, _)| l.clone()).collect()
    }

    fn successor(&self, agent: AgentIndex, action: &String) -> Result<Self, SearchError> {
        if !self.node.children.iter().any(|(l, _)| l == action) {
            return Err(SearchError::IllegalAction {
                agent,
                action: format!("{action:?}"),
            });
        }

        Ok(self.child(action))
    }
}

impl<'a> ScoredGame for TreeGame<'a> {
    fn game_score(&self) -> f64 {
        self.node.score
    }
}
