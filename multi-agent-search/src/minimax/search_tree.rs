use std::fmt::Debug;
use text_trees::StringTreeNode;

use crate::AgentIndex;

/// How a node combines the scores of its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The maximizer is acting and takes the highest score
    Max,
    /// An adversary is acting and takes the lowest score
    Min,
    /// An adversary is acting at random, the score is the mean of the children
    Chance,
}

/// What a search produces for every node it visits
///
/// The searches are written once against this trait. Using `f64` keeps only the score, using
/// [SearchTree] keeps the whole explored tree around for inspection.
pub trait SearchRecord<Action>: Sized {
    /// A state that was scored directly by the evaluation function
    fn leaf(score: f64) -> Self;

    /// A state where `agent` acted. `options` holds every child that was explored, in
    /// exploration order, and `score` is the already aggregated value of this node.
    fn node(
        kind: NodeKind,
        agent: AgentIndex,
        options: Vec<(Action, Self)>,
        score: f64,
        alpha_beta_cutoff: bool,
    ) -> Self;

    /// The value of this node
    fn score(&self) -> f64;
}

impl<Action> SearchRecord<Action> for f64 {
    fn leaf(score: f64) -> Self {
        score
    }

    fn node(
        _kind: NodeKind,
        _agent: AgentIndex,
        _options: Vec<(Action, Self)>,
        score: f64,
        _alpha_beta_cutoff: bool,
    ) -> Self {
        score
    }

    fn score(&self) -> f64 {
        *self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// This is returned when explaining a decision
/// It contains all the information we generated about the game tree
pub enum SearchTree<Action> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// How the children were combined
        kind: NodeKind,
        /// Which agent was acting at this node
        agent: AgentIndex,
        /// A 'recursive' look at all the actions under us
        /// At max and min nodes this is sorted so that the first element is the chosen action,
        /// chance nodes keep the order the game listed the actions in
        options: Vec<(Action, Self)>,
        /// The value of this node
        score: f64,
        /// Whether alpha-beta stopped exploring the remaining actions here
        alpha_beta_cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach the maximum depth
    /// or when the acting agent has no legal actions
    Leaf {
        #[allow(missing_docs)]
        score: f64,
    },
}

impl<Action> SearchRecord<Action> for SearchTree<Action> {
    fn leaf(score: f64) -> Self {
        SearchTree::Leaf { score }
    }

    fn node(
        kind: NodeKind,
        agent: AgentIndex,
        mut options: Vec<(Action, Self)>,
        score: f64,
        alpha_beta_cutoff: bool,
    ) -> Self {
        match kind {
            NodeKind::Max => options.sort_by(|(_, a), (_, b)| b.score().total_cmp(&a.score())),
            NodeKind::Min => options.sort_by(|(_, a), (_, b)| a.score().total_cmp(&b.score())),
            NodeKind::Chance => {}
        }

        SearchTree::Node {
            kind,
            agent,
            options,
            score,
            alpha_beta_cutoff,
        }
    }

    fn score(&self) -> f64 {
        SearchTree::score(self)
    }
}

impl<Action> SearchTree<Action> {
    /// Returns the score for this node
    pub fn score(&self) -> f64 {
        match self {
            SearchTree::Node { score, .. } => *score,
            SearchTree::Leaf { score } => *score,
        }
    }
}

impl<Action: Debug> SearchTree<Action> {
    /// The best action at this node, if it is a node where the maximizer acts
    pub fn best_action(&self) -> Option<&Action> {
        match self {
            SearchTree::Node {
                kind: NodeKind::Max,
                options,
                ..
            } => options.first().map(|(action, _)| action),
            _ => None,
        }
    }

    /// Returns all the actions in the 'route' through the game tree that the search expects
    /// This is useful for debugging as it shows each of the moves we and our adversaries make
    ///
    /// The route stops at the first chance node, as there is no single expected action there
    pub fn chosen_route(&self) -> Vec<(AgentIndex, &Action)> {
        match self {
            SearchTree::Leaf { .. } => vec![],
            SearchTree::Node {
                kind: NodeKind::Chance,
                ..
            } => vec![],
            SearchTree::Node { agent, options, .. } => {
                if let Some((action, child)) = options.first() {
                    let mut tail = child.chosen_route();
                    tail.insert(0, (*agent, action));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// Like [SearchTree::chosen_route], but starting with `action` at this node instead of
    /// whichever action happens to be listed first
    ///
    /// Use this to follow the action a tie breaker actually picked. `None` when this is a leaf
    /// or `action` was never explored here.
    pub fn route_after(&self, action: &Action) -> Option<Vec<(AgentIndex, &Action)>>
    where
        Action: PartialEq,
    {
        match self {
            SearchTree::Leaf { .. } => None,
            SearchTree::Node { agent, options, .. } => {
                let (action, child) = options.iter().find(|(a, _)| a == action)?;
                let mut tail = child.chosen_route();
                tail.insert(0, (*agent, action));

                Some(tail)
            }
        }
    }

    /// How many leaves were scored in this tree
    pub fn leaf_count(&self) -> usize {
        match self {
            SearchTree::Leaf { .. } => 1,
            SearchTree::Node { options, .. } => {
                options.iter().map(|(_, child)| child.leaf_count()).sum()
            }
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the score, the acting agent and the action taken at each level
    pub fn to_text_tree(&self) -> String {
        let tree_node = self.to_text_tree_node("root".to_owned());
        format!("{}", tree_node)
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            SearchTree::Leaf { score } => StringTreeNode::new(format!("{} = {}", label, score)),
            SearchTree::Node {
                kind,
                agent,
                options,
                score,
                alpha_beta_cutoff,
            } => {
                let cutoff = if *alpha_beta_cutoff { " (cutoff)" } else { "" };
                let mut node =
                    StringTreeNode::new(format!("{} = {} {:?}{}", label, score, kind, cutoff));
                for (action, result) in options {
                    node.push_node(
                        result.to_text_tree_node(format!("agent {} {:?}", agent, action)),
                    );
                }

                node
            }
        }
    }
}
