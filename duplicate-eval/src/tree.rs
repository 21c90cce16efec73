//! The `BettingTree`/`Node` external collaborator (spec.md §3, §6): the
//! node accessor set the Tree Walker drives. spec.md places the real
//! disk-backed betting tree out of scope; this module is an arena-backed
//! concrete tree (`Vec<NodeData>`, `Rc`-shared so both strategies can own a
//! handle to the same tree cheaply), with `NodeRef` as the cursor type.

use std::rc::Rc;

use crate::game::Street;

#[derive(Debug, Clone)]
pub struct NodeData {
    pub terminal: bool,
    pub street: Street,
    pub player_acting: usize,
    /// `Some(pot_at_showdown)` distinguishes a showdown terminal from a
    /// fold terminal, where this is `None`.
    pub showdown: bool,
    pub last_bet_to: i32,
    pub nonterminal_id: u32,
    pub terminal_id: u32,
    /// Indices into the owning `BettingTree`'s node arena, one per action.
    pub succs: Vec<usize>,
    pub call_succ_index: Option<usize>,
    pub fold_succ_index: Option<usize>,
    pub default_succ_index: usize,
    pub action_names: Vec<String>,
}

impl NodeData {
    fn terminal_fold(street: Street, terminal_id: u32, last_bet_to: i32) -> Self {
        NodeData {
            terminal: true,
            street,
            player_acting: 0,
            showdown: false,
            last_bet_to,
            nonterminal_id: 0,
            terminal_id,
            succs: vec![],
            call_succ_index: None,
            fold_succ_index: None,
            default_succ_index: 0,
            action_names: vec![],
        }
    }

    fn terminal_showdown(street: Street, terminal_id: u32, last_bet_to: i32) -> Self {
        NodeData {
            showdown: true,
            ..NodeData::terminal_fold(street, terminal_id, last_bet_to)
        }
    }
}

#[derive(Debug)]
pub struct BettingTree {
    nodes: Vec<NodeData>,
    root: usize,
}

impl BettingTree {
    pub fn root(self: &Rc<Self>) -> NodeRef {
        NodeRef {
            tree: self.clone(),
            idx: self.root,
        }
    }
}

#[derive(Clone)]
pub struct NodeRef {
    tree: Rc<BettingTree>,
    idx: usize,
}

impl NodeRef {
    fn data(&self) -> &NodeData {
        &self.tree.nodes[self.idx]
    }

    pub fn terminal(&self) -> bool {
        self.data().terminal
    }

    pub fn showdown(&self) -> bool {
        self.data().showdown
    }

    pub fn street(&self) -> Street {
        self.data().street
    }

    pub fn player_acting(&self) -> usize {
        self.data().player_acting
    }

    pub fn num_succs(&self) -> usize {
        self.data().succs.len()
    }

    pub fn last_bet_to(&self) -> i32 {
        self.data().last_bet_to
    }

    pub fn nonterminal_id(&self) -> u32 {
        self.data().nonterminal_id
    }

    pub fn terminal_id(&self) -> u32 {
        self.data().terminal_id
    }

    pub fn call_succ_index(&self) -> Option<usize> {
        self.data().call_succ_index
    }

    pub fn fold_succ_index(&self) -> Option<usize> {
        self.data().fold_succ_index
    }

    pub fn default_succ_index(&self) -> usize {
        self.data().default_succ_index
    }

    pub fn ith_succ(&self, i: usize) -> NodeRef {
        NodeRef {
            tree: self.tree.clone(),
            idx: self.data().succs[i],
        }
    }

    pub fn action_name(&self, i: usize) -> &str {
        &self.data().action_names[i]
    }
}

/// Bottom-up arena builder: nodes are appended to `nodes` as they are
/// constructed, so a node's `succs` are always already-assigned indices of
/// previously pushed entries, matching the recursive-descent shape of
/// `build_limit_tree` in the sibling module.
pub(crate) struct Arena {
    pub nodes: Vec<NodeData>,
    next_nonterminal_id: u32,
    next_terminal_id: u32,
}

impl Arena {
    pub fn new() -> Self {
        Arena {
            nodes: vec![],
            next_nonterminal_id: 0,
            next_terminal_id: 0,
        }
    }

    pub fn push_fold_terminal(&mut self, street: Street, last_bet_to: i32) -> usize {
        let id = self.next_terminal_id;
        self.next_terminal_id += 1;
        self.nodes.push(NodeData::terminal_fold(street, id, last_bet_to));
        self.nodes.len() - 1
    }

    pub fn push_showdown_terminal(&mut self, street: Street, last_bet_to: i32) -> usize {
        let id = self.next_terminal_id;
        self.next_terminal_id += 1;
        self.nodes.push(NodeData::terminal_showdown(street, id, last_bet_to));
        self.nodes.len() - 1
    }

    #[allow(clippy::too_many_arguments)]
    pub fn push_nonterminal(
        &mut self,
        street: Street,
        player_acting: usize,
        last_bet_to: i32,
        succs: Vec<usize>,
        call_succ_index: Option<usize>,
        fold_succ_index: Option<usize>,
        default_succ_index: usize,
        action_names: Vec<String>,
    ) -> usize {
        let id = self.next_nonterminal_id;
        self.next_nonterminal_id += 1;
        self.nodes.push(NodeData {
            terminal: false,
            street,
            player_acting,
            showdown: false,
            last_bet_to,
            nonterminal_id: id,
            terminal_id: 0,
            succs,
            call_succ_index,
            fold_succ_index,
            default_succ_index,
            action_names,
        });
        self.nodes.len() - 1
    }

    pub fn finish(self, root: usize) -> Rc<BettingTree> {
        Rc::new(BettingTree {
            nodes: self.nodes,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_two_node_tree_round_trips_through_noderef() {
        let mut arena = Arena::new();
        let leaf = arena.push_fold_terminal(0, 100);
        let root = arena.push_nonterminal(0, 1, 100, vec![leaf], None, Some(0), 0, vec!["f".to_string()]);
        let tree = arena.finish(root);
        let root_ref = tree.root();
        assert!(!root_ref.terminal());
        assert_eq!(root_ref.num_succs(), 1);
        assert_eq!(root_ref.action_name(0), "f");
        let leaf_ref = root_ref.ith_succ(0);
        assert!(leaf_ref.terminal());
        assert!(!leaf_ref.showdown());
    }
}
